//! Per-album "any/all selected" flags used to highlight album headers.
use waxwing_state::AlbumCluster;

use crate::selection::SelectionState;

/// The selection flags of one album cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlbumSelection {
    pub any_selected: bool,
    pub all_selected: bool,
}

/// Computes the selection flags of a single cluster.
pub fn album_selection(cluster: &AlbumCluster, selection: &SelectionState) -> AlbumSelection {
    let selected = cluster
        .songs
        .iter()
        .filter(|id| selection.is_selected(**id))
        .count();
    AlbumSelection {
        any_selected: selected > 0,
        all_selected: selected == cluster.songs.len(),
    }
}

/// Writes fresh selection flags into each cluster.
pub fn refresh_album_flags(clusters: &mut [AlbumCluster], selection: &SelectionState) {
    for cluster in clusters {
        let flags = album_selection(cluster, selection);
        cluster.any_selected = flags.any_selected;
        cluster.all_selected = flags.all_selected;
    }
}
