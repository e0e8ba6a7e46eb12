//! Multi-selection driven by pointer clicks with modifier keys.
//!
//! All state is keyed by [`SongId`]; positions are only looked up in the
//! [`SongSet`] passed to each operation, as they shift on every queue change.
use std::collections::HashSet;

use waxwing_state::{AlbumCluster, Song, SongId, SongSet};

/// The modifier held while clicking a song or album header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    /// Select only the clicked item.
    #[default]
    None,
    /// Toggle the clicked item, leaving the rest of the selection alone.
    Ctrl,
    /// Extend a range from the anchor to the clicked item.
    Shift,
}

/// Which songs are selected, and the bookkeeping needed for range selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: HashSet<SongId>,
    anchor: Option<SongId>,
    /// Songs selected purely as a side effect of the current shift sequence.
    /// Only these may be deselected again when a later range shrinks.
    last_range_adds: HashSet<SongId>,
}

/// What a reconciliation against a new song set changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// How many selected songs disappeared and were dropped from the selection.
    pub pruned: usize,
    /// Whether the anchor disappeared and was cleared.
    pub anchor_cleared: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: SongId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected(&self) -> &HashSet<SongId> {
        &self.selected
    }

    pub fn anchor(&self) -> Option<SongId> {
        self.anchor
    }

    pub fn last_range_adds(&self) -> &HashSet<SongId> {
        &self.last_range_adds
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drops everything, including the anchor.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.last_range_adds.clear();
        self.anchor = None;
    }

    /// Applies a click on a single song.
    ///
    /// Returns `false` without changing anything if `id` is not in `songs`.
    pub fn mark_song(&mut self, songs: &SongSet, modifier: Modifier, id: SongId) -> bool {
        if !songs.contains(id) {
            tracing::debug!("Ignoring mark of unknown song {id}");
            return false;
        }

        match (modifier, self.anchor) {
            (Modifier::Shift, Some(anchor)) => self.extend_range(songs, anchor, id),
            (Modifier::Ctrl, _) => self.toggle(id),
            // A shift-click without an anchor degrades to a plain click.
            _ => self.select_only(id),
        }
        true
    }

    /// Applies a click on an album header, with [`mark_song`](Self::mark_song)
    /// semantics at album granularity.
    ///
    /// `clusters` must be the clustering of `songs`.
    pub fn mark_album(
        &mut self,
        songs: &SongSet,
        clusters: &[AlbumCluster],
        modifier: Modifier,
        cluster_index: usize,
    ) -> bool {
        let Some(cluster) = clusters.get(cluster_index) else {
            tracing::debug!("Ignoring mark of unknown album cluster {cluster_index}");
            return false;
        };

        match modifier {
            Modifier::Ctrl => {
                for &id in &cluster.songs {
                    if !self.is_selected(id) {
                        self.mark_song(songs, Modifier::Ctrl, id);
                    }
                }
            }
            Modifier::Shift => {
                let anchor_precedes = self
                    .anchor
                    .and_then(|anchor| songs.position(anchor))
                    .is_some_and(|position| position < cluster.start);
                let boundary = if anchor_precedes {
                    cluster.last_song()
                } else {
                    cluster.first_song()
                };
                self.mark_song(songs, Modifier::Shift, boundary);
            }
            Modifier::None => {
                let mut modifier = Modifier::None;
                for &id in &cluster.songs {
                    self.mark_song(songs, modifier, id);
                    modifier = Modifier::Ctrl;
                }
            }
        }
        true
    }

    /// The selected songs, in document order.
    pub fn selected_songs<'a>(&self, songs: &'a SongSet) -> Vec<&'a Song> {
        songs.iter().filter(|s| self.is_selected(s.id)).collect()
    }

    /// The songs that are not selected, in document order.
    pub fn unselected_songs<'a>(&self, songs: &'a SongSet) -> Vec<&'a Song> {
        songs.iter().filter(|s| !self.is_selected(s.id)).collect()
    }

    /// Carries the selection over to a freshly supplied song set: songs that
    /// survived stay selected, the rest are dropped along with a dangling anchor.
    pub fn reconcile(&mut self, songs: &SongSet) -> Reconciliation {
        let before = self.selected.len();
        self.selected.retain(|id| songs.contains(*id));
        self.last_range_adds.retain(|id| songs.contains(*id));

        let anchor_cleared = self.anchor.is_some_and(|anchor| !songs.contains(anchor));
        if anchor_cleared {
            self.anchor = None;
        }

        Reconciliation {
            pruned: before - self.selected.len(),
            anchor_cleared,
        }
    }

    fn select_only(&mut self, id: SongId) {
        self.last_range_adds.clear();
        self.anchor = Some(id);
        self.selected.clear();
        self.selected.insert(id);
    }

    fn toggle(&mut self, id: SongId) {
        self.last_range_adds.clear();
        self.anchor = Some(id);
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    fn extend_range(&mut self, songs: &SongSet, anchor: SongId, target: SongId) {
        let (Some(from), Some(to)) = (songs.position(anchor), songs.position(target)) else {
            tracing::debug!("Anchor {anchor} is gone; treating shift-click as plain click");
            return self.select_only(target);
        };

        let run = &songs.as_slice()[from.min(to)..=from.max(to)];
        let mut range_adds = HashSet::with_capacity(run.len());
        for song in run {
            if self.selected.insert(song.id) || self.last_range_adds.contains(&song.id) {
                range_adds.insert(song.id);
            }
        }
        for id in self.last_range_adds.difference(&range_adds) {
            self.selected.remove(id);
        }
        tracing::debug!(
            "Range {anchor}..={target}: {} songs, {} added by range",
            run.len(),
            range_adds.len()
        );
        self.last_range_adds = range_adds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waxwing_state::group_into_clusters;

    fn song_set(albums: &[&str]) -> SongSet {
        albums
            .iter()
            .enumerate()
            .map(|(i, album)| Song::new(i as u32 + 1, *album, i as u32 + 1, format!("{i}"), 120))
            .collect()
    }

    fn ids(songs: &[&Song]) -> Vec<u32> {
        songs.iter().map(|s| s.id.0).collect()
    }

    fn selected_ids(selection: &SelectionState, songs: &SongSet) -> Vec<u32> {
        ids(&selection.selected_songs(songs))
    }

    const A: SongId = SongId(1);
    const B: SongId = SongId(2);
    const C: SongId = SongId(3);
    const D: SongId = SongId(4);
    const E: SongId = SongId(5);

    #[test]
    fn test_plain_click_selects_only_that_song() {
        let songs = song_set(&["x"; 5]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::Ctrl, A);
        selection.mark_song(&songs, Modifier::Ctrl, C);
        selection.mark_song(&songs, Modifier::Shift, E);

        selection.mark_song(&songs, Modifier::None, B);
        assert_eq!(selected_ids(&selection, &songs), vec![2]);
        assert_eq!(selection.anchor(), Some(B));
        assert!(selection.last_range_adds().is_empty());
    }

    #[test]
    fn test_ctrl_click_toggles() {
        let songs = song_set(&["x"; 5]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::None, A);
        selection.mark_song(&songs, Modifier::Ctrl, D);
        let before = selection.selected().clone();

        selection.mark_song(&songs, Modifier::Ctrl, C);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 3, 4]);
        assert_eq!(selection.anchor(), Some(C));

        selection.mark_song(&songs, Modifier::Ctrl, C);
        assert_eq!(selection.selected(), &before);
        assert_eq!(selection.anchor(), Some(C));
    }

    #[test]
    fn test_shift_without_anchor_is_plain_click() {
        let songs = song_set(&["x"; 5]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::Shift, C);
        assert_eq!(selected_ids(&selection, &songs), vec![3]);
        assert_eq!(selection.anchor(), Some(C));
    }

    #[test]
    fn test_shift_range_grows_and_shrinks() {
        let songs = song_set(&["x"; 5]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::Ctrl, A);
        selection.mark_song(&songs, Modifier::Ctrl, B);

        selection.mark_song(&songs, Modifier::Shift, D);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 2, 3, 4]);
        assert_eq!(selection.anchor(), Some(B));

        selection.mark_song(&songs, Modifier::Shift, C);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 2, 3]);
        assert_eq!(selection.anchor(), Some(B));
    }

    #[test]
    fn test_shift_range_backwards_releases_forward_range() {
        let songs = song_set(&["x"; 5]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::None, C);

        selection.mark_song(&songs, Modifier::Shift, E);
        assert_eq!(selected_ids(&selection, &songs), vec![3, 4, 5]);

        selection.mark_song(&songs, Modifier::Shift, A);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 2, 3]);
    }

    #[test]
    fn test_shift_keeps_songs_added_by_earlier_range() {
        let songs = song_set(&["x"; 5]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::None, A);

        selection.mark_song(&songs, Modifier::Shift, C);
        selection.mark_song(&songs, Modifier::Shift, E);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 2, 3, 4, 5]);

        selection.mark_song(&songs, Modifier::Shift, B);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 2]);
    }

    #[test]
    fn test_shift_never_releases_independently_selected_songs() {
        let songs = song_set(&["x"; 5]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::Ctrl, D);
        selection.mark_song(&songs, Modifier::Ctrl, A);

        selection.mark_song(&songs, Modifier::Shift, E);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 2, 3, 4, 5]);
        assert!(!selection.last_range_adds().contains(&D));

        selection.mark_song(&songs, Modifier::Shift, B);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 2, 4]);
    }

    #[test]
    fn test_ctrl_click_ends_shift_sequence() {
        let songs = song_set(&["x"; 5]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::None, A);
        selection.mark_song(&songs, Modifier::Shift, C);

        selection.mark_song(&songs, Modifier::Ctrl, E);
        assert!(selection.last_range_adds().is_empty());

        // Extends from the new anchor; B and C are no longer range-adds.
        selection.mark_song(&songs, Modifier::Shift, D);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 2, 3, 4, 5]);
        selection.mark_song(&songs, Modifier::Shift, E);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_unknown_song_is_ignored() {
        let songs = song_set(&["x"; 3]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::None, A);
        assert!(!selection.mark_song(&songs, Modifier::None, SongId(99)));
        assert_eq!(selected_ids(&selection, &songs), vec![1]);
        assert_eq!(selection.anchor(), Some(A));
    }

    #[test]
    fn test_projections_follow_document_order() {
        let songs = song_set(&["x"; 5]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::Ctrl, E);
        selection.mark_song(&songs, Modifier::Ctrl, B);
        selection.mark_song(&songs, Modifier::Ctrl, D);
        assert_eq!(selected_ids(&selection, &songs), vec![2, 4, 5]);
        assert_eq!(ids(&selection.unselected_songs(&songs)), vec![1, 3]);
    }

    #[test]
    fn test_mark_album_plain_selects_exactly_that_album() {
        let songs = song_set(&["a", "a", "b", "b", "b", "c"]);
        let clusters = group_into_clusters(songs.as_slice());
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::Ctrl, A);
        selection.mark_song(&songs, Modifier::Ctrl, SongId(6));

        selection.mark_album(&songs, &clusters, Modifier::None, 1);
        assert_eq!(selected_ids(&selection, &songs), vec![3, 4, 5]);
        assert_eq!(selection.anchor(), Some(E));
    }

    #[test]
    fn test_mark_album_ctrl_accumulates() {
        let songs = song_set(&["a", "a", "b", "b", "b", "c"]);
        let clusters = group_into_clusters(songs.as_slice());
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::None, A);
        selection.mark_song(&songs, Modifier::Ctrl, D);

        selection.mark_album(&songs, &clusters, Modifier::Ctrl, 1);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 3, 4, 5]);

        // Fully selected albums are left as they are.
        selection.mark_album(&songs, &clusters, Modifier::Ctrl, 1);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_mark_album_shift_covers_whole_album() {
        let songs = song_set(&["a", "a", "b", "b", "c", "c"]);
        let clusters = group_into_clusters(songs.as_slice());

        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::None, B);
        selection.mark_album(&songs, &clusters, Modifier::Shift, 2);
        assert_eq!(selected_ids(&selection, &songs), vec![2, 3, 4, 5, 6]);

        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::None, E);
        selection.mark_album(&songs, &clusters, Modifier::Shift, 0);
        assert_eq!(selected_ids(&selection, &songs), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_mark_album_shift_without_anchor_selects_first_song() {
        let songs = song_set(&["a", "b", "b"]);
        let clusters = group_into_clusters(songs.as_slice());
        let mut selection = SelectionState::new();
        selection.mark_album(&songs, &clusters, Modifier::Shift, 1);
        assert_eq!(selected_ids(&selection, &songs), vec![2]);
    }

    #[test]
    fn test_reconcile_prunes_missing_songs() {
        let songs = song_set(&["x"; 5]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::Ctrl, B);
        selection.mark_song(&songs, Modifier::Ctrl, D);
        selection.mark_song(&songs, Modifier::Ctrl, E);

        let remaining: SongSet = songs.iter().filter(|s| s.id != D).cloned().collect();
        let result = selection.reconcile(&remaining);
        assert_eq!(result.pruned, 1);
        assert!(!result.anchor_cleared);
        assert_eq!(selected_ids(&selection, &remaining), vec![2, 5]);
        assert_eq!(selection.anchor(), Some(E));
    }

    #[test]
    fn test_reconcile_clears_dangling_anchor() {
        let songs = song_set(&["x"; 5]);
        let mut selection = SelectionState::new();
        selection.mark_song(&songs, Modifier::None, C);

        let remaining: SongSet = songs.iter().filter(|s| s.id != C).cloned().collect();
        let result = selection.reconcile(&remaining);
        assert!(result.anchor_cleared);
        assert_eq!(selection.anchor(), None);

        selection.mark_song(&remaining, Modifier::Shift, E);
        assert_eq!(selected_ids(&selection, &remaining), vec![5]);
    }
}
