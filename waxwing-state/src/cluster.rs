use std::ops::Range;

use smol_str::SmolStr;

use crate::{Song, SongId};

/// A maximal contiguous run of songs sharing an album key.
///
/// The same album appearing twice with another album in between forms two
/// clusters; grouping is by contiguity only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumCluster {
    /// The album key shared by every song in the cluster.
    pub album: SmolStr,
    /// The position of the cluster's first song in the song set.
    pub start: usize,
    /// The songs in the cluster, in document order.
    pub songs: Vec<SongId>,
    /// The total duration of the cluster in seconds.
    pub duration_secs: u32,
    /// Whether any song in the cluster is selected.
    pub any_selected: bool,
    /// Whether every song in the cluster is selected.
    pub all_selected: bool,
}
impl AlbumCluster {
    fn new(song: &Song, start: usize) -> Self {
        AlbumCluster {
            album: song.album.clone(),
            start,
            songs: vec![],
            duration_secs: 0,
            any_selected: false,
            all_selected: false,
        }
    }

    /// The first song of the cluster; used for cover lookups.
    pub fn first_song(&self) -> SongId {
        self.songs[0]
    }

    /// The last song of the cluster.
    pub fn last_song(&self) -> SongId {
        self.songs[self.songs.len() - 1]
    }

    /// The number of songs in the cluster.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the cluster has no songs. Clusters built by
    /// [`group_into_clusters`] never do.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// The positions the cluster covers in the song set.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.songs.len()
    }

    /// Whether the cluster contains the given song.
    pub fn contains(&self, id: SongId) -> bool {
        self.songs.contains(&id)
    }
}

/// Partitions songs into clusters of contiguous songs sharing an album key.
///
/// Selection flags on the returned clusters are all unset.
pub fn group_into_clusters(songs: &[Song]) -> Vec<AlbumCluster> {
    let mut clusters = vec![];
    let mut current: Option<AlbumCluster> = None;
    for (i, song) in songs.iter().enumerate() {
        if !current.as_ref().is_some_and(|c| c.album == song.album) {
            if let Some(cluster) = current.take() {
                clusters.push(cluster);
            }
            current = Some(AlbumCluster::new(song, i));
        }

        if let Some(cluster) = current.as_mut() {
            cluster.songs.push(song.id);
            cluster.duration_secs += song.duration_secs;
        }
    }
    if let Some(cluster) = current.take() {
        clusters.push(cluster);
    }
    clusters
}
