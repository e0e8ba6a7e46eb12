//! The data model shared by waxwing's song lists: songs as the queue backend
//! reports them, the ordered set a list view displays, and the album clusters
//! that set is partitioned into.
#![deny(missing_docs)]

mod song;
pub use song::{Song, SongId};

mod song_set;
pub use song_set::SongSet;

mod cluster;
pub use cluster::{AlbumCluster, group_into_clusters};
