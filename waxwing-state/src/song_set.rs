use std::collections::HashMap;

use crate::{Song, SongId};

/// The ordered songs shown by one list view, indexed by ID.
///
/// Replaced wholesale whenever the backend reports a new snapshot; never
/// edited in place.
#[derive(Debug, Clone, Default)]
pub struct SongSet {
    songs: Vec<Song>,
    positions: HashMap<SongId, usize>,
}
impl SongSet {
    /// Builds a set from songs in document order.
    ///
    /// If an ID occurs more than once, lookups resolve to its first occurrence.
    pub fn new(songs: Vec<Song>) -> Self {
        let mut positions = HashMap::with_capacity(songs.len());
        for (i, song) in songs.iter().enumerate() {
            positions.entry(song.id).or_insert(i);
        }
        SongSet { songs, positions }
    }

    /// The number of songs.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether there are no songs.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// The songs in document order.
    pub fn as_slice(&self) -> &[Song] {
        &self.songs
    }

    /// Iterates the songs in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.songs.iter()
    }

    /// The song with the given ID, if present.
    pub fn get(&self, id: SongId) -> Option<&Song> {
        self.position(id).map(|i| &self.songs[i])
    }

    /// The 0-based position of the song with the given ID, if present.
    pub fn position(&self, id: SongId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Whether a song with the given ID is present.
    pub fn contains(&self, id: SongId) -> bool {
        self.positions.contains_key(&id)
    }
}
impl From<Vec<Song>> for SongSet {
    fn from(songs: Vec<Song>) -> Self {
        SongSet::new(songs)
    }
}
impl FromIterator<Song> for SongSet {
    fn from_iter<I: IntoIterator<Item = Song>>(iter: I) -> Self {
        SongSet::new(iter.into_iter().collect())
    }
}
impl<'a> IntoIterator for &'a SongSet {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let set: SongSet = [
            Song::new(10, "A", 1, "one", 60),
            Song::new(4, "A", 2, "two", 60),
            Song::new(7, "B", 1, "three", 60),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 3);
        assert_eq!(set.position(SongId(4)), Some(1));
        assert_eq!(set.get(SongId(7)).map(|s| s.title.as_str()), Some("three"));
        assert!(!set.contains(SongId(1)));
        assert_eq!(set.position(SongId(1)), None);
    }

    #[test]
    fn test_duplicate_id_resolves_to_first() {
        let set = SongSet::new(vec![
            Song::new(1, "A", 1, "first", 60),
            Song::new(1, "A", 2, "second", 60),
        ]);
        assert_eq!(set.position(SongId(1)), Some(0));
    }
}
