use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A song ID, as assigned by the queue backend.
///
/// Stable for the lifetime of a song within one queue, regardless of how often
/// it is moved; positions are not.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SongId(pub u32);
impl std::fmt::Display for SongId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A song, as `waxwing` cares about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// The song ID
    pub id: SongId,
    /// The file the backend plays for this song
    #[serde(default)]
    pub file: String,
    /// The album key songs are clustered by
    #[serde(default)]
    pub album: SmolStr,
    /// The album artist
    #[serde(default)]
    pub album_artist: Option<String>,
    /// The song artist
    #[serde(default)]
    pub artist: Option<String>,
    /// The track number
    #[serde(default)]
    pub track: u32,
    /// The song title
    #[serde(default)]
    pub title: String,
    /// The duration in seconds
    #[serde(default)]
    pub duration_secs: u32,
}
impl Song {
    /// Creates a song with the given identity and album placement; the
    /// remaining metadata is left empty.
    pub fn new(
        id: u32,
        album: impl Into<SmolStr>,
        track: u32,
        title: impl Into<String>,
        duration_secs: u32,
    ) -> Self {
        Song {
            id: SongId(id),
            file: String::new(),
            album: album.into(),
            album_artist: None,
            artist: None,
            track,
            title: title.into(),
            duration_secs,
        }
    }

    /// The title to show for this song. Includes the artist if it differs
    /// from the album artist.
    pub fn display_title(&self) -> String {
        match &self.artist {
            Some(artist) if self.album_artist.as_ref() != Some(artist) => {
                format!("{artist} - {}", self.title)
            }
            _ => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title() {
        let mut song = Song::new(1, "Blue Train", 1, "Moment's Notice", 548);
        assert_eq!(song.display_title(), "Moment's Notice");

        song.album_artist = Some("John Coltrane".to_string());
        song.artist = Some("John Coltrane".to_string());
        assert_eq!(song.display_title(), "Moment's Notice");

        song.artist = Some("Lee Morgan".to_string());
        assert_eq!(song.display_title(), "Lee Morgan - Moment's Notice");
    }

    #[test]
    fn test_song_deserializes_with_missing_metadata() {
        let song: Song =
            serde_json::from_str(r#"{"id": 7, "album": "Kind of Blue", "title": "So What"}"#)
                .unwrap();
        assert_eq!(song.id, SongId(7));
        assert_eq!(song.album, "Kind of Blue");
        assert_eq!(song.track, 0);
        assert_eq!(song.artist, None);
    }
}
