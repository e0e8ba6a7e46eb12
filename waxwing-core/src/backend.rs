//! The playback queue backend, as the song list engine sees it.
use waxwing_state::{Song, SongId};

use crate::reorder::MoveInstruction;

#[derive(Debug, Clone, PartialEq, Eq)]
/// An error reported by the queue backend.
pub enum QueueError {
    /// The song is not in the queue (anymore).
    UnknownSong(SongId),
    /// The requested position is outside the queue.
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The length of the queue at the time of the request.
        len: usize,
    },
    /// The backend is not reachable.
    Disconnected,
}
impl std::fmt::Display for QueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueError::UnknownSong(id) => write!(f, "Song {id} is not in the queue"),
            QueueError::IndexOutOfRange { index, len } => {
                write!(f, "Position {index} is outside the queue of {len} songs")
            }
            QueueError::Disconnected => write!(f, "Not connected to the queue backend"),
        }
    }
}
impl std::error::Error for QueueError {}
/// A result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A move of a plan that the backend rejected.
pub struct MoveError {
    /// The rejected move.
    pub instruction: MoveInstruction,
    /// Why it was rejected.
    pub source: QueueError,
}
impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to {}: {}", self.instruction, self.source)
    }
}
impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// The operations a playback queue offers.
///
/// A move is observed as an atomic removal followed by an insertion at
/// `index` in the shortened queue.
pub trait QueueBackend {
    /// The current queue, in order.
    fn songs(&mut self) -> QueueResult<Vec<Song>>;
    /// Moves a song to `index`.
    fn move_song(&mut self, id: SongId, index: usize) -> QueueResult<()>;
    /// Removes a song.
    fn remove(&mut self, id: SongId) -> QueueResult<()>;
    /// Inserts a song at `position`, or appends it if there is none. Returns the
    /// ID the backend assigned to the new queue entry.
    fn add(&mut self, song: Song, position: Option<usize>) -> QueueResult<SongId>;
}

/// Issues the moves of a plan in order, stopping at the first rejected one.
///
/// Moves issued before the failure are not rolled back; the caller is expected
/// to reconcile against the next queue snapshot.
pub fn execute_plan<B: QueueBackend + ?Sized>(
    backend: &mut B,
    plan: &[MoveInstruction],
) -> Result<(), MoveError> {
    for &instruction in plan {
        backend
            .move_song(instruction.song, instruction.target_index)
            .map_err(|source| MoveError {
                instruction,
                source,
            })?;
    }
    Ok(())
}

/// A queue held in memory, with the same move semantics as a real backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQueue {
    songs: Vec<Song>,
    next_id: u32,
}
impl InMemoryQueue {
    pub fn new(songs: Vec<Song>) -> Self {
        let next_id = songs.iter().map(|s| s.id.0 + 1).max().unwrap_or(1);
        InMemoryQueue { songs, next_id }
    }

    pub fn as_slice(&self) -> &[Song] {
        &self.songs
    }

    pub fn ids(&self) -> Vec<SongId> {
        self.songs.iter().map(|s| s.id).collect()
    }

    fn position(&self, id: SongId) -> QueueResult<usize> {
        self.songs
            .iter()
            .position(|s| s.id == id)
            .ok_or(QueueError::UnknownSong(id))
    }
}
impl QueueBackend for InMemoryQueue {
    fn songs(&mut self) -> QueueResult<Vec<Song>> {
        Ok(self.songs.clone())
    }

    fn move_song(&mut self, id: SongId, index: usize) -> QueueResult<()> {
        let from = self.position(id)?;
        if index >= self.songs.len() {
            return Err(QueueError::IndexOutOfRange {
                index,
                len: self.songs.len(),
            });
        }
        let song = self.songs.remove(from);
        self.songs.insert(index, song);
        Ok(())
    }

    fn remove(&mut self, id: SongId) -> QueueResult<()> {
        let position = self.position(id)?;
        self.songs.remove(position);
        Ok(())
    }

    fn add(&mut self, mut song: Song, position: Option<usize>) -> QueueResult<SongId> {
        let position = position.unwrap_or(self.songs.len());
        if position > self.songs.len() {
            return Err(QueueError::IndexOutOfRange {
                index: position,
                len: self.songs.len(),
            });
        }
        song.id = SongId(self.next_id);
        self.next_id += 1;
        let id = song.id;
        self.songs.insert(position, song);
        Ok(id)
    }
}
