//! Serializes queue mutations against the backend.
//!
//! Moves belonging to one plan only make sense in order, and a later plan is
//! computed against the queue as it looks after the earlier one. The
//! dispatcher owns the backend on a background thread and processes requests
//! strictly one after another, reporting each outcome along with a fresh
//! snapshot to reconcile against.
use waxwing_state::{Song, SongId};

use crate::{
    backend::{MoveError, QueueBackend, QueueError, execute_plan},
    reorder::MoveInstruction,
};

/// A mutation to perform against the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchRequest {
    /// Issue the moves of a plan, in order.
    Moves(Vec<MoveInstruction>),
    /// Remove the given songs.
    Remove(Vec<SongId>),
    /// Add the given songs in order, starting at `position`, or append them
    /// if there is none.
    Add {
        songs: Vec<Song>,
        position: Option<usize>,
    },
    /// Empty the queue, then append the given songs.
    Replace(Vec<Song>),
    /// Only fetch a fresh snapshot.
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Why a dispatched request failed.
pub enum DispatchError {
    /// A move of a plan was rejected; later moves were not issued.
    Move(MoveError),
    /// Removing a song failed.
    Remove {
        /// The song that could not be removed.
        song: SongId,
        /// Why it could not be removed.
        source: QueueError,
    },
    /// Adding a song failed; later songs were not added.
    Add {
        /// The ID the song had in the list it was added from.
        song: SongId,
        /// Why it could not be added.
        source: QueueError,
    },
    /// The queue could not be read before replacing it.
    Fetch(QueueError),
}
impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::Move(e) => write!(f, "{e}"),
            DispatchError::Remove { song, source } => {
                write!(f, "Failed to remove {song}: {source}")
            }
            DispatchError::Add { song, source } => write!(f, "Failed to add {song}: {source}"),
            DispatchError::Fetch(e) => write!(f, "Failed to fetch queue: {e}"),
        }
    }
}
impl std::error::Error for DispatchError {}
impl From<MoveError> for DispatchError {
    fn from(e: MoveError) -> Self {
        DispatchError::Move(e)
    }
}

/// The result of one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The ID returned by [`QueueDispatcher::submit`].
    pub request_id: u64,
    pub result: Result<(), DispatchError>,
    /// The IDs the backend assigned to added songs, in the order they were added.
    pub added: Vec<SongId>,
    /// The queue after the request, if it could be fetched.
    pub snapshot: Option<Vec<Song>>,
}

pub struct QueueDispatcher {
    tx: tokio::sync::mpsc::UnboundedSender<(u64, DispatchRequest)>,
    request_counter: u64,
    _thread_handle: std::thread::JoinHandle<()>,
}
impl QueueDispatcher {
    /// Moves `backend` onto a background thread. Outcomes are sent to
    /// `outcome_tx` in submission order; the thread exits once the dispatcher
    /// is dropped or the receiving end goes away.
    pub fn new<B: QueueBackend + Send + 'static>(
        backend: B,
        outcome_tx: std::sync::mpsc::Sender<DispatchOutcome>,
    ) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<(u64, DispatchRequest)>();

        let thread_handle = std::thread::spawn(move || {
            let mut backend = backend;
            runtime.block_on(async move {
                while let Some((request_id, request)) = rx.recv().await {
                    let outcome = process(&mut backend, request_id, request);
                    if outcome_tx.send(outcome).is_err() {
                        tracing::debug!("Outcome receiver dropped; stopping dispatcher");
                        break;
                    }
                }
            });
        });

        Ok(Self {
            tx,
            request_counter: 0,
            _thread_handle: thread_handle,
        })
    }

    /// Queues a request behind every previously submitted one. Returns the ID
    /// its outcome will carry.
    pub fn submit(&mut self, request: DispatchRequest) -> u64 {
        self.request_counter = self.request_counter.wrapping_add(1);
        let request_id = self.request_counter;
        tracing::debug!("Submitting request {request_id}: {request:?}");
        if self.tx.send((request_id, request)).is_err() {
            tracing::warn!("Dispatcher thread is gone; dropping request {request_id}");
        }
        request_id
    }
}

fn process<B: QueueBackend>(
    backend: &mut B,
    request_id: u64,
    request: DispatchRequest,
) -> DispatchOutcome {
    let mut added = vec![];
    let result = match request {
        DispatchRequest::Moves(plan) => execute_plan(backend, &plan).map_err(DispatchError::from),
        DispatchRequest::Remove(songs) => remove_songs(backend, songs),
        DispatchRequest::Add { songs, position } => {
            add_songs(backend, songs, position, &mut added)
        }
        DispatchRequest::Replace(songs) => backend
            .songs()
            .map_err(DispatchError::Fetch)
            .and_then(|current| remove_songs(backend, current.into_iter().map(|s| s.id)))
            .and_then(|()| add_songs(backend, songs, None, &mut added)),
        DispatchRequest::Refresh => Ok(()),
    };
    if let Err(e) = &result {
        tracing::warn!("Request {request_id} failed: {e}");
    }

    let snapshot = backend
        .songs()
        .map_err(|e| tracing::warn!("Failed to fetch queue after request {request_id}: {e}"))
        .ok();

    DispatchOutcome {
        request_id,
        result,
        added,
        snapshot,
    }
}

fn remove_songs<B: QueueBackend>(
    backend: &mut B,
    songs: impl IntoIterator<Item = SongId>,
) -> Result<(), DispatchError> {
    songs.into_iter().try_for_each(|song| {
        backend
            .remove(song)
            .map_err(|source| DispatchError::Remove { song, source })
    })
}

/// Adds songs one by one. An explicit position advances past each inserted
/// song so the songs keep their order.
fn add_songs<B: QueueBackend>(
    backend: &mut B,
    songs: Vec<Song>,
    mut position: Option<usize>,
    added: &mut Vec<SongId>,
) -> Result<(), DispatchError> {
    for song in songs {
        let original = song.id;
        let id = backend
            .add(song, position)
            .map_err(|source| DispatchError::Add {
                song: original,
                source,
            })?;
        added.push(id);
        if let Some(position) = position.as_mut() {
            *position += 1;
        }
    }
    Ok(())
}
