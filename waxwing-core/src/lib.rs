pub mod backend;
pub mod config;
pub mod dispatch;
pub mod drag;
pub mod reorder;
pub mod selection;
pub mod song_list;
pub mod summary;
pub mod util;

pub use waxwing_state;

pub use backend::{InMemoryQueue, MoveError, QueueBackend, QueueError, QueueResult, execute_plan};
pub use dispatch::{DispatchError, DispatchOutcome, DispatchRequest, QueueDispatcher};
pub use drag::{DragOver, DragSplit, DragState, DropTarget};
pub use reorder::{MoveInstruction, plan_reorder};
pub use selection::{Modifier, Reconciliation, SelectionState};
pub use song_list::{QueuePlacement, RemoveScope, SongList, SongListKind};
