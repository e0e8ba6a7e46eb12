//! Turns a dropped selection into the sequence of single-song moves the queue
//! backend has to perform.
//!
//! The backend implements every move as "remove the song, then insert it at
//! the given index", so each index has to account for the removal that
//! precedes its insertion.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use waxwing_state::{Song, SongId};

use crate::drag::DragState;

/// Moves `song` so that it ends up at `target_index`, as observed after the
/// song has been removed from its old position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveInstruction {
    pub song: SongId,
    pub target_index: usize,
}
impl std::fmt::Display for MoveInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "move {} to {}", self.song, self.target_index)
    }
}

/// Plans the moves that insert the selected songs, in document order, at the
/// drag's drop target. The moves must be issued in the returned order.
///
/// Returns an empty plan if there is no target, the target is gone, or the
/// target is itself selected.
pub fn plan_reorder(
    songs: &[Song],
    selected: &HashSet<SongId>,
    drag: &DragState,
) -> Vec<MoveInstruction> {
    let Some(target) = drag.target else {
        return vec![];
    };
    if drag.target_is_selected || selected.contains(&target.song()) {
        tracing::debug!("Drop onto selected song {}; nothing to move", target.song());
        return vec![];
    }
    if !songs.iter().any(|s| s.id == target.song()) {
        tracing::warn!("Drop target {} is no longer present", target.song());
        return vec![];
    }

    let mut target_index = usize::from(target.is_after());
    let mut target_found = false;
    let mut before_target = 0;
    let mut selection = vec![];
    for (position, song) in songs.iter().enumerate() {
        if song.id == target.song() {
            target_found = true;
        }
        if !target_found {
            target_index += 1;
        }
        if selected.contains(&song.id) {
            selection.push(song.id);
            if position < target_index {
                before_target += 1;
            }
        }
    }

    let (before, after) = selection.split_at(before_target);
    let mut plan = Vec::with_capacity(selection.len());
    // Removing one of these shifts the target up by one before it is reinserted.
    plan.extend(before.iter().map(|&song| MoveInstruction {
        song,
        target_index: target_index - 1,
    }));
    plan.extend(after.iter().rev().map(|&song| MoveInstruction {
        song,
        target_index,
    }));

    tracing::debug!(
        "Planned {} moves to {:?} ({} from before the target)",
        plan.len(),
        target,
        before.len()
    );
    plan
}
