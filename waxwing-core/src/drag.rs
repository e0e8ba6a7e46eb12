//! Resolution of the insertion point while a selection is dragged over a list.
use serde::{Deserialize, Serialize};
use waxwing_state::{SongId, SongSet};

/// Where a drop would insert the dragged selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Immediately before the given song.
    Before(SongId),
    /// Immediately after the given song.
    After(SongId),
}
impl DropTarget {
    /// The song the insertion point is relative to.
    pub fn song(&self) -> SongId {
        match self {
            DropTarget::Before(id) | DropTarget::After(id) => *id,
        }
    }

    pub fn is_after(&self) -> bool {
        matches!(self, DropTarget::After(_))
    }
}

/// The live state of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragState {
    /// The current insertion point; at most one boundary is live at a time.
    pub target: Option<DropTarget>,
    /// Whether the row the boundary belongs to was selected when the boundary
    /// was chosen. Dropping there is a no-op.
    pub target_is_selected: bool,
    pub active: bool,
}
impl DragState {
    pub fn target_before(&self) -> Option<SongId> {
        match self.target {
            Some(DropTarget::Before(id)) => Some(id),
            _ => None,
        }
    }

    pub fn target_after(&self) -> Option<SongId> {
        match self.target {
            Some(DropTarget::After(id)) => Some(id),
            _ => None,
        }
    }
}

/// How a row is split into the region that inserts before it and the region
/// that inserts after it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DragSplit {
    /// A pointer further than this many units from the row top inserts after.
    Offset(f32),
    /// A pointer further than this fraction of the row height inserts after.
    Fraction(f32),
}
impl Default for DragSplit {
    fn default() -> Self {
        DragSplit::Offset(10.0)
    }
}
impl DragSplit {
    pub fn is_after(&self, pointer_y: f32, row_height: f32) -> bool {
        match *self {
            DragSplit::Offset(offset) => pointer_y > offset,
            DragSplit::Fraction(fraction) => pointer_y > row_height * fraction,
        }
    }
}

/// The result of reporting pointer motion over a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOver {
    /// No drag is in progress.
    Inactive,
    /// The insertion point did not change.
    Unchanged,
    /// The insertion point moved; the insertion marker needs redrawing.
    Moved(DragState),
}

/// Tracks a drag gesture from start to drop.
#[derive(Debug, Clone)]
pub struct DragTargetResolver {
    split: DragSplit,
    enabled: bool,
    state: DragState,
    hovered: Option<SongId>,
}
impl DragTargetResolver {
    /// Creates a resolver. A disabled resolver ignores every drag.
    pub fn new(split: DragSplit, enabled: bool) -> Self {
        DragTargetResolver {
            split,
            enabled,
            state: DragState::default(),
            hovered: None,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_dragging(&self) -> bool {
        self.state.active
    }

    /// Starts a drag. Returns whether a drag is now in progress.
    pub fn begin(&mut self) -> bool {
        if self.enabled && !self.state.active {
            tracing::debug!("Drag started");
            self.state = DragState {
                active: true,
                ..DragState::default()
            };
            self.hovered = None;
        }
        self.state.active
    }

    /// Reports the pointer at `pointer_y` units below the top of the row
    /// showing `song`, which has the given selection state.
    ///
    /// Entering a row always re-emits its boundary; moving within the row only
    /// does so when the pointer crosses the split.
    pub fn on_drag_over_row(
        &mut self,
        song: SongId,
        is_selected: bool,
        pointer_y: f32,
        row_height: f32,
    ) -> DragOver {
        if !self.state.active {
            return DragOver::Inactive;
        }

        let target = if self.split.is_after(pointer_y, row_height) {
            DropTarget::After(song)
        } else {
            DropTarget::Before(song)
        };
        let entered = self.hovered != Some(song);
        self.hovered = Some(song);
        if !entered && self.state.target == Some(target) {
            return DragOver::Unchanged;
        }

        tracing::debug!("Drag target now {target:?} (selected={is_selected})");
        self.state.target = Some(target);
        self.state.target_is_selected = is_selected;
        DragOver::Moved(self.state)
    }

    /// The pointer left the row it was over. The last boundary stays live.
    pub fn leave_row(&mut self) {
        self.hovered = None;
    }

    /// Ends the drag, returning its final state if one was in progress.
    pub fn finish(&mut self) -> Option<DragState> {
        if !self.state.active {
            return None;
        }
        let state = std::mem::take(&mut self.state);
        self.hovered = None;
        tracing::debug!("Drag finished at {:?}", state.target);
        Some(state)
    }

    /// Aborts the drag without producing a drop.
    pub fn cancel(&mut self) {
        if self.state.active {
            tracing::debug!("Drag cancelled");
        }
        self.state = DragState::default();
        self.hovered = None;
    }

    /// Drops the current boundary if its song is no longer in `songs`.
    /// Returns whether anything was cleared.
    pub fn clear_stale(&mut self, songs: &SongSet) -> bool {
        let Some(target) = self.state.target else {
            return false;
        };
        if songs.contains(target.song()) {
            return false;
        }
        tracing::debug!("Drag target {} is gone; clearing it", target.song());
        self.state.target = None;
        self.state.target_is_selected = false;
        if self.hovered == Some(target.song()) {
            self.hovered = None;
        }
        true
    }
}
