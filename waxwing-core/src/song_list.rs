//! The model behind one song list view (the queue, or a list of search
//! results): the songs, their album clusters, the selection and the drag
//! gesture, kept consistent across queue snapshots.
use waxwing_state::{AlbumCluster, Song, SongId, SongSet, group_into_clusters};

use crate::{
    config::SongListConfig,
    dispatch::DispatchRequest,
    drag::{DragOver, DragState, DragTargetResolver, DropTarget},
    reorder::{MoveInstruction, plan_reorder},
    selection::{Modifier, Reconciliation, SelectionState},
    summary::refresh_album_flags,
};

/// What a song list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongListKind {
    /// The playback queue; songs can be reordered by dragging.
    Queue,
    /// Search results; dragging is off unless configured otherwise.
    SearchResults,
}

/// Which songs a removal from the queue's context menu applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveScope {
    /// Just this song.
    Song(SongId),
    /// Every song except this one.
    Others(SongId),
    /// Every song before this one.
    Before(SongId),
    /// Every song after this one.
    After(SongId),
    /// The selected songs.
    Selection,
}

/// Where songs sent to the queue from a list end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueuePlacement {
    /// After the last song of the queue.
    Append,
    /// Starting at the given queue position.
    Insert(usize),
    /// In place of everything currently queued.
    Replace,
}

pub struct SongList {
    kind: SongListKind,
    songs: SongSet,
    clusters: Vec<AlbumCluster>,
    selection: SelectionState,
    drag: DragTargetResolver,
}
impl SongList {
    pub fn new(kind: SongListKind, config: &SongListConfig) -> Self {
        let draggable = match kind {
            SongListKind::Queue => true,
            SongListKind::SearchResults => config.search_results_draggable,
        };
        SongList {
            kind,
            songs: SongSet::default(),
            clusters: vec![],
            selection: SelectionState::new(),
            drag: DragTargetResolver::new(config.drag_split, draggable),
        }
    }

    pub fn queue(config: &SongListConfig) -> Self {
        Self::new(SongListKind::Queue, config)
    }

    pub fn search_results(config: &SongListConfig) -> Self {
        Self::new(SongListKind::SearchResults, config)
    }

    pub fn kind(&self) -> SongListKind {
        self.kind
    }

    pub fn songs(&self) -> &SongSet {
        &self.songs
    }

    pub fn clusters(&self) -> &[AlbumCluster] {
        &self.clusters
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn is_selected(&self, id: SongId) -> bool {
        self.selection.is_selected(id)
    }

    /// Replaces the songs with a new snapshot, carrying over the selection of
    /// every song that is still present.
    pub fn replace(&mut self, songs: Vec<Song>) -> Reconciliation {
        self.songs = SongSet::new(songs);
        self.clusters = group_into_clusters(self.songs.as_slice());
        let reconciliation = self.selection.reconcile(&self.songs);
        self.drag.clear_stale(&self.songs);
        self.refresh_flags();
        tracing::debug!(
            "Song list updated: {} songs in {} clusters, {} selected ({:?})",
            self.songs.len(),
            self.clusters.len(),
            self.selection.len(),
            reconciliation
        );
        reconciliation
    }

    /// Handles a click on a song row.
    pub fn mark_song(&mut self, modifier: Modifier, id: SongId) {
        if self.selection.mark_song(&self.songs, modifier, id) {
            self.refresh_flags();
        }
    }

    /// Handles a click on an album header.
    pub fn mark_album(&mut self, modifier: Modifier, cluster_index: usize) {
        if self
            .selection
            .mark_album(&self.songs, &self.clusters, modifier, cluster_index)
        {
            self.refresh_flags();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.refresh_flags();
    }

    /// The selected songs, in document order.
    pub fn selected_songs(&self) -> Vec<&Song> {
        self.selection.selected_songs(&self.songs)
    }

    /// The songs that are not selected, in document order.
    pub fn unselected_songs(&self) -> Vec<&Song> {
        self.selection.unselected_songs(&self.songs)
    }

    /// Starts dragging the selection. Returns whether the list accepted the drag.
    pub fn begin_drag(&mut self) -> bool {
        self.drag.begin()
    }

    /// Reports the pointer `pointer_y` units below the top of the row showing
    /// `id`, while dragging.
    pub fn drag_over(&mut self, id: SongId, pointer_y: f32, row_height: f32) -> DragOver {
        if !self.songs.contains(id) {
            return if self.drag.is_dragging() {
                DragOver::Unchanged
            } else {
                DragOver::Inactive
            };
        }
        let is_selected = self.selection.is_selected(id);
        self.drag
            .on_drag_over_row(id, is_selected, pointer_y, row_height)
    }

    /// The pointer left the row it was dragging over.
    pub fn leave_row(&mut self) {
        self.drag.leave_row();
    }

    /// Drops the selection at the current target, returning the moves for the
    /// backend. Returns nothing if no drag was in progress or the drop is a no-op.
    pub fn finish_drag(&mut self) -> Vec<MoveInstruction> {
        let Some(mut drag) = self.drag.finish() else {
            return vec![];
        };
        if let Some(target) = drag.target {
            drag.target_is_selected = self.selection.is_selected(target.song());
        }
        plan_reorder(self.songs.as_slice(), self.selection.selected(), &drag)
    }

    /// Moves the selection to `target` without a pointer gesture.
    pub fn drop_at(&self, target: DropTarget) -> Vec<MoveInstruction> {
        let drag = DragState {
            target: Some(target),
            target_is_selected: self.selection.is_selected(target.song()),
            active: true,
        };
        plan_reorder(self.songs.as_slice(), self.selection.selected(), &drag)
    }

    /// Aborts the drag; no moves are produced.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// The songs a queue removal applies to, in document order.
    ///
    /// Removals relative to a song that is no longer present remove nothing.
    pub fn removal(&self, scope: RemoveScope) -> Vec<SongId> {
        let ids = self.songs.iter().map(|s| s.id);
        match scope {
            RemoveScope::Selection => self.selected_songs().iter().map(|s| s.id).collect(),
            RemoveScope::Song(id)
            | RemoveScope::Others(id)
            | RemoveScope::Before(id)
            | RemoveScope::After(id)
                if !self.songs.contains(id) =>
            {
                vec![]
            }
            RemoveScope::Song(id) => vec![id],
            RemoveScope::Others(id) => ids.filter(|other| *other != id).collect(),
            RemoveScope::Before(id) => ids.take_while(|other| *other != id).collect(),
            RemoveScope::After(id) => ids.skip_while(|other| *other != id).skip(1).collect(),
        }
    }

    /// The request that sends the selected songs, in document order, to the
    /// queue. Returns nothing if no song is selected.
    pub fn enqueue_selection(&self, placement: QueuePlacement) -> Option<DispatchRequest> {
        let songs: Vec<Song> = self.selected_songs().into_iter().cloned().collect();
        if songs.is_empty() {
            return None;
        }
        Some(match placement {
            QueuePlacement::Append => DispatchRequest::Add {
                songs,
                position: None,
            },
            QueuePlacement::Insert(position) => DispatchRequest::Add {
                songs,
                position: Some(position),
            },
            QueuePlacement::Replace => DispatchRequest::Replace(songs),
        })
    }

    /// Resolves the backend's current-song position to the cluster showing it
    /// and the song's offset within that cluster.
    pub fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let cluster_index = self.clusters.partition_point(|c| c.range().end <= index);
        let cluster = self.clusters.get(cluster_index)?;
        cluster
            .range()
            .contains(&index)
            .then(|| (cluster_index, index - cluster.start))
    }

    fn refresh_flags(&mut self) {
        refresh_album_flags(&mut self.clusters, &self.selection);
    }
}
