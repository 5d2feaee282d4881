//! Linear undo/redo over workflow snapshots.
//!
//! Undo restores a previous snapshot rather than inverting the edit, which is
//! safe because snapshots are immutable and share unchanged nodes.

use crate::error::EditError;
use crate::model::{Exit, IdGenerator, NodeId, NodeKind, UuidIds, Workflow};
use crate::mutation::{self, EditRequest};
use crate::snapshot::WorkflowSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

mod request;

pub use request::Request;

/// The `past` / `present` / `future` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    /// Oldest first.
    past: VecDeque<Workflow>,
    present: Workflow,
    /// Soonest redo first.
    future: VecDeque<Workflow>,
}

impl HistoryState {
    pub fn new(present: Workflow) -> Self {
        Self {
            past: VecDeque::new(),
            present,
            future: VecDeque::new(),
        }
    }

    pub fn past(&self) -> impl Iterator<Item = &Workflow> {
        self.past.iter()
    }

    pub fn present(&self) -> &Workflow {
        &self.present
    }

    pub fn future(&self) -> impl Iterator<Item = &Workflow> {
        self.future.iter()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Installs `next` as the present unless it is the unchanged present.
    /// Clears the redo stack on change.
    fn record(&mut self, next: Workflow, limit: Option<usize>) -> bool {
        if Workflow::ptr_eq(&self.present, &next) {
            return false;
        }
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push_back(previous);
        self.future.clear();
        if let Some(limit) = limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
        true
    }

    fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let superseded = std::mem::replace(&mut self.present, previous);
        self.future.push_front(superseded);
        true
    }

    fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let superseded = std::mem::replace(&mut self.present, next);
        self.past.push_back(superseded);
        true
    }
}

/// An editing session: the history triple plus the id generator that feeds
/// every insert.
///
/// Each request handler returns `true` when `present` changed.
pub struct History {
    state: HistoryState,
    ids: Box<dyn IdGenerator>,
    limit: Option<usize>,
}

impl History {
    /// A session seeded with a single start node, UUID ids and unbounded history.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> HistoryBuilder {
        HistoryBuilder::default()
    }

    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    pub fn present(&self) -> &Workflow {
        &self.state.present
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    /// Maximum number of retained undo snapshots, if bounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Snapshot of `present` in the exported JSON shape.
    pub fn export(&self) -> WorkflowSnapshot {
        self.state.present.export()
    }

    pub fn insert(
        &mut self,
        parent_id: &NodeId,
        slot: Option<Exit>,
        kind: NodeKind,
        label: Option<&str>,
    ) -> bool {
        self.apply(&EditRequest::Insert {
            parent_id: parent_id.clone(),
            slot,
            kind,
            label: label.map(str::to_string),
        })
    }

    pub fn delete(&mut self, node_id: &NodeId) -> bool {
        self.apply(&EditRequest::Delete {
            node_id: node_id.clone(),
        })
    }

    pub fn update_label(&mut self, node_id: &NodeId, label: &str) -> bool {
        self.apply(&EditRequest::UpdateLabel {
            node_id: node_id.clone(),
            label: label.to_string(),
        })
    }

    /// Applies an edit through the engine and records it if anything changed.
    pub fn apply(&mut self, request: &EditRequest) -> bool {
        let next = mutation::apply(&self.state.present, request, self.ids.as_mut());
        let changed = self.state.record(next, self.limit);
        if changed {
            log::debug!(
                "Applied {} ({} node(s), {} undo step(s))",
                request.name(),
                self.state.present.len(),
                self.state.past.len()
            );
        }
        changed
    }

    /// Like [`History::apply`], but reports why a rejected edit was rejected.
    pub fn try_apply(&mut self, request: &EditRequest) -> Result<(), EditError> {
        let next = mutation::try_apply(&self.state.present, request, self.ids.as_mut())?;
        self.state.record(next, self.limit);
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.state.undo();
        if changed {
            log::debug!("Undo ({} step(s) left)", self.state.past.len());
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.state.redo();
        if changed {
            log::debug!("Redo ({} step(s) left)", self.state.future.len());
        }
        changed
    }

    /// Routes one of the five logical requests to its handler.
    pub fn dispatch(&mut self, request: Request) -> bool {
        match request {
            Request::Insert {
                parent_id,
                slot,
                kind,
                label,
            } => self.apply(&EditRequest::Insert {
                parent_id,
                slot,
                kind,
                label,
            }),
            Request::Delete { node_id } => self.apply(&EditRequest::Delete { node_id }),
            Request::UpdateLabel { node_id, label } => {
                self.apply(&EditRequest::UpdateLabel { node_id, label })
            }
            Request::Undo => self.undo(),
            Request::Redo => self.redo(),
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("state", &self.state)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

/// Configures a [`History`] session.
#[derive(Default)]
pub struct HistoryBuilder {
    ids: Option<Box<dyn IdGenerator>>,
    workflow: Option<Workflow>,
    limit: Option<usize>,
}

impl HistoryBuilder {
    /// Source of node ids for the session. Defaults to [`UuidIds`].
    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Starts from an existing workflow instead of a fresh single-start tree.
    pub fn workflow(mut self, workflow: Workflow) -> Self {
        self.workflow = Some(workflow);
        self
    }

    /// Keeps at most `limit` undo snapshots (at least one). Unbounded by default.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit.max(1));
        self
    }

    pub fn build(self) -> History {
        let mut ids = self.ids.unwrap_or_else(|| Box::new(UuidIds));
        let present = match self.workflow {
            Some(workflow) => workflow,
            None => Workflow::new(ids.as_mut()),
        };
        History {
            state: HistoryState::new(present),
            ids,
            limit: self.limit,
        }
    }
}

/// Counters reported after replaying a batch of requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub accepted: usize,
    pub rejected: usize,
}

impl History {
    /// Dispatches every request in order and counts how many changed `present`.
    pub fn replay(&mut self, requests: impl IntoIterator<Item = Request>) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for request in requests {
            if self.dispatch(request) {
                summary.accepted += 1;
            } else {
                summary.rejected += 1;
            }
        }
        summary
    }
}
