//! Structural edits over [`Workflow`] snapshots.
//!
//! Every operation takes a snapshot and returns a new one, leaving the input
//! untouched. Each comes in two flavours:
//!
//! * `try_*` returns `Err(EditError)` when the request is rejected, so callers
//!   can tell *why* nothing happened.
//! * the plain form is total: a rejected request returns a clone of the input
//!   that shares its storage, detectable with [`Workflow::ptr_eq`].

use crate::error::EditError;
use crate::model::{Exit, IdGenerator, NodeId, NodeKind, Workflow};

mod delete;
mod insert;
mod label;

pub use delete::{delete, try_delete};
pub use insert::{insert, try_insert};
pub use label::{try_update_label, update_label};

/// A structural edit that the engine can apply to a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    Insert {
        parent_id: NodeId,
        slot: Option<Exit>,
        kind: NodeKind,
        label: Option<String>,
    },
    Delete {
        node_id: NodeId,
    },
    UpdateLabel {
        node_id: NodeId,
        label: String,
    },
}

impl EditRequest {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            EditRequest::Insert { .. } => "insert",
            EditRequest::Delete { .. } => "delete",
            EditRequest::UpdateLabel { .. } => "update-label",
        }
    }
}

/// Applies `request`, reporting why it was rejected.
pub fn try_apply(
    workflow: &Workflow,
    request: &EditRequest,
    ids: &mut dyn IdGenerator,
) -> Result<Workflow, EditError> {
    match request {
        EditRequest::Insert {
            parent_id,
            slot,
            kind,
            label,
        } => try_insert(workflow, ids, parent_id, *slot, *kind, label.as_deref()),
        EditRequest::Delete { node_id } => try_delete(workflow, node_id),
        EditRequest::UpdateLabel { node_id, label } => try_update_label(workflow, node_id, label),
    }
}

/// Applies `request`; a rejected request yields the input unchanged.
pub fn apply(workflow: &Workflow, request: &EditRequest, ids: &mut dyn IdGenerator) -> Workflow {
    try_apply(workflow, request, ids).unwrap_or_else(|err| rejected(workflow, err))
}

fn rejected(workflow: &Workflow, err: EditError) -> Workflow {
    log::debug!("Edit rejected: {}", err);
    workflow.clone()
}
