use crate::model::{Exit, NodeId, NodeKind};
use thiserror::Error;

/// Reasons an edit request is rejected by the mutation engine.
///
/// The total API in [`crate::mutation`] turns every one of these into a no-op;
/// the `try_*` variants surface them for callers that want diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Node '{0}' does not exist in the workflow")]
    NodeNotFound(NodeId),

    #[error("Node '{0}' is an end node and has no outgoing slot")]
    NoOutgoingSlot(NodeId),

    #[error("Slot {slot} is not valid on {kind} node '{node_id}'")]
    InvalidSlot {
        node_id: NodeId,
        kind: NodeKind,
        slot: SlotDisplay,
    },

    #[error("A {0} node cannot be inserted; only action, branch and end nodes can")]
    KindNotInsertable(NodeKind),

    #[error("Node '{0}' is the root and cannot be deleted")]
    RootNotDeletable(NodeId),

    #[error("Node '{0}' has no parent")]
    MissingParent(NodeId),

    #[error("Parent '{parent_id}' of node '{node_id}' does not reference it from any slot")]
    BrokenLink { node_id: NodeId, parent_id: NodeId },

    #[error("Label for node '{0}' is empty after trimming")]
    EmptyLabel(NodeId),

    #[error("Id generator kept producing ids already in use (last: '{0}')")]
    IdCollision(NodeId),
}

/// Printable form of an optional slot, so error messages read `true`, `false` or `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotDisplay(pub Option<Exit>);

impl std::fmt::Display for SlotDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(exit) => write!(f, "'{}'", exit),
            None => write!(f, "'none'"),
        }
    }
}

/// A structural invariant that a workflow value fails to uphold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("Root '{0}' is missing from the node map")]
    MissingRoot(NodeId),

    #[error("Root '{0}' is not a start node")]
    RootNotStart(NodeId),

    #[error("Root '{0}' has a parent reference")]
    RootHasParent(NodeId),

    #[error("Node '{0}' is a start node but not the root")]
    ExtraStart(NodeId),

    #[error("Node '{node_id}' references missing child '{child_id}'")]
    DanglingChild { node_id: NodeId, child_id: NodeId },

    #[error("Node '{0}' references a missing or absent parent")]
    DanglingParent(NodeId),

    #[error("Node '{child_id}' is listed as a child of '{listed_by}' but its parent is {parent}")]
    ParentMismatch {
        child_id: NodeId,
        listed_by: NodeId,
        parent: String,
    },

    #[error("Node '{0}' is reachable more than once from the root")]
    SharedChild(NodeId),

    #[error("Node '{0}' is not reachable from the root")]
    Unreachable(NodeId),

    #[error("Node '{node_id}' of kind {kind} has {count} children")]
    FanOut {
        node_id: NodeId,
        kind: NodeKind,
        count: usize,
    },

    #[error("Children of branch node '{0}' are out of sync with its exits")]
    ProjectionMismatch(NodeId),
}

/// Errors raised while importing or exporting a workflow snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to parse snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot entry '{key}' holds node '{id}'")]
    KeyMismatch { key: NodeId, id: NodeId },

    #[error("Node '{0}' is a branch but has no exits")]
    MissingExits(NodeId),

    #[error("Node '{0}' is not a branch but carries exits")]
    UnexpectedExits(NodeId),

    #[error("Node '{0}' has a blank label")]
    BlankLabel(NodeId),

    #[error("Node '{node_id}' lists children {stored:?} but its links derive {derived:?}")]
    ChildrenMismatch {
        node_id: NodeId,
        stored: Vec<NodeId>,
        derived: Vec<NodeId>,
    },

    #[error("Snapshot violates a workflow invariant: {0}")]
    Invariant(#[from] InvariantViolation),
}
