//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the henshu crate.
//!
//! # Example
//!
//! ```rust
//! use henshu::prelude::*;
//!
//! let mut session = History::new();
//! let root = session.present().root_id().clone();
//! assert!(session.insert(&root, None, NodeKind::Action, Some("Send invoice")));
//! assert!(!session.update_label(&root, "   "));
//! assert!(session.can_undo());
//! ```

// Sessions and requests
pub use crate::history::{History, HistoryBuilder, HistoryState, ReplaySummary, Request};
pub use crate::mutation::EditRequest;

// Tree model
pub use crate::model::{
    Exit, Exits, IdGenerator, Node, NodeId, NodeKind, SequentialIds, UuidIds, Workflow,
    derive_children,
};

// Export / import
pub use crate::snapshot::{IntoWorkflow, NodeSnapshot, WorkflowSnapshot};

// Rendering
pub use crate::outline::OutlineFormatter;

// Error types
pub use crate::error::{EditError, InvariantViolation, SnapshotError};
