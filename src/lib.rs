//! # Henshu - Workflow Tree Mutation Engine
//!
//! **Henshu** is the editing core of a workflow designer. A workflow is a rooted,
//! ordered tree of typed steps (`start`, `action`, `branch`, `end`) connected by
//! labeled edges. Henshu provides the tree model, structural edits that keep the
//! tree valid, and a linear undo/redo history on top of them.
//!
//! ## Core Workflow
//!
//! 1.  **Open a session**: `History::new()` (or `History::builder()`) seeds a workflow
//!     with a single `start` node.
//! 2.  **Edit**: `insert`, `delete` and `update_label` run through the mutation engine.
//!     Every edit produces a new immutable [`model::Workflow`]; rejected requests leave
//!     the session untouched and return `false`.
//! 3.  **Undo / Redo**: restore earlier snapshots. Any new edit clears the redo stack.
//! 4.  **Export**: `export()` yields the JSON-shaped snapshot consumed by persistence
//!     or logging layers.
//!
//! ## Invariants
//!
//! Before and after every edit:
//!
//! * every node is reachable from the root, and no node has two parents;
//! * every non-root node's parent exists and lists it as a successor;
//! * the root is the only `start` node;
//! * `start`/`action` have at most one successor, `end` none, and a branch's
//!   `children` is always its `true` exit followed by its `false` exit.
//!
//! ## Quick Start
//!
//! ```rust
//! use henshu::prelude::*;
//!
//! let mut session = History::builder()
//!     .id_generator(SequentialIds::new("node"))
//!     .build();
//! let start = session.present().root_id().clone();
//!
//! // start -> end
//! session.insert(&start, None, NodeKind::End, Some("Done"));
//! // start -> check -> end: the branch is spliced in front of the end node
//! session.insert(&start, None, NodeKind::Branch, Some("In stock?"));
//!
//! let branch_id = session.present().root().unwrap().children()[0].clone();
//! let branch = session.present().node(&branch_id).unwrap();
//! assert_eq!(branch.kind(), NodeKind::Branch);
//! assert_eq!(branch.children().len(), 1);
//!
//! // Deleting the branch reconnects start straight to its `true` successor.
//! session.delete(&branch_id);
//! assert_eq!(session.present().len(), 2);
//!
//! session.undo();
//! assert!(session.present().contains(&branch_id));
//! assert!(session.can_redo());
//!
//! println!("{}", session.export().to_json_pretty().unwrap());
//! ```

pub mod error;
pub mod history;
pub mod model;
pub mod mutation;
pub mod outline;
pub mod prelude;
pub mod snapshot;
