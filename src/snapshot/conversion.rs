use super::WorkflowSnapshot;
use crate::error::SnapshotError;
use crate::model::{NodeMap, Workflow};

/// Conversion of an external workflow description into a validated [`Workflow`].
///
/// This is the import extension point: implement it for your own format and
/// the result is guaranteed to satisfy every tree invariant, or fail.
///
/// # Example
///
/// ```rust
/// use henshu::prelude::*;
///
/// let json = r#"{
///     "nodes": {
///         "s": { "id": "s", "kind": "start", "label": "Begin", "parentId": null, "children": ["e"] },
///         "e": { "id": "e", "kind": "end", "label": "Done", "parentId": "s", "children": [] }
///     },
///     "rootId": "s"
/// }"#;
///
/// let workflow = WorkflowSnapshot::from_json(json)?.into_workflow()?;
/// assert_eq!(workflow.len(), 2);
/// # Ok::<(), henshu::error::SnapshotError>(())
/// ```
pub trait IntoWorkflow {
    /// Consumes the value and converts it into a workflow.
    fn into_workflow(self) -> Result<Workflow, SnapshotError>;
}

impl IntoWorkflow for WorkflowSnapshot {
    fn into_workflow(self) -> Result<Workflow, SnapshotError> {
        let mut nodes = NodeMap::with_capacity(self.nodes.len());
        for (key, record) in self.nodes {
            if key != record.id {
                return Err(SnapshotError::KeyMismatch { key, id: record.id });
            }
            let node = record.into_node()?;
            nodes.insert(key, node);
        }
        let workflow = Workflow::from_parts(nodes, self.root_id);
        workflow.check_invariants()?;
        Ok(workflow)
    }
}
