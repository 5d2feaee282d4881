//! The exported JSON shape of a workflow, and importing it back.
//!
//! ```json
//! {
//!   "nodes": {
//!     "node-1": { "id": "node-1", "kind": "start", "label": "Start",
//!                 "parentId": null, "children": ["node-2"] },
//!     "node-2": { "id": "node-2", "kind": "branch", "label": "In stock?",
//!                 "parentId": "node-1", "children": ["node-3"],
//!                 "exits": { "true": "node-3", "false": null } },
//!     "node-3": { "id": "node-3", "kind": "end", "label": "End",
//!                 "parentId": "node-2", "children": [] }
//!   },
//!   "rootId": "node-1"
//! }
//! ```

use crate::error::SnapshotError;
use crate::model::{Exits, Links, Node, NodeId, NodeKind, Workflow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

mod conversion;

pub use conversion::IntoWorkflow;

/// Serializable form of a whole workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
    pub nodes: BTreeMap<NodeId, NodeSnapshot>,
    pub root_id: NodeId,
}

/// Serializable form of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    pub parent_id: Option<NodeId>,
    #[serde(default)]
    pub children: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exits: Option<Exits>,
}

impl WorkflowSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&Node> for NodeSnapshot {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id().clone(),
            kind: node.kind(),
            label: node.label().to_string(),
            parent_id: node.parent_id().cloned(),
            children: node.children().to_vec(),
            exits: node.exits().cloned(),
        }
    }
}

impl From<&Workflow> for WorkflowSnapshot {
    fn from(workflow: &Workflow) -> Self {
        Self {
            nodes: workflow
                .nodes()
                .map(|node| (node.id().clone(), NodeSnapshot::from(node)))
                .collect(),
            root_id: workflow.root_id().clone(),
        }
    }
}

impl Workflow {
    /// The workflow in its exported shape.
    pub fn export(&self) -> WorkflowSnapshot {
        WorkflowSnapshot::from(self)
    }
}

impl NodeSnapshot {
    /// Rebuilds the node from its outgoing links; the stored `children` must
    /// match what those links derive.
    fn into_node(self) -> Result<Arc<Node>, SnapshotError> {
        if self.label.trim().is_empty() {
            return Err(SnapshotError::BlankLabel(self.id));
        }
        let links = match (self.kind, self.exits) {
            (NodeKind::Branch, Some(exits)) => Links::Branch(exits),
            (NodeKind::Branch, None) => return Err(SnapshotError::MissingExits(self.id)),
            (_, Some(_)) => return Err(SnapshotError::UnexpectedExits(self.id)),
            (NodeKind::End, None) => Links::Terminal,
            (_, None) => Links::Single(self.children.first().cloned()),
        };
        let node = Node::from_parts(
            self.id,
            self.kind,
            Some(&self.label),
            self.parent_id,
            links,
        );
        if node.children() != self.children.as_slice() {
            return Err(SnapshotError::ChildrenMismatch {
                node_id: node.id().clone(),
                stored: self.children,
                derived: node.children().to_vec(),
            });
        }
        Ok(Arc::new(node))
    }
}
