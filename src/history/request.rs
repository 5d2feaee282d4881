use crate::model::{Exit, NodeId, NodeKind};
use crate::mutation::EditRequest;
use serde::{Deserialize, Serialize};

/// The five logical requests a caller can send to an editing session.
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "insert", "parentId": "node-1", "slot": null, "kind": "action"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    Insert {
        parent_id: NodeId,
        #[serde(default)]
        slot: Option<Exit>,
        kind: NodeKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Delete {
        node_id: NodeId,
    },
    UpdateLabel {
        node_id: NodeId,
        label: String,
    },
    Undo,
    Redo,
}

impl From<EditRequest> for Request {
    fn from(edit: EditRequest) -> Self {
        match edit {
            EditRequest::Insert {
                parent_id,
                slot,
                kind,
                label,
            } => Request::Insert {
                parent_id,
                slot,
                kind,
                label,
            },
            EditRequest::Delete { node_id } => Request::Delete { node_id },
            EditRequest::UpdateLabel { node_id, label } => Request::UpdateLabel { node_id, label },
        }
    }
}
