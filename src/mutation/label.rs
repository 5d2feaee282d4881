use super::rejected;
use crate::error::EditError;
use crate::model::{NodeId, Workflow};

pub fn update_label(workflow: &Workflow, node_id: &NodeId, label: &str) -> Workflow {
    try_update_label(workflow, node_id, label).unwrap_or_else(|err| rejected(workflow, err))
}

/// Replaces the label of `node_id` with `label` trimmed of surrounding whitespace.
pub fn try_update_label(
    workflow: &Workflow,
    node_id: &NodeId,
    label: &str,
) -> Result<Workflow, EditError> {
    if !workflow.contains(node_id) {
        return Err(EditError::NodeNotFound(node_id.clone()));
    }
    let label = label.trim();
    if label.is_empty() {
        return Err(EditError::EmptyLabel(node_id.clone()));
    }

    let mut draft = workflow.draft();
    draft
        .node_mut(node_id)
        .ok_or_else(|| EditError::NodeNotFound(node_id.clone()))?
        .set_label(label.to_string());
    Ok(draft.commit())
}
