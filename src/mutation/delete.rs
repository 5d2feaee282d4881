use super::rejected;
use crate::error::EditError;
use crate::model::{Exit, Node, NodeId, NodeKind, Workflow};

/// Deletes `node_id`, reconnecting its parent to one of its successors. See [`try_delete`].
pub fn delete(workflow: &Workflow, node_id: &NodeId) -> Workflow {
    try_delete(workflow, node_id).unwrap_or_else(|err| rejected(workflow, err))
}

/// Deletes `node_id` and re-threads the tree around it.
///
/// The parent's slot is pointed at the node's reconnect successor: the `true`
/// exit of a branch if set, otherwise its `false` exit, otherwise its only
/// child. A branch exit that is not promoted roots a subtree nobody can reach
/// any more; that subtree is removed together with the node.
///
/// A parent whose slots do not reference the node indicates a corrupted
/// workflow; the request is rejected rather than guessing a slot.
pub fn try_delete(workflow: &Workflow, node_id: &NodeId) -> Result<Workflow, EditError> {
    let node = workflow
        .node(node_id)
        .ok_or_else(|| EditError::NodeNotFound(node_id.clone()))?;
    if node_id == workflow.root_id() || node.kind() == NodeKind::Start {
        return Err(EditError::RootNotDeletable(node_id.clone()));
    }
    let parent_id = node
        .parent_id()
        .filter(|id| workflow.contains(id))
        .cloned()
        .ok_or_else(|| EditError::MissingParent(node_id.clone()))?;
    let slot = workflow
        .node(&parent_id)
        .and_then(|parent| parent.slot_of(node_id))
        .ok_or_else(|| {
            log::warn!(
                "Parent '{}' does not link to '{}'; refusing to delete",
                parent_id,
                node_id
            );
            EditError::BrokenLink {
                node_id: node_id.clone(),
                parent_id: parent_id.clone(),
            }
        })?;

    let (reconnect, orphan) = reconnect_plan(node);
    let mut draft = workflow.draft();

    draft
        .node_mut(&parent_id)
        .ok_or_else(|| EditError::NodeNotFound(parent_id.clone()))?
        .set_successor(slot, reconnect.clone())?;
    if let Some(successor_id) = &reconnect {
        draft
            .node_mut(successor_id)
            .ok_or_else(|| EditError::NodeNotFound(successor_id.clone()))?
            .set_parent(Some(parent_id.clone()));
    }
    if let Some(orphan_id) = &orphan {
        let pruned = draft.remove_subtree(orphan_id);
        log::debug!(
            "Deleting '{}' pruned {} node(s) under '{}'",
            node_id,
            pruned.len(),
            orphan_id
        );
    }
    draft.remove(node_id);
    Ok(draft.commit())
}

/// Picks the successor promoted into the deleted node's place, and the exit
/// subtree (if any) left without a parent.
fn reconnect_plan(node: &Node) -> (Option<NodeId>, Option<NodeId>) {
    match node.exits() {
        Some(exits) => match exits.get(Exit::True) {
            Some(on_true) => (Some(on_true.clone()), exits.get(Exit::False).cloned()),
            None => (exits.get(Exit::False).cloned(), None),
        },
        None => (node.children().first().cloned(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeMap;
    use std::sync::Arc;

    /// `s -> b`, plus a node `c` that claims `b` as parent but is not linked from it.
    fn corrupted_workflow() -> Workflow {
        let (s, b, c) = (NodeId::from("s"), NodeId::from("b"), NodeId::from("c"));
        let mut start = Node::new(s.clone(), NodeKind::Start, None, None);
        start.set_successor(None, Some(b.clone())).unwrap();
        let branch = Node::new(b.clone(), NodeKind::Branch, Some(s.clone()), None);
        let stray = Node::new(c, NodeKind::Action, Some(b), None);

        let mut nodes = NodeMap::new();
        for node in [start, branch, stray] {
            nodes.insert(node.id().clone(), Arc::new(node));
        }
        Workflow::from_parts(nodes, s)
    }

    #[test]
    fn unlinked_child_is_not_deleted() {
        let workflow = corrupted_workflow();
        let stray = NodeId::from("c");

        assert_eq!(
            try_delete(&workflow, &stray).unwrap_err(),
            EditError::BrokenLink {
                node_id: stray.clone(),
                parent_id: NodeId::from("b"),
            }
        );
        assert!(Workflow::ptr_eq(&workflow, &delete(&workflow, &stray)));
    }

    #[test]
    fn reconnect_prefers_true_exit() {
        let mut branch = Node::new(NodeId::from("b"), NodeKind::Branch, None, None);
        branch
            .set_successor(Some(Exit::True), Some(NodeId::from("t")))
            .unwrap();
        branch
            .set_successor(Some(Exit::False), Some(NodeId::from("f")))
            .unwrap();
        assert_eq!(
            reconnect_plan(&branch),
            (Some(NodeId::from("t")), Some(NodeId::from("f")))
        );

        branch.set_successor(Some(Exit::True), None).unwrap();
        assert_eq!(reconnect_plan(&branch), (Some(NodeId::from("f")), None));
    }
}
