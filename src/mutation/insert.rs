use super::rejected;
use crate::error::{EditError, SlotDisplay};
use crate::model::{Exit, IdGenerator, Node, NodeId, NodeKind, Workflow};

/// How many generated ids may collide with existing nodes before giving up.
const MAX_ID_ATTEMPTS: usize = 16;

/// Inserts a new node of `kind` at `slot` of `parent_id`. See [`try_insert`].
pub fn insert(
    workflow: &Workflow,
    ids: &mut dyn IdGenerator,
    parent_id: &NodeId,
    slot: Option<Exit>,
    kind: NodeKind,
    label: Option<&str>,
) -> Workflow {
    try_insert(workflow, ids, parent_id, slot, kind, label)
        .unwrap_or_else(|err| rejected(workflow, err))
}

/// Inserts a new node of `kind` at `slot` of `parent_id`.
///
/// If the slot already has a successor, the new node is spliced in front of
/// it: an action takes it as its single successor, a branch takes it on its
/// `true` exit. An `end` node has nowhere to hold it, so the displaced
/// subtree is removed from the workflow along with it.
pub fn try_insert(
    workflow: &Workflow,
    ids: &mut dyn IdGenerator,
    parent_id: &NodeId,
    slot: Option<Exit>,
    kind: NodeKind,
    label: Option<&str>,
) -> Result<Workflow, EditError> {
    if kind == NodeKind::Start {
        return Err(EditError::KindNotInsertable(kind));
    }
    let parent = workflow
        .node(parent_id)
        .ok_or_else(|| EditError::NodeNotFound(parent_id.clone()))?;
    if parent.kind().is_terminal() {
        return Err(EditError::NoOutgoingSlot(parent_id.clone()));
    }
    if !parent.accepts_slot(slot) {
        return Err(EditError::InvalidSlot {
            node_id: parent_id.clone(),
            kind: parent.kind(),
            slot: SlotDisplay(slot),
        });
    }

    let existing = parent.successor(slot).cloned();
    let new_id = fresh_id(workflow, ids)?;
    let mut node = Node::new(new_id.clone(), kind, Some(parent_id.clone()), label);
    let mut draft = workflow.draft();

    if let Some(child_id) = existing {
        let splice_slot = match kind {
            NodeKind::Branch => Some(Some(Exit::True)),
            NodeKind::Action => Some(None),
            _ => None,
        };
        match splice_slot {
            Some(splice_slot) => {
                node.set_successor(splice_slot, Some(child_id.clone()))?;
                draft
                    .node_mut(&child_id)
                    .ok_or_else(|| EditError::NodeNotFound(child_id.clone()))?
                    .set_parent(Some(new_id.clone()));
            }
            None => {
                let pruned = draft.remove_subtree(&child_id);
                log::debug!(
                    "Inserting {} node '{}' before '{}' pruned {} unreachable node(s)",
                    kind,
                    new_id,
                    child_id,
                    pruned.len()
                );
            }
        }
    }

    draft
        .node_mut(parent_id)
        .ok_or_else(|| EditError::NodeNotFound(parent_id.clone()))?
        .set_successor(slot, Some(new_id))?;
    draft.insert(node);
    Ok(draft.commit())
}

fn fresh_id(workflow: &Workflow, ids: &mut dyn IdGenerator) -> Result<NodeId, EditError> {
    let mut last = ids.next_id();
    for _ in 1..MAX_ID_ATTEMPTS {
        if !workflow.contains(&last) {
            return Ok(last);
        }
        log::debug!("Generated id '{}' is already taken, drawing another", last);
        last = ids.next_id();
    }
    if workflow.contains(&last) {
        Err(EditError::IdCollision(last))
    } else {
        Ok(last)
    }
}
