//! Tests for the structural edit operations of the mutation engine.
mod common;
use common::*;
use henshu::mutation::{self, EditRequest};
use henshu::prelude::*;

fn create_workflow() -> (Workflow, SequentialIds) {
    let mut ids = SequentialIds::new("w");
    let workflow = Workflow::new(&mut ids);
    (workflow, ids)
}

#[test]
fn test_new_workflow_has_single_start_root() {
    let (workflow, _) = create_workflow();
    assert_eq!(workflow.len(), 1);
    let root = workflow.root().unwrap();
    assert_eq!(root.kind(), NodeKind::Start);
    assert_eq!(root.label(), "Start");
    assert!(root.parent_id().is_none());
    assert!(root.children().is_empty());
    assert_valid_tree(&workflow);
}

#[test]
fn test_insert_into_empty_slot() {
    let (workflow, mut ids) = create_workflow();
    let root = workflow.root_id().clone();

    let next = mutation::insert(&workflow, &mut ids, &root, None, NodeKind::Action, None);
    let child = only_child(&next, &root);
    let node = next.node(&child).unwrap();
    assert_eq!(node.kind(), NodeKind::Action);
    assert_eq!(node.label(), "Action");
    assert_eq!(node.parent_id(), Some(&root));
    assert!(node.children().is_empty());
    assert_valid_tree(&next);
}

#[test]
fn test_insert_splices_action_before_existing_child() {
    let (workflow, mut ids) = create_workflow();
    let root = workflow.root_id().clone();
    let workflow = mutation::insert(&workflow, &mut ids, &root, None, NodeKind::End, None);
    let end = only_child(&workflow, &root);

    let next = mutation::insert(&workflow, &mut ids, &root, None, NodeKind::Action, None);

    let action = only_child(&next, &root);
    assert_ne!(action, end);
    assert_eq!(only_child(&next, &action), end);
    assert_eq!(next.node(&end).unwrap().parent_id(), Some(&action));
    assert_valid_tree(&next);
}

#[test]
fn test_insert_branch_keeps_prior_child_on_true_exit() {
    let chain = create_chain();
    let present = chain.session.present().clone();
    let mut ids = SequentialIds::new("b");

    let next = mutation::insert(
        &present,
        &mut ids,
        &chain.start,
        None,
        NodeKind::Branch,
        Some("Paid?"),
    );

    let branch_id = only_child(&next, &chain.start);
    let branch = next.node(&branch_id).unwrap();
    assert_eq!(branch.label(), "Paid?");
    let exits = branch.exits().unwrap();
    assert_eq!(exits.on_true.as_ref(), Some(&chain.action));
    assert_eq!(exits.on_false, None);
    assert_eq!(branch.children(), &[chain.action.clone()]);
    assert_eq!(next.node(&chain.action).unwrap().parent_id(), Some(&branch_id));
    assert_valid_tree(&next);
}

#[test]
fn test_insert_end_before_chain_prunes_downstream() {
    let chain = create_chain();
    let present = chain.session.present().clone();
    let mut ids = SequentialIds::new("e");

    let next = mutation::insert(&present, &mut ids, &chain.start, None, NodeKind::End, None);

    let new_end = only_child(&next, &chain.start);
    assert_eq!(next.node(&new_end).unwrap().kind(), NodeKind::End);
    assert!(!next.contains(&chain.action));
    assert!(!next.contains(&chain.end));
    assert_eq!(next.len(), 2);
    assert_valid_tree(&next);
}

#[test]
fn test_insert_on_branch_exit_splices_within_that_exit() {
    let tree = create_branch_tree();
    let present = tree.session.present().clone();
    let mut ids = SequentialIds::new("x");

    let next = mutation::insert(
        &present,
        &mut ids,
        &tree.branch,
        Some(Exit::False),
        NodeKind::Action,
        Some("Log"),
    );

    let exits = next.node(&tree.branch).unwrap().exits().unwrap().clone();
    assert_eq!(exits.on_true.as_ref(), Some(&tree.on_true));
    let inserted = exits.on_false.unwrap();
    assert_eq!(only_child(&next, &inserted), tree.on_false);
    assert_valid_tree(&next);
}

#[test]
fn test_insert_rejections_leave_workflow_untouched() {
    let chain = create_chain();
    let tree = create_branch_tree();
    let mut ids = SequentialIds::new("r");
    let chain_wf = chain.session.present();
    let tree_wf = tree.session.present();

    let cases: Vec<(&Workflow, NodeId, Option<Exit>, NodeKind)> = vec![
        (chain_wf, NodeId::new("missing"), None, NodeKind::Action),
        (chain_wf, chain.end.clone(), None, NodeKind::Action),
        (chain_wf, chain.action.clone(), Some(Exit::True), NodeKind::Action),
        (chain_wf, chain.start.clone(), None, NodeKind::Start),
        (tree_wf, tree.branch.clone(), None, NodeKind::Action),
    ];

    for (workflow, parent, slot, kind) in cases {
        let next = mutation::insert(workflow, &mut ids, &parent, slot, kind, None);
        assert!(
            Workflow::ptr_eq(workflow, &next),
            "insert under '{}' should be a no-op",
            parent
        );
    }
}

#[test]
fn test_try_insert_reports_reason() {
    let chain = create_chain();
    let workflow = chain.session.present();
    let mut ids = SequentialIds::new("r");

    let err = mutation::try_insert(workflow, &mut ids, &chain.end, None, NodeKind::Action, None)
        .unwrap_err();
    assert_eq!(err, EditError::NoOutgoingSlot(chain.end.clone()));

    let err = mutation::try_insert(
        workflow,
        &mut ids,
        &chain.start,
        Some(Exit::False),
        NodeKind::Action,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, EditError::InvalidSlot { kind: NodeKind::Start, .. }));

    let err = mutation::try_insert(workflow, &mut ids, &chain.start, None, NodeKind::Start, None)
        .unwrap_err();
    assert_eq!(err, EditError::KindNotInsertable(NodeKind::Start));
}

#[test]
fn test_insert_skips_ids_already_in_use() {
    let (workflow, _) = create_workflow();
    let root = workflow.root_id().clone();
    // A generator restarted from scratch would hand out the root's id first.
    let mut ids = SequentialIds::new("w");

    let next = mutation::insert(&workflow, &mut ids, &root, None, NodeKind::Action, None);
    assert_eq!(only_child(&next, &root), NodeId::new("w-2"));
    assert_valid_tree(&next);
}

#[test]
fn test_insert_gives_up_on_a_stuck_generator() {
    let (workflow, _) = create_workflow();
    let root = workflow.root_id().clone();
    let mut ids = || NodeId::new("w-1");

    let result = mutation::try_insert(&workflow, &mut ids, &root, None, NodeKind::Action, None);
    assert_eq!(result.unwrap_err(), EditError::IdCollision(NodeId::new("w-1")));
}

#[test]
fn test_delete_reconnects_parent_to_child() {
    let chain = create_chain();
    let next = mutation::delete(chain.session.present(), &chain.action);

    assert!(!next.contains(&chain.action));
    assert_eq!(only_child(&next, &chain.start), chain.end);
    assert_eq!(next.node(&chain.end).unwrap().parent_id(), Some(&chain.start));
    assert_valid_tree(&next);
}

#[test]
fn test_delete_branch_prunes_false_subtree() {
    let tree = create_branch_tree();
    let next = mutation::delete(tree.session.present(), &tree.branch);

    assert_eq!(only_child(&next, &tree.start), tree.on_true);
    assert_eq!(next.node(&tree.on_true).unwrap().parent_id(), Some(&tree.start));
    for gone in [&tree.branch, &tree.on_false, &tree.below_false] {
        assert!(!next.contains(gone), "'{}' should have been removed", gone);
    }
    assert_eq!(next.len(), 2);
    assert_valid_tree(&next);
}

#[test]
fn test_delete_branch_with_only_false_exit_promotes_it() {
    let tree = create_branch_tree();
    let without_true = mutation::delete(tree.session.present(), &tree.on_true);
    let exits = without_true.node(&tree.branch).unwrap().exits().unwrap();
    assert_eq!(exits.on_true, None);
    assert_valid_tree(&without_true);

    let next = mutation::delete(&without_true, &tree.branch);
    assert_eq!(only_child(&next, &tree.start), tree.on_false);
    assert!(next.contains(&tree.below_false));
    assert_eq!(next.len(), 3);
    assert_valid_tree(&next);
}

#[test]
fn test_delete_node_inside_branch_exit_rewires_that_exit() {
    let tree = create_branch_tree();
    let next = mutation::delete(tree.session.present(), &tree.on_false);

    let exits = next.node(&tree.branch).unwrap().exits().unwrap();
    assert_eq!(exits.on_false.as_ref(), Some(&tree.below_false));
    assert_eq!(
        next.node(&tree.below_false).unwrap().parent_id(),
        Some(&tree.branch)
    );
    assert_valid_tree(&next);
}

#[test]
fn test_delete_leaf_empties_parent_slot() {
    let chain = create_chain();
    let next = mutation::delete(chain.session.present(), &chain.end);

    assert!(next.node(&chain.action).unwrap().children().is_empty());
    assert_eq!(next.len(), 2);
    assert_valid_tree(&next);
}

#[test]
fn test_delete_rejections() {
    let chain = create_chain();
    let workflow = chain.session.present();

    assert_eq!(
        mutation::try_delete(workflow, &chain.start).unwrap_err(),
        EditError::RootNotDeletable(chain.start.clone())
    );
    assert_eq!(
        mutation::try_delete(workflow, &NodeId::new("ghost")).unwrap_err(),
        EditError::NodeNotFound(NodeId::new("ghost"))
    );
    assert!(Workflow::ptr_eq(
        workflow,
        &mutation::delete(workflow, &chain.start)
    ));
}

#[test]
fn test_update_label_trims_and_replaces() {
    let chain = create_chain();
    let next = mutation::update_label(chain.session.present(), &chain.action, "  Email receipt \n");
    assert_eq!(next.node(&chain.action).unwrap().label(), "Email receipt");
    assert_eq!(
        chain.session.present().node(&chain.action).unwrap().label(),
        "Send invoice"
    );
}

#[test]
fn test_update_label_rejects_blank_and_unknown() {
    let chain = create_chain();
    let workflow = chain.session.present();

    for blank in ["", "   ", "\t\n"] {
        let next = mutation::update_label(workflow, &chain.action, blank);
        assert!(Workflow::ptr_eq(workflow, &next));
    }
    assert_eq!(
        mutation::try_update_label(workflow, &chain.action, " ").unwrap_err(),
        EditError::EmptyLabel(chain.action.clone())
    );
    assert_eq!(
        mutation::try_update_label(workflow, &NodeId::new("ghost"), "Hi").unwrap_err(),
        EditError::NodeNotFound(NodeId::new("ghost"))
    );
}

#[test]
fn test_edits_never_touch_the_input_snapshot() {
    let tree = create_branch_tree();
    let before = tree.session.present().clone();
    let export_before = before.export();

    let mut ids = SequentialIds::new("p");
    let edited = mutation::delete(&before, &tree.branch);
    let edited = mutation::insert(&edited, &mut ids, &tree.start, None, NodeKind::End, None);
    let edited = mutation::update_label(&edited, &tree.start, "Begin");

    assert_ne!(edited, before);
    assert_eq!(before.export(), export_before);
    assert_valid_tree(&before);
}

#[test]
fn test_apply_dispatches_edit_requests() {
    let chain = create_chain();
    let mut ids = SequentialIds::new("a");
    let workflow = chain.session.present();

    let renamed = mutation::apply(
        workflow,
        &EditRequest::UpdateLabel {
            node_id: chain.end.clone(),
            label: "Finish".to_string(),
        },
        &mut ids,
    );
    assert_eq!(renamed.node(&chain.end).unwrap().label(), "Finish");

    let deleted = mutation::try_apply(
        &renamed,
        &EditRequest::Delete {
            node_id: chain.action.clone(),
        },
        &mut ids,
    )
    .unwrap();
    assert_eq!(only_child(&deleted, &chain.start), chain.end);
}
