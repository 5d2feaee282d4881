//! Common test utilities for building workflows and checking their shape.
use henshu::prelude::*;

/// Creates an empty session (single start node) with deterministic `n-N` ids.
#[allow(dead_code)]
pub fn create_session() -> History {
    History::builder()
        .id_generator(SequentialIds::new("n"))
        .build()
}

/// Returns the single child of `id`, panicking if there is not exactly one.
#[allow(dead_code)]
pub fn only_child(workflow: &Workflow, id: &NodeId) -> NodeId {
    let node = workflow.node(id).expect("node should exist");
    assert_eq!(
        node.children().len(),
        1,
        "expected '{}' to have exactly one child",
        id
    );
    node.children()[0].clone()
}

/// A linear `start -> action -> end` workflow.
#[allow(dead_code)]
pub struct Chain {
    pub session: History,
    pub start: NodeId,
    pub action: NodeId,
    pub end: NodeId,
}

/// Builds `start -> "Send invoice" -> end` by inserting the end first and
/// splicing the action in front of it.
#[allow(dead_code)]
pub fn create_chain() -> Chain {
    let mut session = create_session();
    let start = session.present().root_id().clone();
    assert!(session.insert(&start, None, NodeKind::End, None));
    let end = only_child(session.present(), &start);
    assert!(session.insert(&start, None, NodeKind::Action, Some("Send invoice")));
    let action = only_child(session.present(), &start);
    Chain {
        session,
        start,
        action,
        end,
    }
}

/// A workflow with a branch directly under the start node:
///
/// ```text
/// start -> branch
///            true:  on_true (action)
///            false: on_false (action) -> below_false (end)
/// ```
#[allow(dead_code)]
pub struct BranchTree {
    pub session: History,
    pub start: NodeId,
    pub branch: NodeId,
    pub on_true: NodeId,
    pub on_false: NodeId,
    pub below_false: NodeId,
}

#[allow(dead_code)]
pub fn create_branch_tree() -> BranchTree {
    let mut session = create_session();
    let start = session.present().root_id().clone();

    assert!(session.insert(&start, None, NodeKind::Branch, Some("In stock?")));
    let branch = only_child(session.present(), &start);

    assert!(session.insert(&branch, Some(Exit::True), NodeKind::Action, Some("Ship")));
    assert!(session.insert(&branch, Some(Exit::False), NodeKind::Action, Some("Reorder")));
    let exits = session
        .present()
        .node(&branch)
        .and_then(Node::exits)
        .cloned()
        .expect("branch should have exits");
    let on_true = exits.on_true.expect("true exit should be set");
    let on_false = exits.on_false.expect("false exit should be set");

    assert!(session.insert(&on_false, None, NodeKind::End, Some("Wait")));
    let below_false = only_child(session.present(), &on_false);

    BranchTree {
        session,
        start,
        branch,
        on_true,
        on_false,
        below_false,
    }
}

/// Asserts every structural invariant plus full reachability.
#[allow(dead_code)]
pub fn assert_valid_tree(workflow: &Workflow) {
    if let Err(violation) = workflow.check_invariants() {
        panic!(
            "workflow violates an invariant: {}\n{}",
            violation,
            workflow.outline()
        );
    }
    assert_eq!(
        workflow.reachable_from(workflow.root_id()).len(),
        workflow.len(),
        "every node should be reachable from the root"
    );
    for node in workflow.nodes() {
        assert_eq!(derive_children(node), node.children());
    }
}
