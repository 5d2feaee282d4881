use super::id::{IdGenerator, NodeId};
use super::node::{Node, NodeKind, derive_children};
use crate::error::InvariantViolation;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::sync::Arc;

/// The arena: id-keyed node storage with per-entry sharing between snapshots.
pub(crate) type NodeMap = AHashMap<NodeId, Arc<Node>>;

/// An immutable snapshot of a workflow tree.
///
/// Cloning is cheap: the node map is shared, and edits copy only the entries
/// they touch (see [`Draft`]). A value is never mutated once built, so older
/// snapshots stay valid for undo.
#[derive(Debug, Clone)]
pub struct Workflow {
    nodes: Arc<NodeMap>,
    root_id: NodeId,
}

impl Workflow {
    /// Creates a workflow holding a single `start` node as its root.
    pub fn new(ids: &mut dyn IdGenerator) -> Self {
        let root = Node::create(ids, NodeKind::Start, None, None);
        let root_id = root.id().clone();
        let mut nodes = NodeMap::new();
        nodes.insert(root_id.clone(), Arc::new(root));
        Self::from_parts(nodes, root_id)
    }

    pub(crate) fn from_parts(nodes: NodeMap, root_id: NodeId) -> Self {
        Self {
            nodes: Arc::new(nodes),
            root_id,
        }
    }

    pub fn root_id(&self) -> &NodeId {
        &self.root_id
    }

    pub fn root(&self) -> Option<&Node> {
        self.node(&self.root_id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().map(Arc::as_ref)
    }

    /// True when both values share the same node storage, i.e. one is an
    /// unchanged copy of the other.
    pub fn ptr_eq(a: &Workflow, b: &Workflow) -> bool {
        Arc::ptr_eq(&a.nodes, &b.nodes) && a.root_id == b.root_id
    }

    /// Ids reachable from `start` by following `children`, in pre-order.
    pub fn reachable_from(&self, start: &NodeId) -> Vec<NodeId> {
        collect_subtree(&self.nodes, start)
    }

    /// Checks every structural invariant of the tree.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let root = self
            .root()
            .ok_or_else(|| InvariantViolation::MissingRoot(self.root_id.clone()))?;
        if root.kind() != NodeKind::Start {
            return Err(InvariantViolation::RootNotStart(self.root_id.clone()));
        }
        if root.parent_id().is_some() {
            return Err(InvariantViolation::RootHasParent(self.root_id.clone()));
        }

        for id in self.nodes.keys().sorted() {
            let node = &self.nodes[id];
            if node.kind() == NodeKind::Start && *id != self.root_id {
                return Err(InvariantViolation::ExtraStart(id.clone()));
            }
            if node.children().len() > node.kind().fan_out() {
                return Err(InvariantViolation::FanOut {
                    node_id: id.clone(),
                    kind: node.kind(),
                    count: node.children().len(),
                });
            }
            if derive_children(node) != node.children() {
                return Err(InvariantViolation::ProjectionMismatch(id.clone()));
            }
            if *id != self.root_id {
                let has_parent = node.parent_id().is_some_and(|p| self.contains(p));
                if !has_parent {
                    return Err(InvariantViolation::DanglingParent(id.clone()));
                }
            }
            for child_id in node.children() {
                let child = self.node(child_id).ok_or_else(|| {
                    InvariantViolation::DanglingChild {
                        node_id: id.clone(),
                        child_id: child_id.clone(),
                    }
                })?;
                if child.parent_id() != Some(id) {
                    return Err(InvariantViolation::ParentMismatch {
                        child_id: child_id.clone(),
                        listed_by: id.clone(),
                        parent: child
                            .parent_id()
                            .map_or("absent".to_string(), |p| format!("'{}'", p)),
                    });
                }
            }
        }

        let mut seen = AHashSet::with_capacity(self.nodes.len());
        let mut stack = vec![self.root_id.clone()];
        while let Some(id) = stack.pop() {
            if !seen.insert(id.clone()) {
                return Err(InvariantViolation::SharedChild(id));
            }
            if let Some(node) = self.node(&id) {
                stack.extend(node.children().iter().rev().cloned());
            }
        }
        if let Some(orphan) = self.nodes.keys().filter(|id| !seen.contains(*id)).min() {
            return Err(InvariantViolation::Unreachable(orphan.clone()));
        }

        Ok(())
    }

    pub(crate) fn draft(&self) -> Draft {
        Draft {
            nodes: self.nodes.as_ref().clone(),
            root_id: self.root_id.clone(),
        }
    }
}

impl PartialEq for Workflow {
    fn eq(&self, other: &Self) -> bool {
        self.root_id == other.root_id
            && (Arc::ptr_eq(&self.nodes, &other.nodes) || self.nodes == other.nodes)
    }
}

impl Eq for Workflow {}

/// A private, writable copy of a workflow's node map.
///
/// Entries are shared with the source snapshot until first written.
pub(crate) struct Draft {
    nodes: NodeMap,
    root_id: NodeId,
}

impl Draft {
    pub(crate) fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id).map(Arc::make_mut)
    }

    pub(crate) fn insert(&mut self, node: Node) {
        self.nodes.insert(node.id().clone(), Arc::new(node));
    }

    pub(crate) fn remove(&mut self, id: &NodeId) -> Option<Arc<Node>> {
        self.nodes.remove(id)
    }

    /// Removes `root` and everything reachable from it. Returns the removed ids.
    pub(crate) fn remove_subtree(&mut self, root: &NodeId) -> Vec<NodeId> {
        let doomed = collect_subtree(&self.nodes, root);
        for id in &doomed {
            self.nodes.remove(id);
        }
        doomed
    }

    pub(crate) fn commit(self) -> Workflow {
        Workflow::from_parts(self.nodes, self.root_id)
    }
}

/// Exhaustive id walk from `start` over `children`. Missing ids are skipped and
/// each id is visited at most once.
fn collect_subtree(nodes: &NodeMap, start: &NodeId) -> Vec<NodeId> {
    let mut seen = AHashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![start.clone()];
    while let Some(id) = stack.pop() {
        let Some(node) = nodes.get(&id) else {
            continue;
        };
        if !seen.insert(id.clone()) {
            continue;
        }
        stack.extend(node.children().iter().rev().cloned());
        order.push(id);
    }
    order
}
