use super::id::{IdGenerator, NodeId};
use crate::error::{EditError, SlotDisplay};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four kinds of workflow steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    Action,
    Branch,
    End,
}

impl NodeKind {
    /// Label used when a node is created without one.
    pub fn default_label(self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::Action => "Action",
            NodeKind::Branch => "Branch",
            NodeKind::End => "End",
        }
    }

    /// Maximum number of successors a node of this kind may have.
    pub fn fan_out(self) -> usize {
        match self {
            NodeKind::Start | NodeKind::Action => 1,
            NodeKind::Branch => 2,
            NodeKind::End => 0,
        }
    }

    pub fn is_branch(self) -> bool {
        self == NodeKind::Branch
    }

    pub fn is_terminal(self) -> bool {
        self == NodeKind::End
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Start => "start",
            NodeKind::Action => "action",
            NodeKind::Branch => "branch",
            NodeKind::End => "end",
        };
        f.write_str(name)
    }
}

/// One of the two labeled exits of a branch node.
///
/// Outgoing slots are addressed as `Option<Exit>`: `None` for single-successor
/// kinds, `Some(exit)` for branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exit {
    #[serde(rename = "true")]
    True,
    #[serde(rename = "false")]
    False,
}

impl Exit {
    /// Both exits in projection order.
    pub const ALL: [Exit; 2] = [Exit::True, Exit::False];
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exit::True => f.write_str("true"),
            Exit::False => f.write_str("false"),
        }
    }
}

/// The two outgoing edges of a branch node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exits {
    #[serde(rename = "true")]
    pub on_true: Option<NodeId>,
    #[serde(rename = "false")]
    pub on_false: Option<NodeId>,
}

impl Exits {
    pub fn get(&self, exit: Exit) -> Option<&NodeId> {
        match exit {
            Exit::True => self.on_true.as_ref(),
            Exit::False => self.on_false.as_ref(),
        }
    }

    fn get_mut(&mut self, exit: Exit) -> &mut Option<NodeId> {
        match exit {
            Exit::True => &mut self.on_true,
            Exit::False => &mut self.on_false,
        }
    }

    /// The exit that points at `child`, checking `true` first.
    pub fn find(&self, child: &NodeId) -> Option<Exit> {
        Exit::ALL
            .into_iter()
            .find(|exit| self.get(*exit) == Some(child))
    }
}

/// Type-specific outgoing edge data. `children` is always derived from this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Links {
    Terminal,
    Single(Option<NodeId>),
    Branch(Exits),
}

impl Links {
    pub(crate) fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Start | NodeKind::Action => Links::Single(None),
            NodeKind::Branch => Links::Branch(Exits::default()),
            NodeKind::End => Links::Terminal,
        }
    }
}

/// One editable step of a workflow.
///
/// Fields are private so the derived `children` can never be written
/// independently of the outgoing links; every write goes through
/// [`Node::set_successor`], which re-derives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    label: String,
    parent_id: Option<NodeId>,
    links: Links,
    children: Vec<NodeId>,
}

impl Node {
    /// Creates a node with a fresh id drawn from `ids`.
    pub fn create(
        ids: &mut dyn IdGenerator,
        kind: NodeKind,
        parent_id: Option<NodeId>,
        label: Option<&str>,
    ) -> Self {
        Self::new(ids.next_id(), kind, parent_id, label)
    }

    /// Creates an unconnected node. A missing or blank label falls back to the kind's default.
    pub fn new(id: NodeId, kind: NodeKind, parent_id: Option<NodeId>, label: Option<&str>) -> Self {
        Self::from_parts(id, kind, label, parent_id, Links::empty(kind))
    }

    pub(crate) fn from_parts(
        id: NodeId,
        kind: NodeKind,
        label: Option<&str>,
        parent_id: Option<NodeId>,
        links: Links,
    ) -> Self {
        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(kind.default_label())
            .to_string();
        let mut node = Self {
            id,
            kind,
            label,
            parent_id,
            links,
            children: Vec::new(),
        };
        node.children = derive_children(&node);
        node
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent_id(&self) -> Option<&NodeId> {
        self.parent_id.as_ref()
    }

    /// Successor ids in order; for branches, the `true` exit comes first.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Exit mapping; `Some` only for branch nodes.
    pub fn exits(&self) -> Option<&Exits> {
        match &self.links {
            Links::Branch(exits) => Some(exits),
            _ => None,
        }
    }

    /// Whether `slot` addresses an outgoing position on this node.
    pub fn accepts_slot(&self, slot: Option<Exit>) -> bool {
        matches!(
            (&self.links, slot),
            (Links::Single(_), None) | (Links::Branch(_), Some(_))
        )
    }

    /// Current successor at `slot`, or `None` when empty or the slot does not apply.
    pub fn successor(&self, slot: Option<Exit>) -> Option<&NodeId> {
        match (&self.links, slot) {
            (Links::Single(next), None) => next.as_ref(),
            (Links::Branch(exits), Some(exit)) => exits.get(exit),
            _ => None,
        }
    }

    /// Points `slot` at `child` and re-derives `children`. Returns the previous successor.
    pub fn set_successor(
        &mut self,
        slot: Option<Exit>,
        child: Option<NodeId>,
    ) -> Result<Option<NodeId>, EditError> {
        let previous = match (&mut self.links, slot) {
            (Links::Single(next), None) => std::mem::replace(next, child),
            (Links::Branch(exits), Some(exit)) => std::mem::replace(exits.get_mut(exit), child),
            (Links::Terminal, _) => return Err(EditError::NoOutgoingSlot(self.id.clone())),
            _ => {
                return Err(EditError::InvalidSlot {
                    node_id: self.id.clone(),
                    kind: self.kind,
                    slot: SlotDisplay(slot),
                });
            }
        };
        self.children = derive_children(self);
        Ok(previous)
    }

    /// The slot through which this node reaches `child`, if any.
    pub fn slot_of(&self, child: &NodeId) -> Option<Option<Exit>> {
        match &self.links {
            Links::Single(Some(next)) if next == child => Some(None),
            Links::Branch(exits) => exits.find(child).map(Some),
            _ => None,
        }
    }

    pub(crate) fn set_parent(&mut self, parent_id: Option<NodeId>) {
        self.parent_id = parent_id;
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }
}

/// Projects a node's outgoing links onto its ordered child list.
///
/// Branch nodes yield the present exits, `true` before `false`; single-slot
/// nodes yield their successor if any; end nodes yield nothing.
pub fn derive_children(node: &Node) -> Vec<NodeId> {
    match &node.links {
        Links::Terminal => Vec::new(),
        Links::Single(next) => next.iter().cloned().collect(),
        Links::Branch(exits) => Exit::ALL
            .into_iter()
            .filter_map(|exit| exits.get(exit).cloned())
            .collect(),
    }
}
