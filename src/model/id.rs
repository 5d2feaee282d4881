use super::workflow::Workflow;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a node, stable for the node's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Source of fresh node ids.
///
/// A generator is owned by an editing session and is never rewound, so ids stay
/// unique for the whole session even across undo/redo.
pub trait IdGenerator {
    fn next_id(&mut self) -> NodeId;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> NodeId,
{
    fn next_id(&mut self) -> NodeId {
        self()
    }
}

/// Random v4 UUIDs. The default generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> NodeId {
        NodeId(Uuid::new_v4().to_string())
    }
}

/// Deterministic `prefix-N` ids with a monotonically increasing counter.
///
/// Once the counter is exhausted the last number is folded into the prefix and
/// counting restarts at 1 (`n-18446744073709551615-1`), so ids never repeat.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, next: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next,
        }
    }

    /// Continues numbering after the highest `prefix-N` id already in `workflow`,
    /// so a session opened on an imported workflow does not reuse its ids.
    pub fn continuing(prefix: impl Into<String>, workflow: &Workflow) -> Self {
        let prefix = prefix.into();
        let marker = format!("{}-", prefix);
        let highest = workflow
            .nodes()
            .filter_map(|node| node.id().as_str().strip_prefix(marker.as_str()))
            .filter_map(|n| n.parse::<u64>().ok())
            .max();
        match highest {
            None => Self::new(prefix),
            Some(n) => {
                let mut ids = Self::starting_at(prefix, n);
                ids.advance();
                ids
            }
        }
    }

    fn advance(&mut self) {
        match self.next.checked_add(1) {
            Some(next) => self.next = next,
            None => {
                self.prefix = format!("{}-{}", self.prefix, self.next);
                self.next = 1;
            }
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("node")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let id = NodeId(format!("{}-{}", self.prefix, self.next));
        self.advance();
        id
    }
}
