use crate::model::{Exit, Node, NodeId, Workflow};
use itertools::Itertools;

/// Renders workflows as indented text, one node per line.
///
/// ```text
/// [start] Start (node-1)
///   [branch] In stock? (node-2)
///     true:
///       [end] Ship (node-3)
///     false: -
/// ```
///
/// Indentation stops growing after [`OutlineFormatter::MAX_INDENT`] levels;
/// deeper lines carry their depth as a `N| ` prefix instead.
pub struct OutlineFormatter;

enum Entry<'a> {
    Node(&'a NodeId, usize),
    Exit(Exit, usize, bool),
}

impl OutlineFormatter {
    const INDENT: &'static str = "  ";
    pub const MAX_INDENT: usize = 40;

    pub fn format_workflow(workflow: &Workflow) -> String {
        let mut lines = Vec::with_capacity(workflow.len());
        let mut stack = vec![Entry::Node(workflow.root_id(), 0)];

        while let Some(entry) = stack.pop() {
            match entry {
                Entry::Exit(exit, depth, linked) => {
                    let mut line = Self::pad(depth);
                    line.push_str(&exit.to_string());
                    line.push_str(if linked { ":" } else { ": -" });
                    lines.push(line);
                }
                Entry::Node(id, depth) => {
                    let mut line = Self::pad(depth);
                    let Some(node) = workflow.node(id) else {
                        line.push_str(&format!("<missing {}>", id));
                        lines.push(line);
                        continue;
                    };
                    line.push_str(&Self::format_node(node));
                    lines.push(line);

                    match node.exits() {
                        Some(exits) => {
                            for exit in Exit::ALL.into_iter().rev() {
                                let child = exits.get(exit);
                                if let Some(child) = child {
                                    stack.push(Entry::Node(child, depth + 2));
                                }
                                stack.push(Entry::Exit(exit, depth + 1, child.is_some()));
                            }
                        }
                        None => {
                            for child in node.children().iter().rev() {
                                stack.push(Entry::Node(child, depth + 1));
                            }
                        }
                    }
                }
            }
        }
        lines.into_iter().join("\n")
    }

    fn pad(depth: usize) -> String {
        if depth <= Self::MAX_INDENT {
            Self::INDENT.repeat(depth)
        } else {
            format!("{}{}| ", Self::INDENT.repeat(Self::MAX_INDENT), depth)
        }
    }

    fn format_node(node: &Node) -> String {
        format!("[{}] {} ({})", node.kind(), node.label(), node.id())
    }
}

impl Workflow {
    /// Indented text rendering of the tree, for logs and the CLI.
    pub fn outline(&self) -> String {
        OutlineFormatter::format_workflow(self)
    }
}
