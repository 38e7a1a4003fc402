//! 圈复杂度计算
//!
//! Baseline 1, plus one per decision point anywhere in the body: `if`, `for`,
//! `for-each`, `while`, `do-while`, `catch`, ternary, and every switch label
//! group whose first label is not `default`.
//!
//! `&&` / `||` are not counted (known limitation).

use crate::ast::{BodyNode, NodeKind};

/// Result of walking one method body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complexity {
    pub value: usize,
    /// One tag per decision point, pre-order
    pub control_statements: Vec<String>,
}

impl Default for Complexity {
    fn default() -> Self {
        Self {
            value: 1,
            control_statements: Vec::new(),
        }
    }
}

/// Tag for a counted construct, None if the node is not a decision point
pub fn decision_tag(kind: &NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::If => Some("if"),
        NodeKind::For => Some("for"),
        NodeKind::ForEach => Some("for-each"),
        NodeKind::While => Some("while"),
        NodeKind::DoWhile => Some("do-while"),
        NodeKind::Catch => Some("catch"),
        NodeKind::Conditional => Some("conditional"),
        NodeKind::SwitchGroup { labels } => match labels.first() {
            Some(first) if first != "default" => Some("case"),
            _ => None,
        },
        NodeKind::Call { .. } => None,
    }
}

/// Complexity of an optional body; abstract methods score 1
pub fn measure(body: Option<&[BodyNode]>) -> Complexity {
    match body {
        Some(nodes) => nodes.iter().fold(Complexity::default(), visit),
        None => Complexity::default(),
    }
}

/// Pre-order walk threading the accumulator through every nested node
fn visit(mut acc: Complexity, node: &BodyNode) -> Complexity {
    if let Some(tag) = decision_tag(&node.kind) {
        acc.value += 1;
        acc.control_statements.push(tag.to_string());
    }
    node.children.iter().fold(acc, visit)
}
