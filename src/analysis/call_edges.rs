//! 调用边收集
//!
//! Edges are textual: the target is `receiver.method` as written, never
//! resolved to a class. Two unrelated `conn` variables collapse to the same
//! target text.

use crate::ast::{BodyNode, NodeKind};
use crate::model::CallEdge;

/// Receiver used for unqualified calls
pub const IMPLICIT_RECEIVER: &str = "this";

/// One call expression found in a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub receiver: String,
    pub name: String,
    pub line: usize,
}

impl CallSite {
    /// "receiver.name"
    pub fn target(&self) -> String {
        format!("{}.{}", self.receiver, self.name)
    }
}

/// Every call in the body, pre-order, duplicates kept
pub fn collect_call_sites(body: &[BodyNode]) -> Vec<CallSite> {
    let mut sites = Vec::new();
    for node in body {
        walk(node, &mut sites);
    }
    sites
}

fn walk(node: &BodyNode, sites: &mut Vec<CallSite>) {
    if let NodeKind::Call { receiver, name } = &node.kind {
        sites.push(CallSite {
            receiver: receiver.clone().unwrap_or_else(|| IMPLICIT_RECEIVER.to_string()),
            name: name.clone(),
            line: node.line,
        });
    }
    for child in &node.children {
        walk(child, sites);
    }
}

/// One edge per call site from `owner_fqcn.method_name`
pub fn edges_for_method(owner_fqcn: &str, method_name: &str, sites: &[CallSite]) -> Vec<CallEdge> {
    let source = format!("{}.{}", owner_fqcn, method_name);
    sites
        .iter()
        .map(|site| CallEdge::new(&source, &site.target()))
        .collect()
}
