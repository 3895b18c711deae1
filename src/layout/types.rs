use std::cmp::Ordering;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LinkId(pub usize);

impl LinkId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SankeyNode {
    pub id: NodeId,
    /// Supplied node id, or the node's position when none was given.
    pub key: String,
    pub name: String,
    pub source_links: Vec<LinkId>,
    pub target_links: Vec<LinkId>,
    pub value: f64,
    pub layer: usize,
    pub x: f64,
    pub dx: f64,
    pub y: f64,
    pub dy: f64,
}

impl SankeyNode {
    pub(super) fn new(id: NodeId, key: String, name: String) -> Self {
        Self {
            id,
            key,
            name,
            source_links: Vec::new(),
            target_links: Vec::new(),
            value: 0.0,
            layer: 0,
            x: 0.0,
            dx: 0.0,
            y: 0.0,
            dy: 0.0,
        }
    }

    pub fn center(&self) -> f64 {
        self.y + self.dy / 2.0
    }

    pub fn is_sink(&self) -> bool {
        self.source_links.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SankeyLink {
    pub id: LinkId,
    pub source: NodeId,
    pub target: NodeId,
    pub value: f64,
    pub dy: f64,
    /// Offset from the top of the source node.
    pub sy: f64,
    /// Offset from the top of the target node.
    pub ty: f64,
}

impl SankeyLink {
    pub(super) fn new(id: LinkId, source: NodeId, target: NodeId, value: f64) -> Self {
        Self {
            id,
            source,
            target,
            value,
            dy: 0.0,
            sy: 0.0,
            ty: 0.0,
        }
    }
}

pub(super) fn f64_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
