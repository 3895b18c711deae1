//! Sankey layout pipeline.
//!
//! [`compute_layout`] builds the node/link arena from a [`GraphInput`] and runs
//! every stage once: value aggregation, breadth assignment, depth relaxation
//! with collision resolution, and link stacking. The resulting
//! [`LayoutState`] can be adjusted with [`LayoutState::move_node`] followed by
//! [`LayoutState::relayout`], which only restacks links.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::ir::GraphInput;

mod breadth;
mod collision;
mod depth;
mod error;
mod graph;
mod links;
mod path;
mod types;

pub use error::{LayoutError, Result};
pub use path::LinkPath;
pub use types::{LinkId, NodeId, SankeyLink, SankeyNode};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    nodes: Vec<SankeyNode>,
    links: Vec<SankeyLink>,
    keys: HashMap<String, NodeId>,
    /// Node ids per layer, each sorted by `y` after the last collision pass.
    groups: Vec<Vec<NodeId>>,
    ky: f64,
    iterations_run: usize,
}

impl LayoutState {
    fn new(nodes: Vec<SankeyNode>, links: Vec<SankeyLink>, keys: HashMap<String, NodeId>) -> Self {
        Self {
            nodes,
            links,
            keys,
            groups: Vec::new(),
            ky: 0.0,
            iterations_run: 0,
        }
    }

    pub fn nodes(&self) -> &[SankeyNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[SankeyLink] {
        &self.links
    }

    pub fn node(&self, id: NodeId) -> Option<&SankeyNode> {
        self.nodes.get(id.index())
    }

    pub fn node_by_key(&self, key: &str) -> Option<&SankeyNode> {
        self.keys.get(key).and_then(|id| self.node(*id))
    }

    pub fn link(&self, id: LinkId) -> Option<&SankeyLink> {
        self.links.get(id.index())
    }

    pub fn breadth_groups(&self) -> &[Vec<NodeId>] {
        &self.groups
    }

    /// Pixels per unit of value shared by node heights and link thickness.
    pub fn vertical_scale(&self) -> f64 {
        self.ky
    }

    pub fn iterations_run(&self) -> usize {
        self.iterations_run
    }

    /// Repositions a node, e.g. after a drag. Layers are not recomputed;
    /// call [`relayout`](Self::relayout) to restack the links.
    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(LayoutError::UnknownNode { id: id.index() })?;
        if !x.is_finite() || !y.is_finite() {
            return Err(LayoutError::InvalidPosition { id: id.index(), x, y });
        }
        node.x = x;
        node.y = y;
        Ok(())
    }

    pub fn relayout(&mut self) {
        links::compute_link_depths(&mut self.nodes, &mut self.links);
    }

    pub fn link_path(&self, id: LinkId, curvature: f64) -> Option<LinkPath> {
        let link = self.link(id)?;
        let source = self.node(link.source)?;
        let target = self.node(link.target)?;
        Some(path::link_path(link, source, target, curvature))
    }
}

pub fn compute_layout(input: &GraphInput, config: &LayoutConfig) -> Result<LayoutState> {
    let mut state = graph::build_graph(input)?;
    debug!(
        nodes = state.nodes.len(),
        links = state.links.len(),
        "built sankey graph"
    );
    graph::compute_node_values(&mut state);
    breadth::compute_node_breadths(&mut state, config)?;
    depth::compute_node_depths(&mut state, config);
    links::compute_link_depths(&mut state.nodes, &mut state.links);

    for (layer, group) in state.groups.iter().enumerate() {
        if let Some(first) = group.first() {
            let top = state.nodes[first.index()].y;
            if top < 0.0 {
                warn!(
                    layer,
                    nodes = group.len(),
                    overflow = -top,
                    "layer does not fit the layout height; clipped"
                );
            }
        }
    }
    debug!(iterations = state.iterations_run, "sankey layout complete");
    Ok(state)
}
