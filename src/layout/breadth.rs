use std::collections::VecDeque;

use tracing::debug;

use crate::config::LayoutConfig;

use super::error::{LayoutError, Result};
use super::LayoutState;

/// Assigns each node a layer by frontier expansion from every node, pins
/// sinks to the last layer, then scales layers into pixel x coordinates.
///
/// Returns the number of layers.
pub(super) fn compute_node_breadths(state: &mut LayoutState, config: &LayoutConfig) -> Result<usize> {
    ensure_acyclic(state)?;

    let node_count = state.nodes.len();
    let mut remaining: Vec<usize> = (0..node_count).collect();
    let mut next: Vec<usize> = Vec::new();
    let mut next_seen = vec![false; node_count];
    let mut x = 0usize;

    while !remaining.is_empty() {
        for &node_idx in &remaining {
            let node = &mut state.nodes[node_idx];
            node.layer = x;
            node.dx = config.node_width;
            for &link_id in &node.source_links {
                let target = state.links[link_id.index()].target.index();
                if !next_seen[target] {
                    next_seen[target] = true;
                    next.push(target);
                }
            }
        }
        remaining = std::mem::take(&mut next);
        next_seen.fill(false);
        x += 1;
    }

    move_sinks_right(state, x);
    scale_node_breadths(state, config, x);
    debug!(layers = x, nodes = node_count, "assigned node breadths");
    Ok(x)
}

fn move_sinks_right(state: &mut LayoutState, layer_count: usize) {
    for node in &mut state.nodes {
        if node.is_sink() {
            node.layer = layer_count - 1;
        }
    }
}

fn scale_node_breadths(state: &mut LayoutState, config: &LayoutConfig, layer_count: usize) {
    let kx = if layer_count > 1 {
        (config.width - config.node_width) / (layer_count - 1) as f64
    } else {
        0.0
    };
    for node in &mut state.nodes {
        node.x = node.layer as f64 * kx;
    }
}

/// Kahn's algorithm over the link graph. Anything left with a positive
/// in-degree sits on a cycle or downstream of one.
fn ensure_acyclic(state: &LayoutState) -> Result<()> {
    let node_count = state.nodes.len();
    let mut indegree = vec![0usize; node_count];
    for link in &state.links {
        indegree[link.target.index()] += 1;
    }

    let mut queue: VecDeque<usize> = indegree
        .iter()
        .enumerate()
        .filter_map(|(idx, deg)| (*deg == 0).then_some(idx))
        .collect();
    let mut visited = 0usize;
    while let Some(node_idx) = queue.pop_front() {
        visited += 1;
        for &link_id in &state.nodes[node_idx].source_links {
            let target = state.links[link_id.index()].target.index();
            indegree[target] -= 1;
            if indegree[target] == 0 {
                queue.push_back(target);
            }
        }
    }

    if visited == node_count {
        return Ok(());
    }
    let stuck = indegree
        .iter()
        .position(|deg| *deg > 0)
        .map(|idx| state.nodes[idx].key.clone())
        .unwrap_or_default();
    Err(LayoutError::CyclicGraph { node: stuck })
}
