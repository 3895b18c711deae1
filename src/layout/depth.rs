use tracing::{debug, trace};

use crate::config::LayoutConfig;

use super::collision::resolve_collisions;
use super::types::{LinkId, NodeId, SankeyLink, SankeyNode};
use super::LayoutState;

const ALPHA_DECAY: f64 = 0.99;

pub(super) fn compute_node_depths(state: &mut LayoutState, config: &LayoutConfig) {
    state.groups = nodes_by_breadth(&state.nodes);
    initialize_node_depth(state, config);
    resolve_collisions(&mut state.nodes, &mut state.groups, config);

    let mut alpha = 1.0;
    let mut rounds = 0usize;
    let mut previous: Vec<f64> = Vec::new();
    while rounds < config.iterations {
        if config.convergence_threshold.is_some() {
            previous.clear();
            previous.extend(state.nodes.iter().map(|node| node.y));
        }

        alpha *= ALPHA_DECAY;
        relax_right_to_left(state, alpha);
        resolve_collisions(&mut state.nodes, &mut state.groups, config);
        relax_left_to_right(state, alpha);
        resolve_collisions(&mut state.nodes, &mut state.groups, config);
        rounds += 1;

        if let Some(threshold) = config.convergence_threshold {
            let max_delta = state
                .nodes
                .iter()
                .zip(&previous)
                .map(|(node, y)| (node.y - y).abs())
                .fold(0.0, f64::max);
            trace!(round = rounds, max_delta, "relaxation round");
            if max_delta < threshold {
                debug!(rounds, max_delta, "relaxation converged early");
                break;
            }
        }
    }
    state.iterations_run = rounds;
}

fn nodes_by_breadth(nodes: &[SankeyNode]) -> Vec<Vec<NodeId>> {
    let layer_count = nodes.iter().map(|node| node.layer + 1).max().unwrap_or(0);
    let mut groups = vec![Vec::new(); layer_count];
    for node in nodes {
        groups[node.layer].push(node.id);
    }
    groups
}

/// Picks the vertical scale that makes the most crowded group fill the
/// height, and stacks every group in arena order as a starting point.
fn initialize_node_depth(state: &mut LayoutState, config: &LayoutConfig) {
    let padding = config.node_padding;
    let ky = state
        .groups
        .iter()
        .filter_map(|group| {
            let total: f64 = group
                .iter()
                .map(|id| state.nodes[id.index()].value)
                .sum();
            (total > 0.0)
                .then(|| (config.height - (group.len() as f64 - 1.0) * padding) / total)
        })
        .fold(f64::INFINITY, f64::min);
    let ky = if ky.is_finite() { ky.max(0.0) } else { 0.0 };

    for group in &state.groups {
        for (idx, id) in group.iter().enumerate() {
            let node = &mut state.nodes[id.index()];
            node.y = idx as f64;
            node.dy = node.value * ky;
        }
    }
    for link in &mut state.links {
        link.dy = link.value * ky;
    }
    state.ky = ky;
    debug!(ky, groups = state.groups.len(), "initialized node depths");
}

fn relax_right_to_left(state: &mut LayoutState, alpha: f64) {
    for group in state.groups.iter().rev() {
        for id in group {
            let node = &state.nodes[id.index()];
            let Some(target_center) =
                weighted_center(&node.source_links, &state.links, &state.nodes, |link| {
                    link.target
                })
            else {
                continue;
            };
            let node = &mut state.nodes[id.index()];
            node.y += (target_center - node.center()) * alpha;
        }
    }
}

fn relax_left_to_right(state: &mut LayoutState, alpha: f64) {
    for group in &state.groups {
        for id in group {
            let node = &state.nodes[id.index()];
            let Some(source_center) =
                weighted_center(&node.target_links, &state.links, &state.nodes, |link| {
                    link.source
                })
            else {
                continue;
            };
            let node = &mut state.nodes[id.index()];
            node.y += (source_center - node.center()) * alpha;
        }
    }
}

/// Value-weighted mean center of the nodes across `link_ids`. `None` when
/// there is no flow to weigh.
fn weighted_center(
    link_ids: &[LinkId],
    links: &[SankeyLink],
    nodes: &[SankeyNode],
    neighbor: impl Fn(&SankeyLink) -> NodeId,
) -> Option<f64> {
    let (weighted, total) = link_ids
        .iter()
        .map(|id| &links[id.index()])
        .fold((0.0, 0.0), |(weighted, total), link| {
            (
                weighted + nodes[neighbor(link).index()].center() * link.value,
                total + link.value,
            )
        });
    (total > 0.0).then(|| weighted / total)
}
