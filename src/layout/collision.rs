use crate::config::LayoutConfig;

use super::types::{f64_cmp, NodeId, SankeyNode};

/// Pushes overlapping nodes apart within every breadth group, then pulls an
/// overflowing group back up from the bottom.
///
/// Groups are left sorted by `y`. A group whose padding alone exceeds the
/// available height ends up with its first node above zero.
pub(super) fn resolve_collisions(
    nodes: &mut [SankeyNode],
    groups: &mut [Vec<NodeId>],
    config: &LayoutConfig,
) {
    let padding = config.node_padding;
    for group in groups.iter_mut() {
        if group.is_empty() {
            continue;
        }
        group.sort_by(|a, b| f64_cmp(nodes[a.index()].y, nodes[b.index()].y));
        let last = group[group.len() - 1];

        let mut y0 = 0.0;
        for id in group.iter() {
            let node = &mut nodes[id.index()];
            let dy = y0 - node.y;
            if dy > 0.0 {
                node.y += dy;
            }
            y0 = node.y + node.dy + padding;
        }

        let overflow = y0 - padding - config.height;
        if overflow > 0.0 {
            nodes[last.index()].y -= overflow;
            y0 = nodes[last.index()].y;
            for id in group.iter().rev().skip(1) {
                let node = &mut nodes[id.index()];
                let dy = node.y + node.dy + padding - y0;
                if dy > 0.0 {
                    node.y -= dy;
                }
                y0 = node.y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(idx: usize, y: f64, dy: f64) -> SankeyNode {
        let mut node = SankeyNode::new(NodeId(idx), idx.to_string(), idx.to_string());
        node.y = y;
        node.dy = dy;
        node
    }

    fn config(height: f64) -> LayoutConfig {
        LayoutConfig {
            height,
            node_padding: 8.0,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn sorts_and_separates_overlapping_nodes() {
        let mut nodes = vec![node(0, 30.0, 20.0), node(1, 10.0, 20.0), node(2, 12.0, 5.0)];
        let mut groups = vec![vec![NodeId(0), NodeId(1), NodeId(2)]];
        resolve_collisions(&mut nodes, &mut groups, &config(200.0));

        assert_eq!(groups[0], vec![NodeId(1), NodeId(2), NodeId(0)]);
        assert_eq!(nodes[1].y, 10.0);
        assert_eq!(nodes[2].y, 38.0);
        assert_eq!(nodes[0].y, 51.0);
    }

    #[test]
    fn negative_positions_are_pushed_to_zero() {
        let mut nodes = vec![node(0, -15.0, 10.0)];
        let mut groups = vec![vec![NodeId(0)]];
        resolve_collisions(&mut nodes, &mut groups, &config(100.0));
        assert_eq!(nodes[0].y, 0.0);
    }

    #[test]
    fn overflow_is_pulled_back_from_the_bottom() {
        let mut nodes = vec![node(0, 0.0, 40.0), node(1, 70.0, 40.0)];
        let mut groups = vec![vec![NodeId(0), NodeId(1)]];
        resolve_collisions(&mut nodes, &mut groups, &config(100.0));

        assert_eq!(nodes[1].y, 60.0);
        assert_eq!(nodes[0].y, 0.0);
        assert_eq!(nodes[1].y + nodes[1].dy, 100.0);
    }

    #[test]
    fn oversubscribed_group_is_clipped_above_zero() {
        let mut nodes = vec![node(0, 0.0, 0.0), node(1, 1.0, 0.0), node(2, 2.0, 0.0)];
        let mut groups = vec![vec![NodeId(0), NodeId(1), NodeId(2)]];
        resolve_collisions(&mut nodes, &mut groups, &config(10.0));

        assert_eq!(nodes[2].y, 10.0);
        assert_eq!(nodes[1].y, 2.0);
        assert_eq!(nodes[0].y, -6.0);
    }

    #[test]
    fn empty_groups_are_skipped() {
        let mut nodes: Vec<SankeyNode> = Vec::new();
        let mut groups = vec![Vec::new()];
        resolve_collisions(&mut nodes, &mut groups, &config(10.0));
        assert!(groups[0].is_empty());
    }
}
