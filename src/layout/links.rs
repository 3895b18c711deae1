use super::types::{f64_cmp, SankeyLink, SankeyNode};

/// Orders each node's links by the vertical center of the node at the other
/// end, then stacks them so their thicknesses tile the node top to bottom.
pub(super) fn compute_link_depths(nodes: &mut [SankeyNode], links: &mut [SankeyLink]) {
    let centers: Vec<f64> = nodes.iter().map(SankeyNode::center).collect();

    for node in nodes.iter_mut() {
        node.source_links.sort_by(|a, b| {
            f64_cmp(
                centers[links[a.index()].target.index()],
                centers[links[b.index()].target.index()],
            )
        });
        node.target_links.sort_by(|a, b| {
            f64_cmp(
                centers[links[a.index()].source.index()],
                centers[links[b.index()].source.index()],
            )
        });
    }

    for node in nodes.iter() {
        let mut sy = 0.0;
        for id in &node.source_links {
            let link = &mut links[id.index()];
            link.sy = sy;
            sy += link.dy;
        }
        let mut ty = 0.0;
        for id in &node.target_links {
            let link = &mut links[id.index()];
            link.ty = ty;
            ty += link.dy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{LinkId, NodeId};

    fn node(idx: usize, y: f64, dy: f64) -> SankeyNode {
        let mut node = SankeyNode::new(NodeId(idx), idx.to_string(), idx.to_string());
        node.y = y;
        node.dy = dy;
        node
    }

    fn link(idx: usize, source: usize, target: usize, dy: f64) -> SankeyLink {
        let mut link = SankeyLink::new(LinkId(idx), NodeId(source), NodeId(target), dy);
        link.dy = dy;
        link
    }

    #[test]
    fn stacks_outgoing_links_by_target_center() {
        // 0 fans out to 1 (low) and 2 (high); declared low first.
        let mut nodes = vec![node(0, 0.0, 30.0), node(1, 200.0, 10.0), node(2, 20.0, 20.0)];
        let mut links = vec![link(0, 0, 1, 10.0), link(1, 0, 2, 20.0)];
        nodes[0].source_links = vec![LinkId(0), LinkId(1)];
        nodes[1].target_links = vec![LinkId(0)];
        nodes[2].target_links = vec![LinkId(1)];

        compute_link_depths(&mut nodes, &mut links);

        assert_eq!(nodes[0].source_links, vec![LinkId(1), LinkId(0)]);
        assert_eq!(links[1].sy, 0.0);
        assert_eq!(links[0].sy, 20.0);
        assert_eq!(links[0].ty, 0.0);
        assert_eq!(links[1].ty, 0.0);
    }

    #[test]
    fn equal_centers_keep_declaration_order() {
        let mut nodes = vec![node(0, 0.0, 10.0), node(1, 0.0, 10.0), node(2, 0.0, 20.0)];
        let mut links = vec![link(0, 0, 2, 10.0), link(1, 1, 2, 10.0)];
        nodes[0].source_links = vec![LinkId(0)];
        nodes[1].source_links = vec![LinkId(1)];
        nodes[2].target_links = vec![LinkId(0), LinkId(1)];

        compute_link_depths(&mut nodes, &mut links);

        assert_eq!(nodes[2].target_links, vec![LinkId(0), LinkId(1)]);
        assert_eq!(links[0].ty, 0.0);
        assert_eq!(links[1].ty, 10.0);
    }
}
