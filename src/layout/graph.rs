use std::collections::{HashMap, HashSet};

use crate::ir::{Endpoint, GraphInput};

use super::error::{LayoutError, Result};
use super::types::{LinkId, NodeId, SankeyLink, SankeyNode};
use super::LayoutState;

/// Resolves endpoints into the node arena and wires up adjacency in link
/// declaration order.
pub(super) fn build_graph(input: &GraphInput) -> Result<LayoutState> {
    let mut nodes = match input.nodes.as_deref() {
        Some(declared) if !declared.is_empty() => declared
            .iter()
            .enumerate()
            .map(|(idx, node)| {
                let key = node.id.clone().unwrap_or_else(|| idx.to_string());
                let name = node.name.clone().unwrap_or_else(|| key.clone());
                SankeyNode::new(NodeId(idx), key, name)
            })
            .collect(),
        _ => infer_nodes(input),
    };

    let mut keys: HashMap<String, NodeId> = HashMap::with_capacity(nodes.len());
    for node in &nodes {
        if keys.insert(node.key.clone(), node.id).is_some() {
            return Err(LayoutError::DuplicateNode {
                key: node.key.clone(),
            });
        }
    }

    let mut links = Vec::with_capacity(input.links.len());
    for (idx, raw) in input.links.iter().enumerate() {
        if !raw.value.is_finite() || raw.value < 0.0 {
            return Err(LayoutError::InvalidValue {
                link: idx,
                value: raw.value,
            });
        }
        let source = resolve_endpoint(&raw.source, idx, nodes.len(), &keys)?;
        let target = resolve_endpoint(&raw.target, idx, nodes.len(), &keys)?;
        let id = LinkId(idx);
        nodes[source.index()].source_links.push(id);
        nodes[target.index()].target_links.push(id);
        links.push(SankeyLink::new(id, source, target, raw.value));
    }

    Ok(LayoutState::new(nodes, links, keys))
}

fn infer_nodes(input: &GraphInput) -> Vec<SankeyNode> {
    let endpoints = input
        .links
        .iter()
        .flat_map(|link| [&link.source, &link.target]);

    let indexed = endpoints
        .clone()
        .filter_map(|endpoint| match endpoint {
            Endpoint::Index(idx) => Some(idx + 1),
            Endpoint::Key(_) => None,
        })
        .max()
        .unwrap_or(0);

    let mut nodes: Vec<SankeyNode> = (0..indexed)
        .map(|idx| SankeyNode::new(NodeId(idx), idx.to_string(), idx.to_string()))
        .collect();

    let mut seen: HashSet<String> = nodes.iter().map(|node| node.key.clone()).collect();
    for endpoint in endpoints {
        let Endpoint::Key(key) = endpoint else {
            continue;
        };
        if !seen.insert(key.clone()) {
            continue;
        }
        let id = NodeId(nodes.len());
        nodes.push(SankeyNode::new(id, key.clone(), key.clone()));
    }
    nodes
}

fn resolve_endpoint(
    endpoint: &Endpoint,
    link: usize,
    len: usize,
    keys: &HashMap<String, NodeId>,
) -> Result<NodeId> {
    match endpoint {
        Endpoint::Index(index) if *index < len => Ok(NodeId(*index)),
        Endpoint::Index(index) => Err(LayoutError::UnknownNodeIndex {
            link,
            index: *index,
            len,
        }),
        Endpoint::Key(key) => keys
            .get(key)
            .copied()
            .ok_or_else(|| LayoutError::UnknownNodeKey {
                link,
                key: key.clone(),
            }),
    }
}

/// A node's value is the larger of its outgoing and incoming flow.
pub(super) fn compute_node_values(state: &mut LayoutState) {
    let links = &state.links;
    for node in &mut state.nodes {
        let out_sum: f64 = node
            .source_links
            .iter()
            .map(|id| links[id.index()].value)
            .sum();
        let in_sum: f64 = node
            .target_links
            .iter()
            .map(|id| links[id.index()].value)
            .sum();
        node.value = out_sum.max(in_sum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::NodeInput;

    fn declared(ids: &[&str]) -> GraphInput {
        GraphInput {
            nodes: Some(
                ids.iter()
                    .map(|id| NodeInput {
                        id: Some(id.to_string()),
                        name: None,
                    })
                    .collect(),
            ),
            links: Vec::new(),
        }
    }

    #[test]
    fn wires_adjacency_in_declaration_order() {
        let mut input = declared(&["A", "B", "C"]);
        input.add_link("A", "C", 2.0);
        input.add_link(1usize, "C", 3.0);
        input.add_link("A", 1usize, 1.0);
        let state = build_graph(&input).unwrap();

        assert_eq!(state.nodes[0].source_links, vec![LinkId(0), LinkId(2)]);
        assert_eq!(state.nodes[2].target_links, vec![LinkId(0), LinkId(1)]);
        assert_eq!(state.links[1].source, NodeId(1));
        assert_eq!(state.nodes[1].name, "B");
    }

    #[test]
    fn unnamed_nodes_are_keyed_by_position() {
        let input = GraphInput {
            nodes: Some(vec![NodeInput::default(), NodeInput::default()]),
            links: Vec::new(),
        };
        let state = build_graph(&input).unwrap();
        assert_eq!(state.nodes[1].key, "1");
        assert_eq!(state.keys.get("0"), Some(&NodeId(0)));
    }

    #[test]
    fn infers_nodes_from_links() {
        let mut input = GraphInput::new();
        input.add_link("x", 2usize, 1.0);
        input.add_link("y", "x", 1.0);
        let state = build_graph(&input).unwrap();

        let keys: Vec<&str> = state.nodes.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, vec!["0", "1", "2", "x", "y"]);
        assert_eq!(state.links[0].source, NodeId(3));
        assert_eq!(state.links[0].target, NodeId(2));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let mut input = declared(&["A", "B"]);
        input.add_link(0usize, 5usize, 1.0);
        assert_eq!(
            build_graph(&input).unwrap_err(),
            LayoutError::UnknownNodeIndex {
                link: 0,
                index: 5,
                len: 2
            }
        );
    }

    #[test]
    fn rejects_unknown_key() {
        let mut input = declared(&["A", "B"]);
        input.add_link("A", "B", 1.0);
        input.add_link("A", "Z", 1.0);
        assert_eq!(
            build_graph(&input).unwrap_err(),
            LayoutError::UnknownNodeKey {
                link: 1,
                key: "Z".to_string()
            }
        );
    }

    #[test]
    fn rejects_negative_and_nan_values() {
        let mut input = declared(&["A", "B"]);
        input.add_link("A", "B", -1.0);
        assert!(matches!(
            build_graph(&input),
            Err(LayoutError::InvalidValue { link: 0, .. })
        ));

        let mut input = declared(&["A", "B"]);
        input.add_link("A", "B", f64::NAN);
        assert!(matches!(
            build_graph(&input),
            Err(LayoutError::InvalidValue { link: 0, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let input = declared(&["A", "A"]);
        assert_eq!(
            build_graph(&input).unwrap_err(),
            LayoutError::DuplicateNode {
                key: "A".to_string()
            }
        );
    }

    #[test]
    fn value_is_max_of_in_and_out() {
        let mut input = declared(&["A", "B", "C", "D"]);
        input.add_link("A", "B", 4.0);
        input.add_link("B", "C", 1.0);
        input.add_link("B", "C", 1.5);
        let mut state = build_graph(&input).unwrap();
        compute_node_values(&mut state);

        let values: Vec<f64> = state.nodes.iter().map(|n| n.value).collect();
        assert_eq!(values, vec![4.0, 4.0, 2.5, 0.0]);
    }
}
