use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};

/// One end of a link: either a position in the node list or a node key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Index(usize),
    Key(String),
}

impl From<usize> for Endpoint {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Endpoint {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeInput {
    /// Key that links may reference. Numeric ids are kept as their decimal
    /// text, so `{"id": 7}` is referenced as `"7"`.
    #[serde(default, deserialize_with = "node_key")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkInput {
    pub source: Endpoint,
    pub target: Endpoint,
    pub value: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Integer(i64),
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn into_key(self) -> String {
        match self {
            NumberOrString::Integer(val) => val.to_string(),
            NumberOrString::Number(val) => val.to_string(),
            NumberOrString::String(val) => val,
        }
    }
}

fn node_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NumberOrString>::deserialize(deserializer)?.map(NumberOrString::into_key))
}

/// Raw edge list handed to the layout engine.
///
/// `nodes` may be omitted; in that case nodes are inferred from the link
/// endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<NodeInput>>,
    #[serde(default)]
    pub links: Vec<LinkInput>,
}

impl GraphInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_node(&mut self, id: &str, name: Option<String>) {
        let nodes = self.nodes.get_or_insert_with(Vec::new);
        if let Some(existing) = nodes
            .iter_mut()
            .find(|node| node.id.as_deref() == Some(id))
        {
            if let Some(name) = name {
                existing.name = Some(name);
            }
            return;
        }
        nodes.push(NodeInput {
            id: Some(id.to_string()),
            name,
        });
    }

    pub fn add_link(
        &mut self,
        source: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
        value: f64,
    ) {
        self.links.push(LinkInput {
            source: source.into(),
            target: target.into(),
            value,
        });
    }
}

/// Parses a graph document. Strict JSON first, then JSON5 for hand-written
/// files with comments or trailing commas.
pub fn parse_graph_input(source: &str) -> anyhow::Result<GraphInput> {
    match serde_json::from_str::<GraphInput>(source) {
        Ok(graph) => Ok(graph),
        Err(json_err) => json5::from_str::<GraphInput>(source)
            .with_context(|| format!("invalid graph document: {json_err}")),
    }
}
