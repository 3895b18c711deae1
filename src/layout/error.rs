#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("circular link detected at node {node}")]
    CyclicGraph { node: String },
    #[error("link {link} references node index {index}, but only {len} nodes exist")]
    UnknownNodeIndex { link: usize, index: usize, len: usize },
    #[error("link {link} references unknown node {key:?}")]
    UnknownNodeKey { link: usize, key: String },
    #[error("link {link} has invalid value {value}; values must be finite and non-negative")]
    InvalidValue { link: usize, value: f64 },
    #[error("node {key:?} is declared more than once")]
    DuplicateNode { key: String },
    #[error("node {id} cannot be moved to ({x}, {y}); coordinates must be finite")]
    InvalidPosition { id: usize, x: f64, y: f64 },
    #[error("no node with id {id}")]
    UnknownNode { id: usize },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
