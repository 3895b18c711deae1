#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, LinkConfig, load_config};
pub use ir::{Endpoint, GraphInput, LinkInput, NodeInput, parse_graph_input};
pub use layout::{
    LayoutError, LayoutState, LinkId, LinkPath, NodeId, SankeyLink, SankeyNode, compute_layout,
};
pub use layout_dump::LayoutDump;

/// Parses a graph document, lays it out and returns the layout dump as JSON.
pub fn layout_json(source: &str, config: &Config) -> anyhow::Result<String> {
    let graph = parse_graph_input(source)?;
    let state = compute_layout(&graph, &config.layout)?;
    LayoutDump::from_layout(&state, config).to_json(false)
}
