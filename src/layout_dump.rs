use crate::config::Config;
use crate::layout::{LayoutState, LinkPath};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub node_width: f64,
    pub node_padding: f64,
    pub vertical_scale: f64,
    pub iterations_run: usize,
    pub nodes: Vec<NodeDump>,
    pub links: Vec<LinkDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub name: String,
    pub layer: usize,
    pub value: f64,
    pub x: f64,
    pub dx: f64,
    pub y: f64,
    pub dy: f64,
}

#[derive(Debug, Serialize)]
pub struct LinkDump {
    pub source: String,
    pub target: String,
    pub value: f64,
    pub dy: f64,
    pub sy: f64,
    pub ty: f64,
    pub path: LinkPath,
    pub d: String,
}

impl LayoutDump {
    pub fn from_layout(state: &LayoutState, config: &Config) -> Self {
        let nodes = state
            .nodes()
            .iter()
            .map(|node| NodeDump {
                id: node.key.clone(),
                name: node.name.clone(),
                layer: node.layer,
                value: node.value,
                x: node.x,
                dx: node.dx,
                y: node.y,
                dy: node.dy,
            })
            .collect();

        let links = state
            .links()
            .iter()
            .filter_map(|link| {
                let path = state.link_path(link.id, config.link.curvature)?;
                let source = state.node(link.source)?;
                let target = state.node(link.target)?;
                Some(LinkDump {
                    source: source.key.clone(),
                    target: target.key.clone(),
                    value: link.value,
                    dy: link.dy,
                    sy: link.sy,
                    ty: link.ty,
                    path,
                    d: path.to_svg_d(),
                })
            })
            .collect();

        LayoutDump {
            width: config.layout.width,
            height: config.layout.height,
            node_width: config.layout.node_width,
            node_padding: config.layout.node_padding,
            vertical_scale: state.vertical_scale(),
            iterations_run: state.iterations_run(),
            nodes,
            links,
        }
    }

    pub fn to_json(&self, pretty: bool) -> anyhow::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

pub fn write_layout_dump(path: &Path, state: &LayoutState, config: &Config) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(state, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
