use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_padding: f64,
    pub width: f64,
    pub height: f64,
    pub iterations: usize,
    /// Stop relaxing once a full round moves no node by more than this.
    /// `None` always runs `iterations` rounds.
    pub convergence_threshold: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 24.0,
            node_padding: 8.0,
            width: 960.0,
            height: 500.0,
            iterations: 32,
            convergence_threshold: None,
        }
    }
}

impl LayoutConfig {
    pub fn size(&self) -> [f64; 2] {
        [self.width, self.height]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub curvature: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { curvature: 0.5 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub layout: LayoutConfig,
    pub link: LinkConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SankeyConfigFile {
    node_width: Option<f64>,
    node_padding: Option<f64>,
    size: Option<[f64; 2]>,
    width: Option<f64>,
    height: Option<f64>,
    iterations: Option<usize>,
    convergence_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkConfigFile {
    curvature: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    sankey: Option<SankeyConfigFile>,
    link: Option<LinkConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("failed to parse config {}", path.display()))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents)
            .with_context(|| format!("not valid JSON ({json_err}) or JSON5"))?,
    };

    let mut config = Config::default();

    if let Some(sankey) = parsed.sankey {
        if let Some(v) = sankey.node_width {
            config.layout.node_width = v;
        }
        if let Some(v) = sankey.node_padding {
            config.layout.node_padding = v;
        }
        if let Some([width, height]) = sankey.size {
            config.layout.width = width;
            config.layout.height = height;
        }
        if let Some(v) = sankey.width {
            config.layout.width = v;
        }
        if let Some(v) = sankey.height {
            config.layout.height = v;
        }
        if let Some(v) = sankey.iterations {
            config.layout.iterations = v;
        }
        if let Some(v) = sankey.convergence_threshold {
            config.layout.convergence_threshold = Some(v);
        }
    }

    if let Some(link) = parsed.link {
        if let Some(v) = link.curvature {
            config.link.curvature = v;
        }
    }

    Ok(config)
}
