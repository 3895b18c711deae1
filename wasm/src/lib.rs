use sankey_layout::{Config, layout_json};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SankeyLayoutOptions {
    node_width: Option<f64>,
    node_padding: Option<f64>,
    size: Option<[f64; 2]>,
    iterations: Option<usize>,
    curvature: Option<f64>,
    convergence_threshold: Option<f64>,
}

fn build_config(options: SankeyLayoutOptions) -> Config {
    let mut config = Config::default();
    if let Some(v) = options.node_width {
        config.layout.node_width = v;
    }
    if let Some(v) = options.node_padding {
        config.layout.node_padding = v;
    }
    if let Some([width, height]) = options.size {
        config.layout.width = width;
        config.layout.height = height;
    }
    if let Some(v) = options.iterations {
        config.layout.iterations = v;
    }
    if let Some(v) = options.curvature {
        config.link.curvature = v;
    }
    config.layout.convergence_threshold = options.convergence_threshold;
    config
}

#[wasm_bindgen]
pub fn layout_sankey_json(graph_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<SankeyLayoutOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        SankeyLayoutOptions::default()
    };

    layout_json(graph_json, &build_config(options))
        .map_err(|error| JsValue::from_str(&format!("{error:#}")))
}
