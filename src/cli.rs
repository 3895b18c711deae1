use crate::config::{load_config, Config};
use crate::ir::{parse_graph_input, GraphInput};
use crate::layout::compute_layout;
use crate::layout_dump::LayoutDump;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sankey-layout", version, about = "Sankey diagram layout engine")]
pub struct Args {
    /// Input graph file (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout JSON. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file ({"sankey": {...}, "link": {...}})
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Relaxation rounds
    #[arg(short = 'n', long = "iterations")]
    pub iterations: Option<usize>,

    #[arg(long = "nodeWidth")]
    pub node_width: Option<f64>,

    #[arg(long = "nodePadding")]
    pub node_padding: Option<f64>,

    /// Link curve handle position, 0..1
    #[arg(long = "curvature")]
    pub curvature: Option<f64>,

    /// Stop relaxing once no node moves more than this many pixels per round
    #[arg(long = "converge")]
    pub converge: Option<f64>,

    /// Pretty-print the output JSON
    #[arg(long = "pretty")]
    pub pretty: bool,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let source = read_input(args.input.as_deref())?;
    let graph: GraphInput = parse_graph_input(&source)?;
    let state = compute_layout(&graph, &config.layout)?;
    let json = LayoutDump::from_layout(&state, &config).to_json(args.pretty)?;
    write_output(&json, args.output.as_deref())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sankey_layout=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(v) = args.width {
        config.layout.width = v;
    }
    if let Some(v) = args.height {
        config.layout.height = v;
    }
    if let Some(v) = args.iterations {
        config.layout.iterations = v;
    }
    if let Some(v) = args.node_width {
        config.layout.node_width = v;
    }
    if let Some(v) = args.node_padding {
        config.layout.node_padding = v;
    }
    if let Some(v) = args.curvature {
        config.link.curvature = v;
    }
    if let Some(v) = args.converge {
        config.layout.convergence_threshold = Some(v);
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(json: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    stdout.write_all(json.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}
