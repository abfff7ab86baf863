//! navclass CLI
//!
//! Entry point for the `navclass` command-line tool.

use clap::{Parser, Subcommand};
use navclass::config::default_host_config_path;
use navclass::input::{load_options, parse_attributes};
use navclass::{logging, Attributes, EffectiveConfig, ElementKind, NodePosition};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process;
use tracing::debug;

#[derive(Parser)]
#[command(name = "navclass")]
#[command(about = "Merge menu attribute and class overrides", version)]
struct Cli {
    /// Log merge decisions to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Path to config file (default: ~/.config/navclass/config.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Un-escape pattern, repeatable (replaces configured patterns)
    #[arg(long, global = true)]
    pattern: Vec<String>,

    /// Replacement for the matching --pattern, repeatable
    #[arg(long, global = true)]
    replacement: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge overrides into one node's attributes and print them as JSON
    Merge {
        /// Element kind: link, item-container or submenu-container
        #[arg(long, short = 'k')]
        kind: ElementKind,

        /// Node depth, 0 for the root level
        #[arg(long, short = 'd', default_value_t = 0)]
        depth: u32,

        /// Position among siblings; negative means none
        #[arg(
            long,
            short = 'o',
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i64).range(..=u32::MAX as i64)
        )]
        order: Option<i64>,

        /// Base attributes as a JSON object
        #[arg(long, short = 'a')]
        atts: Option<String>,

        /// Options bag file (.json or .toml, `-` for JSON on stdin)
        #[arg(long)]
        options: PathBuf,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// List the option keys consulted for a node
    Keys {
        /// Element kind: link, item-container or submenu-container
        #[arg(long, short = 'k')]
        kind: ElementKind,

        /// Node depth, 0 for the root level
        #[arg(long, short = 'd', default_value_t = 0)]
        depth: u32,

        /// Position among siblings; negative means none
        #[arg(
            long,
            short = 'o',
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i64).range(..=u32::MAX as i64)
        )]
        order: Option<i64>,
    },

    /// Print the effective configuration
    Config,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let effective = load_config(&cli);

    match cli.command {
        Commands::Merge {
            kind,
            depth,
            order,
            atts,
            options,
            pretty,
        } => {
            run_merge(&effective, kind, position(depth, order), atts, options, pretty);
        }
        Commands::Keys { kind, depth, order } => {
            run_keys(&effective, kind, position(depth, order));
        }
        Commands::Config => {
            run_config(&effective);
        }
    }
}

fn position(depth: u32, order: Option<i64>) -> NodePosition {
    NodePosition::from_raw(depth, order.unwrap_or(-1))
}

fn load_config(cli: &Cli) -> EffectiveConfig {
    let host_path = cli.config.clone().or_else(default_host_config_path);
    let overrides = cli_overrides(&cli.pattern, &cli.replacement);

    match EffectiveConfig::build(host_path.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn cli_overrides(patterns: &[String], replacements: &[String]) -> Option<Value> {
    if patterns.is_empty() && replacements.is_empty() {
        return None;
    }
    let as_layer = |items: &[String]| {
        if items.is_empty() {
            Value::Null
        } else {
            json!(items)
        }
    };
    Some(json!({
        "unescape": {
            "patterns": as_layer(patterns),
            "replacements": as_layer(replacements)
        }
    }))
}

fn run_merge(
    effective: &EffectiveConfig,
    kind: ElementKind,
    position: NodePosition,
    atts: Option<String>,
    options_path: PathBuf,
    pretty: bool,
) {
    let base = match atts.as_deref().map(parse_attributes).transpose() {
        Ok(base) => base.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let options = match load_options(&options_path) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    debug!(%kind, depth = position.depth, order = ?position.order, "merging");
    let merged: Attributes = effective.merger().merge(kind, base, &options, position);

    let output = if pretty {
        serde_json::to_string_pretty(&merged)
    } else {
        serde_json::to_string(&merged)
    };
    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_keys(effective: &EffectiveConfig, kind: ElementKind, position: NodePosition) {
    let keys = effective.merger().keys_for(kind, position);
    match serde_json::to_string_pretty(&keys) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_config(effective: &EffectiveConfig) {
    match effective.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
