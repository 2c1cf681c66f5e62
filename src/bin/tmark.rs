//! Command-line interface for tmark
//! Parses tmark files and filter queries and prints what the parsers saw.
//!
//! Usage:
//!   tmark parse `<path>` [--split] [--format `<format>`] [--config `<file>`]  - Dump the blocks of a file
//!   tmark filter `<query>` [--file `<path>`]                                - Print the canonical query, or the blocks it matches
//!   tmark locate `<path>` `<offset>`                                        - Print the node path at a byte offset
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `warn`).

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::process;
use tmark::tmark::ast::{idx_to_ast_path, AstBlock, AstNode};
use tmark::tmark::config::{Loader, OutputFormat, TmarkConfig};
use tmark::tmark::filter::{matches_block, SubsequenceScorer};
use tmark::tmark::formats::{filter_to_string, to_treeviz_str, TreevizOptions};
use tmark::tmark::parsing::{parse_filter, Parser};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let matches = Command::new("tmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect tmark task files and filter queries")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Layer a TOML configuration file over the built-in defaults"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a file and dump its blocks")
                .arg(
                    Arg::new("path")
                        .help("Path to the tmark file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["tree", "json", "yaml"])
                        .help("Output format (overrides output.format)"),
                )
                .arg(
                    Arg::new("split")
                        .long("split")
                        .action(ArgAction::SetTrue)
                        .help("Print each top-level block's source slice with the rebased tree"),
                ),
        )
        .subcommand(
            Command::new("filter")
                .about("Parse a filter query")
                .arg(
                    Arg::new("query")
                        .help("Filter query, e.g. \"@work & !x\"")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .help("Print the top-level blocks of this file that match the query"),
                ),
        )
        .subcommand(
            Command::new("locate")
                .about("Print the path of nodes containing a byte offset")
                .arg(
                    Arg::new("path")
                        .help("Path to the tmark file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("offset")
                        .help("Byte offset; negative values resolve to the end of the document")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(isize))
                        .index(2),
                ),
        )
        .get_matches();

    let config = load_config(&matches, matches.subcommand());

    let result = match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let path = parse_matches.get_one::<String>("path").unwrap();
            let split = parse_matches.get_flag("split");
            handle_parse_command(path, split, &config)
        }
        Some(("filter", filter_matches)) => {
            let query = filter_matches.get_one::<String>("query").unwrap();
            let file = filter_matches.get_one::<String>("file");
            handle_filter_command(query, file.map(String::as_str), &config)
        }
        Some(("locate", locate_matches)) => {
            let path = locate_matches.get_one::<String>("path").unwrap();
            let offset = *locate_matches.get_one::<isize>("offset").unwrap();
            handle_locate_command(path, offset, &config)
        }
        _ => unreachable!(),
    };

    if let Err(message) = result {
        eprintln!("Error: {}", message);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Defaults, then `--config`, then flags.
fn load_config(matches: &ArgMatches, subcommand: Option<(&str, &ArgMatches)>) -> TmarkConfig {
    let mut loader = Loader::new();
    let config_path = subcommand
        .and_then(|(_, sub)| sub.get_one::<String>("config"))
        .or_else(|| matches.get_one::<String>("config"));
    if let Some(path) = config_path {
        debug!(path = %path, "layering config file");
        loader = loader.with_file(path);
    }
    if let Some(("parse", parse_matches)) = subcommand {
        if let Some(format) = parse_matches.get_one::<String>("format") {
            loader = loader
                .set_override("output.format", format.as_str())
                .unwrap_or_else(|e| fail(&format!("Invalid --format: {}", e)));
        }
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(&format!("Failed to load configuration: {}", e)))
}

fn fail(message: &str) -> ! {
    error!("{}", message);
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn read_source(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Error reading {}: {}", path, e))
}

fn parse_source(source: &str, config: &TmarkConfig) -> Vec<AstBlock> {
    Parser::with_options(source, config.parser_options())
        .parse_blocks()
        .collect()
}

fn render(nodes: &[AstNode<'_>], config: &TmarkConfig) -> Result<String, String> {
    match config.output.format {
        OutputFormat::Tree => {
            let options = TreevizOptions {
                truncate: config.output.truncate,
                ..TreevizOptions::default()
            };
            Ok(to_treeviz_str(nodes, &options))
        }
        OutputFormat::Json => serde_json::to_string_pretty(nodes)
            .map(|json| json + "\n")
            .map_err(|e| format!("JSON serialization failed: {}", e)),
        OutputFormat::Yaml => {
            serde_yaml::to_string(nodes).map_err(|e| format!("YAML serialization failed: {}", e))
        }
    }
}

/// Handle the parse command
fn handle_parse_command(path: &str, split: bool, config: &TmarkConfig) -> Result<(), String> {
    let source = read_source(path)?;

    if !split {
        let blocks = parse_source(&source, config);
        let nodes: Vec<_> = blocks.iter().map(AstNode::Block).collect();
        print!("{}", render(&nodes, config)?);
        return Ok(());
    }

    let mut parser = Parser::with_options(&source, config.parser_options());
    for (index, (text, block)) in parser.parse_blocks_split().enumerate() {
        println!("--- block {} ---", index);
        println!("{}", text.trim_end_matches('\n'));
        print!("{}", render(&[AstNode::Block(&block)], config)?);
    }
    Ok(())
}

/// Handle the filter command
fn handle_filter_command(
    query: &str,
    file: Option<&str>,
    config: &TmarkConfig,
) -> Result<(), String> {
    let filter = parse_filter(query).ok_or_else(|| format!("Invalid filter: {}", query))?;

    let Some(path) = file else {
        println!("{}", filter_to_string(&filter));
        return Ok(());
    };

    let source = read_source(path)?;
    let scorer = SubsequenceScorer;
    for block in parse_source(&source, config) {
        if matches_block(&filter, &block, &scorer) {
            println!("{}", &source[block.start..block.end].trim_end_matches('\n'));
        }
    }
    Ok(())
}

/// Handle the locate command
fn handle_locate_command(path: &str, offset: isize, config: &TmarkConfig) -> Result<(), String> {
    let source = read_source(path)?;
    let blocks = parse_source(&source, config);
    let path = idx_to_ast_path(offset, &blocks);
    if path.is_empty() {
        return Err(format!("No node at offset {}", offset));
    }
    for (depth, node) in path.iter().enumerate() {
        println!(
            "{}{} {}..{}",
            "  ".repeat(depth),
            node.node_type(),
            node.start(),
            node.end()
        );
    }
    Ok(())
}
