use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use fastg_chain::chain::{add_connections, select_chainable, ChainConfig};
use fastg_chain::fastg::load_fastg;
use fastg_chain::parser::read_hits;
use fastg_chain::writer::write_chains;

/// Chain alignment hits on FASTG nodes into hits along graph paths
///
/// Each output line holds a hit followed by the hits that continue it
/// on a successor node, tab-separated.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Overlap length between adjacent nodes (the assembler's k)
    #[arg(short = 'l', long = "overlap", value_parser = clap::value_parser!(u64).range(1..))]
    overlap: u64,

    /// Assembly graph in FASTG format
    #[arg(value_name = "FASTG")]
    fastg: PathBuf,

    /// Tabular alignment hits, nodes as queries
    #[arg(value_name = "HITS")]
    hits: PathBuf,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// How far past a node's end, in subject bases, a continuing hit may start
    #[arg(long = "window-slack", default_value = "50")]
    window_slack: i64,

    /// Minimum identity over the whole node for a hit to be chained
    #[arg(long = "min-identity", default_value = "0.95")]
    min_identity: f64,

    /// Write JSON lines instead of tab-joined hit lines
    #[cfg(feature = "serde1")]
    #[arg(long = "json")]
    json: bool,

    /// Verbosity level (0 = warnings, 1 = info, 2 = debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    let config = ChainConfig::default()
        .with_window_slack(args.window_slack)
        .with_min_coverage_identity(args.min_identity);

    let graph = load_fastg(&args.fastg, args.overlap as usize).with_context(
        || format!("Failed to load graph from {}", args.fastg.display()),
    )?;
    info!(
        "{} nodes, {} edges in {}",
        graph.len(),
        graph.edge_count(),
        args.fastg.display()
    );

    let hits = read_hits(&args.hits).with_context(|| {
        format!("Failed to read hits from {}", args.hits.display())
    })?;
    let total = hits.len();
    let hits = select_chainable(hits, &config);
    info!(
        "{} of {} hits are forward with identity above {}",
        hits.len(),
        total,
        config.min_coverage_identity
    );

    let connections = add_connections(&hits, &graph, &config)
        .context("Failed to chain hits")?;
    info!("{} links made", connections.link_count());

    let file = File::create(&args.output).with_context(|| {
        format!("Failed to create {}", args.output.display())
    })?;
    let mut out = BufWriter::new(file);

    #[cfg(feature = "serde1")]
    {
        if args.json {
            fastg_chain::writer::write_chains_json(
                &mut out,
                &hits,
                &connections,
            )?;
            out.flush()?;
            return Ok(());
        }
    }

    write_chains(&mut out, &hits, &connections)?;
    out.flush()?;

    Ok(())
}
