//! Nextree CLI
//!
//! One-shot analysis over a Nextstrain `ncov` dataset and its Newick tree:
//! - fetch the dataset JSON (or reuse the local cache),
//! - join per-node epidemiological metadata onto the tree,
//! - classify every parent→child edge as local or international,
//! - enrich international events with descendant proportions,
//! - export TSV tables and a GraphML rendering of the tree.
//!
//! With no arguments it runs against the fixed default filenames:
//! `ncov.json` cache, `nextstrain_ncov_global_tree.nwk` input, outputs in
//! the working directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nextree_cli::fetch::DEFAULT_DATASET_URL;
use nextree_cli::pipeline::{self, PipelineOptions};
use nextree_cli::report;

#[derive(Parser)]
#[command(name = "nextree")]
#[command(
    author,
    version,
    about = "Classify cross-border transmission events in a Nextstrain phylogeny"
)]
struct Cli {
    /// Dataset cache file; reused verbatim when it already exists.
    #[arg(long, default_value = "ncov.json")]
    dataset_cache: PathBuf,

    /// Dataset endpoint, fetched only on a cache miss.
    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    dataset_url: String,

    /// Newick tree with branch lengths in units of divergence.
    #[arg(long, default_value = "nextstrain_ncov_global_tree.nwk")]
    tree: PathBuf,

    /// Directory for the TSV tables and the GraphML file.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let output = pipeline::run(&PipelineOptions {
        dataset_cache: cli.dataset_cache,
        dataset_url: cli.dataset_url,
        tree_path: cli.tree,
        out_dir: cli.out_dir,
    })?;

    report::print_international_events(&output.edges.international_events);
    Ok(())
}
