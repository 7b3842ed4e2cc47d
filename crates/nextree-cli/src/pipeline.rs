//! End-to-end pipeline: dataset → metadata table → classified edges →
//! enrichment → exports.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use nextree_analysis::{classify_edges, country_counts, enrich_international_events, ClassifiedEdges};
use nextree_ingest::{extract_records, MetadataTable};
use nextree_tree::Tree;

use crate::{export, fetch};

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub dataset_cache: PathBuf,
    pub dataset_url: String,
    pub tree_path: PathBuf,
    pub out_dir: PathBuf,
}

pub struct PipelineOutput {
    pub edges: ClassifiedEdges,
    /// Total tree node count, root included.
    pub total_nodes: usize,
}

/// Run the whole analysis. All outputs land in `out_dir`, overwritten on
/// each run; the function is deterministic given the same cache and tree.
pub fn run(opts: &PipelineOptions) -> Result<PipelineOutput> {
    let dataset = fetch::load_dataset(&opts.dataset_cache, &opts.dataset_url)?;
    let records = extract_records(&dataset.tree.children);
    let metadata = MetadataTable::from_records(records).context("indexing node metadata")?;
    tracing::info!(records = metadata.len(), "extracted node metadata");

    let tree = Tree::from_newick_file(&opts.tree_path)?;

    let mut edges = classify_edges(&tree, &metadata);
    let counts = country_counts(&tree, &metadata);
    enrich_international_events(&mut edges.international_events, &tree, &metadata, &counts)
        .context("computing descendant proportions")?;

    fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("creating output directory `{}`", opts.out_dir.display()))?;
    export::write_edges_tsv(
        &opts.out_dir.join("local_pairs.tsv"),
        &edges.local_pairs,
        false,
    )?;
    export::write_edges_tsv(
        &opts.out_dir.join("international_events.tsv"),
        &edges.international_events,
        true,
    )?;
    export::write_graphml(&opts.out_dir.join("nextree_global.graphml"), &tree)?;

    Ok(PipelineOutput {
        edges,
        total_nodes: tree.len(),
    })
}
