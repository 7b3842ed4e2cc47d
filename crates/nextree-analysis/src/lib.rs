//! Transmission analysis over a metadata-joined phylogenetic tree.
//!
//! The core join: walk the Newick tree in pre-order, resolve each non-root
//! node (and its cached parent-country context) through the metadata
//! table, and classify every parent→child edge as either a *local pair*
//! (inferred country unchanged) or an *international event* (country
//! changes across the edge). International events are then enriched with
//! descendant-count proportions as a proxy for the downstream impact of an
//! introduction.

pub mod classify;
pub mod proportions;

#[cfg(test)]
mod tests_support;

pub use classify::{classify_edges, ClassifiedEdges};
pub use proportions::{country_counts, enrich_international_events};

use nextree_tree::TreeError;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// An international event names a source strain the tree does not
    /// contain. The event list was derived from the same tree, so this is
    /// a logic fault, not a recoverable ambiguity.
    #[error("event source `{0}` not found in tree")]
    UnknownSource(String),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// One directed parent→child tree edge joined with node metadata.
///
/// `country` is the child's own country, re-resolved through the metadata
/// table at classification time; `parent_country` is the context the
/// extractor cached on the child's record. The two come from independent
/// structures (Newick tree vs. dataset document) and may legitimately
/// disagree when those disagree on topology.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEdge {
    pub parent_strain: String,
    pub strain: String,
    pub parent_country: Option<String>,
    pub country: Option<String>,
    pub date: Option<f64>,
    pub date_lower: Option<f64>,
    pub date_upper: Option<f64>,
    pub div: Option<f64>,
    pub country_entropy: Option<f64>,
    /// Newick branch length for the child node; distinct from `div`.
    pub branch_length: f64,
    /// Size of the source node's full subtree. Set by enrichment,
    /// international events only.
    pub desc_count: Option<usize>,
    /// `desc_count / N`, N = total tree node count, root included.
    pub total_proportion: Option<f64>,
    /// Descendants resolving to the destination country, over that
    /// country's system-wide node count. `None` when the denominator is
    /// zero.
    pub country_proportion: Option<f64>,
}

impl TreeEdge {
    /// Country unchanged across the edge. Missing countries compare like
    /// any other value: two unresolved sides count as local, one
    /// unresolved side against a label counts as international.
    pub fn is_local(&self) -> bool {
        self.country == self.parent_country
    }
}
