//! Edge classification: one pre-order pass over the tree.

use nextree_ingest::MetadataTable;
use nextree_tree::Tree;

use crate::TreeEdge;

/// Classified edges in tree pre-order. Every non-root node lands in
/// exactly one of the two lists.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedEdges {
    pub local_pairs: Vec<TreeEdge>,
    pub international_events: Vec<TreeEdge>,
}

/// Walk the tree in pre-order, visiting every node except the root, and
/// classify each parent→child edge by the country comparison.
///
/// A node absent from the metadata table yields `None` for all its joined
/// fields rather than an error; the comparison then runs on the `None`s.
pub fn classify_edges(tree: &Tree, metadata: &MetadataTable) -> ClassifiedEdges {
    let mut edges = ClassifiedEdges::default();
    for id in tree.preorder() {
        let Some(parent) = tree.parent(id) else {
            continue;
        };
        let record = metadata.resolve(tree.name(id));
        let edge = TreeEdge {
            parent_strain: tree.name(parent).to_string(),
            strain: tree.name(id).to_string(),
            parent_country: record.and_then(|r| r.parent_country.clone()),
            country: record.map(|r| r.country.clone()),
            date: record.map(|r| r.date),
            date_lower: record.map(|r| r.date_lower),
            date_upper: record.map(|r| r.date_upper),
            div: record.map(|r| r.div),
            country_entropy: record.and_then(|r| r.country_entropy),
            branch_length: tree.dist(id),
            desc_count: None,
            total_proportion: None,
            country_proportion: None,
        };
        if edge.is_local() {
            edges.local_pairs.push(edge);
        } else {
            edges.international_events.push(edge);
        }
    }
    tracing::info!(
        local = edges.local_pairs.len(),
        international = edges.international_events.len(),
        "classified tree edges"
    );
    edges
}
