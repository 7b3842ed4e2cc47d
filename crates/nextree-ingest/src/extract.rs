//! Metadata extraction: dataset document → flat node records.

use std::collections::HashSet;

use crate::{CountryAttr, DatasetNode};

/// One flattened tree node, keyed by its unique name.
///
/// The `parent_*` country fields are copied from the immediate parent's
/// country attribute at extraction time, never re-derived later; they are
/// `None` at the extraction roots (the dataset's top-level children).
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub name: String,
    pub parent: Option<String>,
    pub div: f64,
    pub date: f64,
    pub date_lower: f64,
    pub date_upper: f64,
    pub country: String,
    pub country_confidence: Option<f64>,
    pub country_entropy: Option<f64>,
    pub parent_country: Option<String>,
    pub parent_country_confidence: Option<f64>,
    pub parent_country_entropy: Option<f64>,
}

/// Flatten the dataset's node-with-children document into one record per
/// distinct name, in pre-order, keeping the first occurrence of any
/// duplicated name and silently dropping the rest.
pub fn extract_records(nodes: &[DatasetNode]) -> Vec<NodeRecord> {
    let mut rows = Vec::new();
    walk(nodes, None, None, &mut rows);
    let total = rows.len();
    let deduped = dedup_by_name(rows);
    if deduped.len() < total {
        tracing::warn!(
            dropped = total - deduped.len(),
            "dropped records with duplicated names"
        );
    }
    deduped
}

fn walk(
    nodes: &[DatasetNode],
    parent: Option<&str>,
    parent_country: Option<&CountryAttr>,
    rows: &mut Vec<NodeRecord>,
) {
    for node in nodes {
        let attrs = &node.node_attrs;
        let country = &attrs.country;
        rows.push(NodeRecord {
            name: node.name.clone(),
            parent: parent.map(str::to_string),
            div: attrs.div,
            date: attrs.num_date.value,
            date_lower: attrs.num_date.confidence.0,
            date_upper: attrs.num_date.confidence.1,
            country: country.value.clone(),
            country_confidence: country.own_confidence(),
            country_entropy: country.entropy,
            parent_country: parent_country.map(|c| c.value.clone()),
            parent_country_confidence: parent_country.and_then(CountryAttr::own_confidence),
            parent_country_entropy: parent_country.and_then(|c| c.entropy),
        });
        if !node.children.is_empty() {
            walk(&node.children, Some(&node.name), Some(country), rows);
        }
    }
}

fn dedup_by_name(rows: Vec<NodeRecord>) -> Vec<NodeRecord> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| seen.insert(row.name.clone()))
        .collect()
}
