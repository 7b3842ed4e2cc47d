//! Nextstrain dataset ingestion (boundary adapter).
//!
//! This crate sits at the **interop boundary**:
//!
//! - It deserializes the Nextstrain `ncov` dataset JSON (untrusted): a
//!   nested node-with-children document carrying per-node epidemiological
//!   attributes (divergence, dated confidence intervals, inferred country
//!   with an optional confidence distribution and entropy).
//! - It flattens that document into one [`NodeRecord`] per distinct node
//!   name, carrying parent linkage and parent-country context forward.
//! - It wraps the flattened records in a keyed [`MetadataTable`] so the
//!   analysis layer can resolve nodes by name without rescanning.
//!
//! Required dataset fields (name, divergence, dated interval, country) are
//! required in the serde model; a document missing any of them fails to
//! deserialize rather than producing a partial table.

pub mod extract;

use serde::Deserialize;
use std::collections::HashMap;

pub use extract::{extract_records, NodeRecord};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The extractor de-duplicates by name, so hitting this while indexing
    /// means the record source bypassed extraction.
    #[error("duplicate node name `{0}` in metadata records")]
    DuplicateName(String),
}

// ============================================================================
// Dataset document model
// ============================================================================

/// Top-level dataset: the `tree` object's `children` array is the
/// extraction root (the `tree` node itself is not materialized as a record).
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub tree: DatasetNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetNode {
    pub name: String,
    pub node_attrs: NodeAttrs,
    #[serde(default)]
    pub children: Vec<DatasetNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeAttrs {
    /// Divergence from the tree root, in substitutions.
    pub div: f64,
    pub num_date: NumDate,
    pub country: CountryAttr,
}

/// Numeric date point estimate with its confidence interval bounds.
#[derive(Debug, Clone, Deserialize)]
pub struct NumDate {
    pub value: f64,
    pub confidence: (f64, f64),
}

/// Inferred country, optionally with the full confidence distribution the
/// geolocation inference produced and its entropy.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryAttr {
    pub value: String,
    #[serde(default)]
    pub confidence: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub entropy: Option<f64>,
}

impl CountryAttr {
    /// Probability of the reported country, when a distribution is present.
    pub fn own_confidence(&self) -> Option<f64> {
        self.confidence
            .as_ref()
            .and_then(|dist| dist.get(&self.value).copied())
    }
}

// ============================================================================
// Lookup index
// ============================================================================

/// Keyed name → record index over the extracted metadata, built once and
/// read-only thereafter.
#[derive(Debug, Clone)]
pub struct MetadataTable {
    records: HashMap<String, NodeRecord>,
}

impl MetadataTable {
    /// Index a record set. A duplicate name is a data-integrity fault:
    /// the extractor already de-duplicated, so this is unreachable for
    /// tables it produced.
    pub fn from_records(records: Vec<NodeRecord>) -> Result<Self, IngestError> {
        let mut table = HashMap::with_capacity(records.len());
        for record in records {
            let name = record.name.clone();
            if table.insert(name.clone(), record).is_some() {
                return Err(IngestError::DuplicateName(name));
            }
        }
        tracing::debug!(records = table.len(), "indexed node metadata");
        Ok(Self { records: table })
    }

    /// Resolve a node by name. Zero matches is a legitimate `None` that
    /// flows into output rows and country comparisons.
    pub fn resolve(&self, name: &str) -> Option<&NodeRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
