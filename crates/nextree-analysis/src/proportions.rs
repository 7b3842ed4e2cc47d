//! Descendant-count proportions for international events.

use std::collections::HashMap;

use nextree_ingest::MetadataTable;
use nextree_tree::Tree;

use crate::{AnalysisError, TreeEdge};

/// Per-country node counts over the whole tree, root included. Nodes the
/// metadata table cannot resolve tally under the `None` key.
pub fn country_counts(tree: &Tree, metadata: &MetadataTable) -> HashMap<Option<String>, usize> {
    let mut counts: HashMap<Option<String>, usize> = HashMap::new();
    for id in tree.preorder() {
        let country = metadata.resolve(tree.name(id)).map(|r| r.country.clone());
        *counts.entry(country).or_insert(0) += 1;
    }
    counts
}

/// Enrich each international event with its source node's subtree size and
/// the two derived proportions:
///
/// - `total_proportion`: subtree size over the total tree node count;
/// - `country_proportion`: descendants resolving to the edge's destination
///   country, over that country's system-wide count (from
///   [`country_counts`]); `None` when that denominator is zero.
///
/// The source strain must match exactly one tree node; zero or multiple
/// matches are hard faults.
pub fn enrich_international_events(
    events: &mut [TreeEdge],
    tree: &Tree,
    metadata: &MetadataTable,
    counts: &HashMap<Option<String>, usize>,
) -> Result<(), AnalysisError> {
    let total_nodes = tree.len();
    for event in events.iter_mut() {
        let source = tree
            .find_by_name(&event.parent_strain)?
            .ok_or_else(|| AnalysisError::UnknownSource(event.parent_strain.clone()))?;

        let mut desc_count = 0usize;
        let mut same_country = 0usize;
        for desc in tree.descendants(source) {
            desc_count += 1;
            let country = metadata.resolve(tree.name(desc)).map(|r| r.country.as_str());
            if country == event.country.as_deref() {
                same_country += 1;
            }
        }

        event.desc_count = Some(desc_count);
        event.total_proportion = Some(desc_count as f64 / total_nodes as f64);
        event.country_proportion = match counts.get(&event.country).copied().unwrap_or(0) {
            0 => None,
            population => Some(same_country as f64 / population as f64),
        };
        tracing::debug!(
            source = %event.parent_strain,
            destination = %event.strain,
            desc_count,
            "enriched international event"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_edges;
    use crate::tests_support::three_node_fixture;
    use approx::assert_relative_eq;

    #[test]
    fn three_node_scenario_proportions() {
        let (tree, table) = three_node_fixture();
        let mut edges = classify_edges(&tree, &table);
        let counts = country_counts(&tree, &table);

        assert_eq!(counts.get(&Some("Australia".to_string())), Some(&2));
        assert_eq!(counts.get(&Some("France".to_string())), Some(&1));

        enrich_international_events(
            &mut edges.international_events,
            &tree,
            &table,
            &counts,
        )
        .unwrap();

        // The only event is child1 (Australia) → child2 (France); its
        // source subtree is just child2.
        let event = &edges.international_events[0];
        assert_eq!(event.desc_count, Some(1));
        assert_relative_eq!(event.total_proportion.unwrap(), 1.0 / 3.0);
        assert_relative_eq!(event.country_proportion.unwrap(), 1.0);
    }

    #[test]
    fn proportions_stay_in_unit_interval() {
        let (tree, table) = three_node_fixture();
        let mut edges = classify_edges(&tree, &table);
        let counts = country_counts(&tree, &table);
        enrich_international_events(
            &mut edges.international_events,
            &tree,
            &table,
            &counts,
        )
        .unwrap();

        for event in &edges.international_events {
            let total = event.total_proportion.unwrap();
            assert!((0.0..=1.0).contains(&total));
            if let Some(country) = event.country_proportion {
                assert!((0.0..=1.0).contains(&country));
            }
        }
    }

    #[test]
    fn zero_population_denominator_yields_none() {
        let (tree, table) = three_node_fixture();
        let mut edges = classify_edges(&tree, &table);
        // Empty tally: every destination country has population zero.
        let counts = HashMap::new();
        enrich_international_events(
            &mut edges.international_events,
            &tree,
            &table,
            &counts,
        )
        .unwrap();

        let event = &edges.international_events[0];
        assert_eq!(event.desc_count, Some(1));
        assert_eq!(event.country_proportion, None);
    }

    #[test]
    fn unknown_event_source_is_a_hard_fault() {
        let (tree, table) = three_node_fixture();
        let counts = country_counts(&tree, &table);
        let mut events = vec![TreeEdge {
            parent_strain: "nonexistent".to_string(),
            strain: "child2".to_string(),
            parent_country: None,
            country: Some("France".to_string()),
            date: None,
            date_lower: None,
            date_upper: None,
            div: None,
            country_entropy: None,
            branch_length: 0.0,
            desc_count: None,
            total_proportion: None,
            country_proportion: None,
        }];
        let err = enrich_international_events(&mut events, &tree, &table, &counts).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownSource(name) if name == "nonexistent"));
    }
}
