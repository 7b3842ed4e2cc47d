//! Shared fixtures for the analysis tests.

use nextree_ingest::{extract_records, Dataset, MetadataTable};
use nextree_tree::Tree;

pub(crate) fn tree_and_table(newick: &str, dataset_json: &str) -> (Tree, MetadataTable) {
    let tree = Tree::from_newick(newick).expect("fixture newick should parse");
    let dataset: Dataset = serde_json::from_str(dataset_json).expect("fixture json should parse");
    let records = extract_records(&dataset.tree.children);
    let table = MetadataTable::from_records(records).expect("fixture records should index");
    (tree, table)
}

/// Three-node chain: root (Australia) → child1 (Australia) → child2
/// (France). The dataset's `tree` object is a wrapper whose children are
/// the extraction roots, so `root` itself carries a record.
pub(crate) fn three_node_fixture() -> (Tree, MetadataTable) {
    tree_and_table(
        "((child2:0.2)child1:0.1)root:0.0;",
        r#"{
          "tree": {
            "name": "wrapper",
            "node_attrs": {
              "div": 0.0,
              "num_date": { "value": 2020.0, "confidence": [2019.9, 2020.1] },
              "country": { "value": "Australia" }
            },
            "children": [
              {
                "name": "root",
                "node_attrs": {
                  "div": 0.0,
                  "num_date": { "value": 2020.0, "confidence": [2019.9, 2020.1] },
                  "country": { "value": "Australia", "entropy": 0.1 }
                },
                "children": [
                  {
                    "name": "child1",
                    "node_attrs": {
                      "div": 1.0,
                      "num_date": { "value": 2020.1, "confidence": [2020.0, 2020.2] },
                      "country": { "value": "Australia", "confidence": { "Australia": 0.9 } }
                    },
                    "children": [
                      {
                        "name": "child2",
                        "node_attrs": {
                          "div": 2.0,
                          "num_date": { "value": 2020.2, "confidence": [2020.1, 2020.3] },
                          "country": { "value": "France", "confidence": { "France": 0.8 } }
                        }
                      }
                    ]
                  }
                ]
              }
            ]
          }
        }"#,
    )
}
