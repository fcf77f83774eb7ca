// tests/unit_model.rs
//! Tests for path parsing, id assignment, and set derivation.

use pathvis_core::model::parse_paths;

const BATCH: &str = r#"[
  {
    "nodes": [
      { "id": 1, "type": "gene", "properties": { "name": "A" } },
      { "id": 2, "type": "gene", "properties": { "name": "B" } }
    ],
    "edges": [
      { "id": 10, "properties": { "pathways": ["hsa00310", "hsa00330"], "_idx": 0 } }
    ]
  },
  {
    "nodes": [
      { "id": 2, "type": "gene", "properties": { "name": "B" } },
      { "id": 3, "type": "compound", "properties": { "name": "C" } }
    ],
    "edges": [
      { "id": 11, "properties": { "pathways": "hsa00330" } }
    ]
  }
]"#;

#[test]
fn test_ids_assigned_by_batch_index() {
    let paths = parse_paths(BATCH).expect("parse");
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].id, 0);
    assert_eq!(paths[1].id, 1);
}

#[test]
fn test_sets_derived_excluding_private_keys() {
    let paths = parse_paths(BATCH).expect("parse");
    assert_eq!(
        paths[0].sets,
        vec!["hsa00310".to_string(), "hsa00330".to_string()],
        "List-valued membership expands; underscore keys are ignored"
    );
    assert_eq!(
        paths[1].sets,
        vec!["hsa00330".to_string()],
        "Scalar membership is a single set"
    );
}

#[test]
fn test_edge_count_mismatch_rejected() {
    let bad = r#"[
      {
        "nodes": [ { "id": 1, "type": "gene" } ],
        "edges": [ { "id": 10 } ]
      }
    ]"#;
    assert!(
        parse_paths(bad).is_err(),
        "A path needs exactly nodes-1 edges"
    );
}

#[test]
fn test_malformed_json_rejected() {
    assert!(parse_paths("not json").is_err());
}

#[test]
fn test_sets_deduplicated_across_edges() {
    let batch = r#"[
      {
        "nodes": [
          { "id": 1, "type": "gene" },
          { "id": 2, "type": "gene" },
          { "id": 3, "type": "gene" }
        ],
        "edges": [
          { "id": 10, "properties": { "pathways": "hsa00310" } },
          { "id": 11, "properties": { "pathways": "hsa00310" } }
        ]
      }
    ]"#;
    let paths = parse_paths(batch).expect("parse");
    assert_eq!(paths[0].sets.len(), 1, "Derived set list is deduplicated");
}
