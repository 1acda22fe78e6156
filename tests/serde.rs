#![cfg(feature = "serde")]

use radixtree::{Page, RadixTree};

#[test]
fn test_round_trip() {
  let mut original = RadixTree::new();
  original.insert("a", 1).unwrap();
  original.insert("ab", 2).unwrap();
  original.insert("b", 3).unwrap();

  let serialized = serde_json::to_string(&original).unwrap();
  assert_eq!(serialized, r#"{"a":1,"ab":2,"b":3}"#);

  let loaded: RadixTree<i32> = serde_json::from_str(&serialized).unwrap();
  assert_eq!(loaded.len(), 3);
  assert_eq!(loaded.prefix_search("a", Page::ALL), vec![&1, &2]);
  assert_eq!(original, loaded);
}

#[test]
fn test_deep_tree_serializes_flat() {
  // Nested output would trip serde_json's recursion limit long before this depth.
  let tree: RadixTree<usize> = (1..=500).map(|i| ("x".repeat(i), i)).collect();

  let serialized = serde_json::to_string(&tree).unwrap();
  let loaded: RadixTree<usize> = serde_json::from_str(&serialized).unwrap();
  assert_eq!(loaded, tree);
}

#[test]
fn test_malformed_payload() {
  let res: Result<RadixTree<i32>, _> = serde_json::from_str(r#""NotAMap""#);
  assert!(res.is_err());

  let res: Result<RadixTree<i32>, _> = serde_json::from_str(r#"{"a": "one"}"#);
  assert!(res.is_err());
}

#[test]
fn test_empty_key_payload_rejected() {
  let res: Result<RadixTree<i32>, _> = serde_json::from_str(r#"{"a": 1, "": 2}"#);
  let err = res.unwrap_err();
  assert!(err.to_string().contains("empty string"));
}
