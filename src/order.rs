// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

//! Sort specification engine.
//!
//! A sort spec is a comma-separated list of field names, each optionally
//! prefixed with `+`/`>` (ascending) or `-`/`<` (descending). Terms apply
//! in sequence: the first is the primary key, later terms break ties, and
//! full ties keep their original relative order (stable sort).
//!
//! Unlike the filter engine, field resolution here degrades silently: a
//! missing field compares as null. There is no error path for a bad field
//! name.

use std::cmp::Ordering;

use anyhow::Result;
use serde_json::Value;

use crate::fields::stringify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
pub struct SortTerm {
    pub field: String,
    pub direction: SortDirection,
}

/// An ordered sequence of sort terms, built once per query.
#[derive(Debug, Clone, Default)]
pub struct Sorter {
    terms: Vec<SortTerm>,
}

impl Sorter {
    /// Parse a sort specification. Never fails: unknown prefixes default to
    /// ascending and empty terms are skipped.
    pub fn parse(spec: &str) -> Sorter {
        let mut terms = Vec::new();
        for term in spec.split(',') {
            let (direction, field) = match term.chars().next() {
                Some('+') | Some('>') => (SortDirection::Ascending, &term[1..]),
                Some('-') | Some('<') => (SortDirection::Descending, &term[1..]),
                _ => (SortDirection::Ascending, term),
            };
            if field.is_empty() {
                continue;
            }
            terms.push(SortTerm {
                field: field.to_string(),
                direction,
            });
        }
        Sorter { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Stably sort a collection; anything that is not a collection is
    /// returned unchanged.
    pub fn process(&self, data: Value) -> Result<Value> {
        let mut items = match data {
            Value::Array(items) => items,
            single => return Ok(single),
        };

        items.sort_by(|a, b| self.compare(a, b));
        Ok(Value::Array(items))
    }

    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for term in &self.terms {
            let left = a.get(&term.field).unwrap_or(&Value::Null);
            let right = b.get(&term.field).unwrap_or(&Value::Null);

            let ordering = match term.direction {
                SortDirection::Ascending => compare_values(left, right),
                SortDirection::Descending => compare_values(right, left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Type-aware comparison: unsigned pairs and signed pairs compare
/// numerically, everything else falls back to lexicographic comparison of
/// the stringified values.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    stringify(a).cmp(&stringify(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_prefixes() {
        let sorter = Sorter::parse("+One,-Two,>Three,<Four,Five");
        let dirs: Vec<_> = sorter.terms.iter().map(|t| t.direction).collect();
        assert_eq!(
            dirs,
            vec![
                SortDirection::Ascending,
                SortDirection::Descending,
                SortDirection::Ascending,
                SortDirection::Descending,
                SortDirection::Ascending,
            ]
        );
        assert_eq!(sorter.terms[0].field, "One");
        assert_eq!(sorter.terms[3].field, "Four");
    }

    #[test]
    fn test_parse_never_fails() {
        assert!(Sorter::parse("").is_empty());
        assert!(Sorter::parse(",,,").is_empty());
        assert_eq!(Sorter::parse("-").terms.len(), 0);
    }

    #[test]
    fn test_multi_key_with_stability() {
        let data = json!([
            {"One": "a", "Two": "x"},
            {"One": "b", "Two": "a"},
            {"One": "a", "Two": "c"},
            {"One": "a", "Two": "b"},
            {"One": "a", "Two": "a"},
        ]);
        let sorted = Sorter::parse("+One,-Two").process(data).unwrap();
        let items = sorted.as_array().unwrap();
        let keys: Vec<(&str, &str)> = items
            .iter()
            .map(|i| (i["One"].as_str().unwrap(), i["Two"].as_str().unwrap()))
            .collect();
        assert_eq!(
            keys,
            vec![("a", "x"), ("a", "c"), ("a", "b"), ("a", "a"), ("b", "a")]
        );
    }

    #[test]
    fn test_unsigned_numeric_order() {
        // 10 sorts after 2: numeric, not lexicographic
        let data = json!([
            {"Three": 10, "One": "a"},
            {"Three": 2, "One": "b"},
            {"Three": 100, "One": "c"},
        ]);
        let sorted = Sorter::parse("Three,One").process(data).unwrap();
        let values: Vec<u64> = sorted
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["Three"].as_u64().unwrap())
            .collect();
        assert_eq!(values, vec![2, 10, 100]);
    }

    #[test]
    fn test_signed_numeric_order() {
        let data = json!([{"n": 5}, {"n": -3}, {"n": 0}]);
        let sorted = Sorter::parse("n").process(data).unwrap();
        let values: Vec<i64> = sorted
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["n"].as_i64().unwrap())
            .collect();
        assert_eq!(values, vec![-3, 0, 5]);
    }

    #[test]
    fn test_descending() {
        let data = json!([{"n": 1}, {"n": 3}, {"n": 2}]);
        let sorted = Sorter::parse("-n").process(data).unwrap();
        let values: Vec<u64> = sorted
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["n"].as_u64().unwrap())
            .collect();
        assert_eq!(values, vec![3, 2, 1]);
    }

    #[test]
    fn test_missing_field_degrades_silently() {
        // Absent fields compare as null ("" when stringified); no error.
        let data = json!([{"a": "x"}, {"b": "y"}]);
        let sorted = Sorter::parse("a").process(data).unwrap();
        let items = sorted.as_array().unwrap();
        assert_eq!(items.len(), 2);
        // The record without "a" sorts first ("" < "x")
        assert_eq!(items[0], json!({"b": "y"}));
    }

    #[test]
    fn test_noop_on_scalar() {
        let record = json!({"One": "a"});
        let result = Sorter::parse("One").process(record.clone()).unwrap();
        assert_eq!(result, record);
    }

    #[test]
    fn test_idempotent() {
        let data = json!([{"n": 3}, {"n": 1}, {"n": 2}]);
        let sorter = Sorter::parse("n");
        let once = sorter.process(data).unwrap();
        let twice = sorter.process(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_floats_fall_back_to_string_compare() {
        // Floats are not numeric here; they compare lexicographically.
        let data = json!([{"f": 10.0}, {"f": 2.0}]);
        let sorted = Sorter::parse("f").process(data).unwrap();
        let items = sorted.as_array().unwrap();
        assert_eq!(items[0]["f"], 10.0);
    }
}
