// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

//! Filter expression engine.
//!
//! A filter is a comma-separated list of `<field><op><value>` terms, e.g.
//! `adminState=ENABLED,serialNumber~^ALPHA`. All terms must match for a
//! record to pass (logical AND); a term whose field resolves to an array
//! matches if any element matches. Field paths may be dotted to reach into
//! nested records.

use std::collections::HashMap;
use std::sync::OnceLock;

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use serde_json::Value;

use crate::fields::stringify;

/// Comparison operation for a single filter term.
///
/// Only `Eq`, `Ne`, and `Re` are enforced today. The relational operators
/// are accepted by the grammar and parsed into real values, but evaluation
/// treats them as always-true. Callers rely on this leniency; changing it
/// is a behavior change, not a bug fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Re,
    Unknown,
}

impl Operation {
    fn from_token(token: &str) -> Operation {
        match token {
            "=" => Operation::Eq,
            "!=" => Operation::Ne,
            ">" => Operation::Gt,
            "<" => Operation::Lt,
            ">=" => Operation::Ge,
            "<=" => Operation::Le,
            "~" => Operation::Re,
            _ => Operation::Unknown,
        }
    }
}

/// One parsed filter term. `regex` is set iff `op` is `Re`.
#[derive(Debug, Clone)]
pub struct FilterTerm {
    pub op: Operation,
    pub value: String,
    regex: Option<Regex>,
}

/// A set of filter terms keyed by field path, AND-ed together.
///
/// Built once from an expression string, then applied to every record of a
/// query via [`Filter::process`].
#[derive(Debug, Clone, Default)]
pub struct Filter {
    terms: HashMap<String, FilterTerm>,
}

fn term_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([a-zA-Z_][.a-zA-Z0-9_]*)\s*(~|<=|>=|<|>|!=|=)\s*(.+)\s*$")
            .expect("invalid filter term pattern")
    })
}

impl Filter {
    /// Parse a comma-separated filter expression.
    ///
    /// Each term must match `<field><op><value>`; a term that does not is a
    /// parse error. A `~` value is compiled as a regular expression and bad
    /// patterns are rejected here, not at evaluation time.
    pub fn parse(spec: &str) -> Result<Filter> {
        let mut terms = HashMap::new();
        for term in spec.split(',') {
            let captures = term_pattern()
                .captures(term)
                .ok_or_else(|| anyhow!("unable to parse filter term '{}'", term))?;

            let field = captures[1].to_string();
            let op = Operation::from_token(&captures[2]);
            let value = captures[3].to_string();

            let regex = if op == Operation::Re {
                Some(
                    Regex::new(&value)
                        .with_context(|| format!("invalid regex in filter term '{}'", term))?,
                )
            } else {
                None
            };

            terms.insert(field, FilterTerm { op, value, regex });
        }
        Ok(Filter { terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Apply the filter to a collection or a single record.
    ///
    /// Collections return the matching sub-collection with relative order
    /// preserved. A single record returns itself on match and `Null`
    /// otherwise; a scalar result is never wrapped in a collection.
    pub fn process(&self, data: Value) -> Result<Value> {
        match data {
            Value::Array(items) => {
                let mut matched = Vec::new();
                for item in items {
                    if self.evaluate(&item)? {
                        matched.push(item);
                    }
                }
                Ok(Value::Array(matched))
            }
            single => {
                if self.evaluate(&single)? {
                    Ok(single)
                } else {
                    Ok(Value::Null)
                }
            }
        }
    }

    /// A record matches iff every term matches its corresponding field.
    pub fn evaluate(&self, record: &Value) -> Result<bool> {
        for (path, term) in &self.terms {
            let leaf = resolve(record, path)?;
            match leaf {
                Value::Object(_) => {
                    return Err(anyhow!("cannot filter on a field that is a struct"));
                }
                // An array leaf matches if any element does.
                Value::Array(items) => {
                    if !items.iter().any(|item| test_field(term, item)) {
                        return Ok(false);
                    }
                }
                scalar => {
                    if !test_field(term, scalar) {
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }
}

/// Strict field resolution for filtering: every path segment must exist,
/// and intermediate segments must be records.
fn resolve<'a>(record: &'a Value, path: &str) -> Result<&'a Value> {
    match path.split_once('.') {
        Some((head, tail)) => {
            let object = record
                .as_object()
                .ok_or_else(|| anyhow!("dotted field '{}' did not resolve to a struct", head))?;
            let next = object
                .get(head)
                .ok_or_else(|| anyhow!("failed to find field '{}'", head))?;
            resolve(next, tail)
        }
        None => record
            .as_object()
            .ok_or_else(|| anyhow!("dotted field '{}' did not resolve to a struct", path))?
            .get(path)
            .ok_or_else(|| anyhow!("failed to find field '{}'", path)),
    }
}

fn test_field(term: &FilterTerm, value: &Value) -> bool {
    let text = stringify(value);
    match term.op {
        Operation::Re => term
            .regex
            .as_ref()
            .map(|re| re.is_match(&text))
            .unwrap_or(false),
        Operation::Eq => text == term.value,
        Operation::Ne => text != term.value,
        // Gt/Lt/Ge/Le and Unknown are accepted but not enforced.
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single_term() {
        let filter = Filter::parse("One=a").unwrap();
        assert_eq!(filter.terms.len(), 1);
        assert_eq!(filter.terms["One"].op, Operation::Eq);
        assert_eq!(filter.terms["One"].value, "a");
    }

    #[test]
    fn test_parse_all_operators() {
        let filter = Filter::parse("a=1,b!=2,c>3,d<4,e>=5,f<=6,g~x").unwrap();
        assert_eq!(filter.terms["a"].op, Operation::Eq);
        assert_eq!(filter.terms["b"].op, Operation::Ne);
        assert_eq!(filter.terms["c"].op, Operation::Gt);
        assert_eq!(filter.terms["d"].op, Operation::Lt);
        assert_eq!(filter.terms["e"].op, Operation::Ge);
        assert_eq!(filter.terms["f"].op, Operation::Le);
        assert_eq!(filter.terms["g"].op, Operation::Re);
        assert!(filter.terms["g"].regex.is_some());
    }

    #[test]
    fn test_parse_bad_term() {
        assert!(Filter::parse("no-operator-here").is_err());
        assert!(Filter::parse("One=a,").is_err());
        assert!(Filter::parse("=value").is_err());
    }

    #[test]
    fn test_parse_bad_regex() {
        assert!(Filter::parse("One~(qs*").is_err());
    }

    #[test]
    fn test_and_semantics() {
        let filter = Filter::parse("One=a,Two=b").unwrap();
        let hit = json!({"One": "a", "Two": "b", "Three": "c"});
        let miss = json!({"One": "1", "Two": "2", "Three": "3"});
        let partial = json!({"One": "a", "Two": "x", "Three": "c"});

        assert!(filter.evaluate(&hit).unwrap());
        assert!(!filter.evaluate(&miss).unwrap());
        assert!(!filter.evaluate(&partial).unwrap());
    }

    #[test]
    fn test_process_collection() {
        let filter = Filter::parse("state=ENABLED").unwrap();
        let data = json!([
            {"id": "d1", "state": "ENABLED"},
            {"id": "d2", "state": "DISABLED"},
            {"id": "d3", "state": "ENABLED"},
        ]);
        let result = filter.process(data).unwrap();
        let items = result.as_array().unwrap();
        assert_eq!(items.len(), 2);
        // Relative order is preserved
        assert_eq!(items[0]["id"], "d1");
        assert_eq!(items[1]["id"], "d3");
    }

    #[test]
    fn test_process_single_record() {
        let filter = Filter::parse("One=a").unwrap();

        let matched = filter.process(json!({"One": "a"})).unwrap();
        assert_eq!(matched, json!({"One": "a"}));

        let missed = filter.process(json!({"One": "b"})).unwrap();
        assert_eq!(missed, Value::Null);
    }

    #[test]
    fn test_regex_match() {
        let filter = Filter::parse("One~a").unwrap();
        assert!(filter.evaluate(&json!({"One": "abc"})).unwrap());
        assert!(!filter.evaluate(&json!({"One": "xyz"})).unwrap());
    }

    #[test]
    fn test_relational_operators_always_pass() {
        // Parsed but not enforced: every value must match.
        for spec in ["n>5", "n<5", "n>=5", "n<=5"] {
            let filter = Filter::parse(spec).unwrap();
            assert!(filter.evaluate(&json!({"n": 1})).unwrap(), "{}", spec);
            assert!(filter.evaluate(&json!({"n": 9})).unwrap(), "{}", spec);
            assert!(filter.evaluate(&json!({"n": "x"})).unwrap(), "{}", spec);
        }
    }

    #[test]
    fn test_dotted_path() {
        let filter = Filter::parse("proxy.host=10.0.0.1").unwrap();
        let rec = json!({"proxy": {"host": "10.0.0.1"}});
        assert!(filter.evaluate(&rec).unwrap());
    }

    #[test]
    fn test_dotted_path_into_scalar_errors() {
        let filter = Filter::parse("a.b=1").unwrap();
        let err = filter.evaluate(&json!({"a": 5})).unwrap_err();
        assert!(err.to_string().contains("did not resolve to a struct"));
    }

    #[test]
    fn test_missing_field_errors() {
        let filter = Filter::parse("nope=1").unwrap();
        let err = filter.evaluate(&json!({"One": "a"})).unwrap_err();
        assert!(err.to_string().contains("failed to find field"));
    }

    #[test]
    fn test_struct_leaf_errors() {
        let filter = Filter::parse("proxy=1").unwrap();
        let err = filter.evaluate(&json!({"proxy": {"host": "h"}})).unwrap_err();
        assert!(err.to_string().contains("struct"));
    }

    #[test]
    fn test_array_leaf_any_element() {
        let filter = Filter::parse("tags=b").unwrap();
        assert!(filter.evaluate(&json!({"tags": ["a", "b"]})).unwrap());
        assert!(!filter.evaluate(&json!({"tags": ["x", "y"]})).unwrap());
        assert!(!filter.evaluate(&json!({"tags": []})).unwrap());
    }

    #[test]
    fn test_numeric_fields_compare_as_strings() {
        let filter = Filter::parse("port=10").unwrap();
        assert!(filter.evaluate(&json!({"port": 10})).unwrap());
        assert!(!filter.evaluate(&json!({"port": 100})).unwrap());
    }

    #[test]
    fn test_idempotent_on_filtered_data() {
        let filter = Filter::parse("state=ENABLED").unwrap();
        let data = json!([
            {"state": "ENABLED"},
            {"state": "DISABLED"},
        ]);
        let once = filter.process(data).unwrap();
        let twice = filter.process(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = Filter::default();
        assert!(filter.is_empty());
        assert!(filter.evaluate(&json!({"anything": 1})).unwrap());
    }
}
