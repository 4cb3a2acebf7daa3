//! Filter definitions and metadata predicates.

use serde::{Deserialize, Serialize};


/// A single metadata value as stored on a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialOrd, Ord, PartialEq, Eq)]
pub enum MetaValue {
    String(String),
    Int(i64),
    List(Vec<MetaValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compare {
    Equal,
    NotEqual,
    In,
}

/// Opaque predicate descriptor handed through to the catalog engine.
/// `Compare::In` expects `value` to be a `MetaValue::List`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaPredicate {
    pub key: String,
    pub value: MetaValue,
    pub compare: Compare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDefinition {
    pub id: String,
    pub kind: FilterKind,
    pub default_on: bool,
    pub label: String,
    pub predicate: MetaPredicate,
}

impl FilterDefinition {
    pub fn checkbox(id: &str, label: &str, predicate: MetaPredicate) -> Self {
        FilterDefinition {
            id: id.to_string(),
            kind: FilterKind::Checkbox,
            default_on: false,
            label: label.to_string(),
            predicate,
        }
    }
}
