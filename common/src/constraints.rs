//! Shared constraint-set model consumed by the catalog engine.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::filter::MetaPredicate;


/// Logical AND of everything that scopes the product listing: post
/// type/status scope, taxonomy terms, free-text search, and metadata
/// predicates keyed by filter id (re-adding a filter overwrites).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintSet {
    pub post_type: String,
    pub post_status: String,
    pub taxonomy_terms: BTreeMap<String, BTreeSet<String>>,
    pub search_text: String,
    pub meta_filters: BTreeMap<String, MetaPredicate>,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        ConstraintSet {
            post_type: "product".to_string(),
            post_status: "publish".to_string(),
            taxonomy_terms: BTreeMap::new(),
            search_text: String::new(),
            meta_filters: BTreeMap::new(),
        }
    }
}

impl ConstraintSet {
    pub fn with_taxonomy_term(mut self, taxonomy: &str, term: &str) -> Self {
        self.taxonomy_terms
            .entry(taxonomy.to_string())
            .or_insert_with(BTreeSet::new)
            .insert(term.to_string());
        self
    }

    pub fn with_search_text(mut self, text: &str) -> Self {
        self.search_text = text.to_string();
        self
    }
}
