//! In-memory catalog engine used by the demo host and the tests.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::RwLock;

use anyhow::anyhow;
use common::constraints::ConstraintSet;
use common::filter::{Compare, MetaPredicate, MetaValue};

use super::CatalogEngine;


#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: String,
    pub post_type: String,
    pub post_status: String,
    pub taxonomy_terms: BTreeMap<String, BTreeSet<String>>,
    pub search_text: String,
    pub meta: BTreeMap<String, MetaValue>,
}

impl ProductRecord {
    pub fn published(id: &str, search_text: &str) -> Self {
        ProductRecord {
            id: id.to_string(),
            post_type: "product".to_string(),
            post_status: "publish".to_string(),
            taxonomy_terms: BTreeMap::new(),
            search_text: search_text.to_string(),
            meta: BTreeMap::new(),
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.post_status = status.to_string();
        self
    }

    pub fn with_term(mut self, taxonomy: &str, term: &str) -> Self {
        self.taxonomy_terms
            .entry(taxonomy.to_string())
            .or_insert_with(BTreeSet::new)
            .insert(term.to_string());
        self
    }

    pub fn with_meta(mut self, key: &str, value: MetaValue) -> Self {
        self.meta.insert(key.to_string(), value);
        self
    }
}

/// Product store backed by a plain vector. Batched counts walk a single
/// read-locked snapshot so per-filter counts are mutually consistent.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<Vec<ProductRecord>>,
}

impl MemoryCatalog {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        MemoryCatalog {
            products: RwLock::new(products),
        }
    }

    pub fn insert(&self, product: ProductRecord) {
        if let Ok(mut products) = self.products.write() {
            products.push(product);
        }
    }

    /// Materializes the records matching `constraints`, for the host's
    /// listing page. Not part of the engine trait: the widget itself
    /// only ever asks for counts.
    pub fn list_products(&self, constraints: &ConstraintSet) -> Vec<ProductRecord> {
        match self.products.read() {
            Ok(products) => products
                .iter()
                .filter(|p| record_matches(p, constraints))
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn count_snapshot(
        products: &[ProductRecord],
        constraints: &ConstraintSet,
    ) -> u64 {
        let distinct = products
            .iter()
            .filter(|p| record_matches(p, constraints))
            .map(|p| p.id.as_str())
            .collect::<HashSet<_>>();
        distinct.len() as u64
    }
}

impl CatalogEngine for MemoryCatalog {
    async fn count_products(&self, constraints: &ConstraintSet) -> anyhow::Result<u64> {
        let products = self
            .products
            .read()
            .map_err(|_| anyhow!("catalog store lock poisoned"))?;
        Ok(MemoryCatalog::count_snapshot(&products, constraints))
    }

    async fn count_products_batch(
        &self,
        requests: &[(String, ConstraintSet)],
    ) -> anyhow::Result<std::collections::BTreeMap<String, u64>> {
        // one lock acquisition for the whole batch: every filter's count
        // reflects the same store snapshot
        let products = self
            .products
            .read()
            .map_err(|_| anyhow!("catalog store lock poisoned"))?;
        Ok(requests
            .iter()
            .map(|(filter_id, constraints)| {
                (
                    filter_id.clone(),
                    MemoryCatalog::count_snapshot(&products, constraints),
                )
            })
            .collect())
    }
}

fn record_matches(product: &ProductRecord, constraints: &ConstraintSet) -> bool {
    if !constraints.post_type.is_empty() && product.post_type != constraints.post_type {
        return false;
    }
    if !constraints.post_status.is_empty() && product.post_status != constraints.post_status {
        return false;
    }
    for (taxonomy, wanted) in &constraints.taxonomy_terms {
        let present = match product.taxonomy_terms.get(taxonomy) {
            Some(terms) => wanted.iter().any(|t| terms.contains(t)),
            None => false,
        };
        if !present {
            return false;
        }
    }
    if !constraints.search_text.is_empty() {
        let needle = constraints.search_text.to_lowercase();
        if !product.search_text.to_lowercase().contains(&needle) {
            return false;
        }
    }
    constraints
        .meta_filters
        .values()
        .all(|predicate| predicate_matches(product.meta.get(&predicate.key), predicate))
}

fn predicate_matches(stored: Option<&MetaValue>, predicate: &MetaPredicate) -> bool {
    match predicate.compare {
        Compare::Equal => stored == Some(&predicate.value),
        // a product without the key cannot satisfy a != comparison,
        // matching a metadata join on the key
        Compare::NotEqual => match stored {
            Some(value) => *value != predicate.value,
            None => false,
        },
        Compare::In => match (stored, &predicate.value) {
            (Some(value), MetaValue::List(candidates)) => candidates.contains(value),
            _ => false,
        },
    }
}
