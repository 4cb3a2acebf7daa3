//! Merges the chosen filters' predicates into the main listing query.

use common::constraints::ConstraintSet;

use crate::registry::FilterRegistry;
use crate::request::FilterRequest;


/// Returns `base` with each chosen filter's predicate ANDed in, keyed
/// by filter id so repeated application overwrites instead of
/// accumulating. Chosen ids the registry no longer knows are skipped:
/// old bookmarked URLs may reference removed filters.
///
/// The host must run its primary listing query with the returned set.
pub fn augment_constraints(
    base: &ConstraintSet,
    registry: &FilterRegistry,
    request: &FilterRequest,
) -> ConstraintSet {
    let mut constraints = base.clone();
    for filter_id in request.chosen(registry) {
        if let Some(definition) = registry.get(filter_id) {
            constraints
                .meta_filters
                .insert(filter_id.clone(), definition.predicate.clone());
        }
    }
    constraints
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_predicates_keyed_by_filter_id() {
        let registry = FilterRegistry::storefront_defaults();
        let request = FilterRequest::new(Some("in_stock"));
        let augmented = augment_constraints(&ConstraintSet::default(), &registry, &request);
        assert_eq!(augmented.meta_filters.len(), 1);
        let predicate = augmented.meta_filters.get("in_stock").unwrap();
        assert_eq!(predicate.key, "_stock_status");
    }

    #[test]
    fn augmentation_is_idempotent() {
        let registry = FilterRegistry::storefront_defaults();
        let request = FilterRequest::new(Some("clearance,in_stock,clearance"));
        let base = ConstraintSet::default().with_search_text("hoodie");
        let once = augment_constraints(&base, &registry, &request);
        let twice = augment_constraints(&once, &registry, &request);
        assert_eq!(once, twice);
        assert_eq!(once.meta_filters.len(), 2);
    }

    #[test]
    fn base_constraints_are_untouched() {
        let registry = FilterRegistry::storefront_defaults();
        let request = FilterRequest::new(Some("in_stock"));
        let base = ConstraintSet::default().with_taxonomy_term("product_cat", "hoodies");
        let augmented = augment_constraints(&base, &registry, &request);
        assert!(base.meta_filters.is_empty());
        assert_eq!(augmented.taxonomy_terms, base.taxonomy_terms);
    }
}
