//! Static registry of the filters this widget offers.

use common::filter::{Compare, FilterDefinition, MetaPredicate, MetaValue};


/// Read-only table of available filters, iterated in declaration order.
/// Defined once at process start, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    filters: Vec<FilterDefinition>,
}

impl FilterRegistry {
    pub fn new(filters: Vec<FilterDefinition>) -> Self {
        FilterRegistry { filters }
    }

    /// The filter set shipped with the widget: clearance products and
    /// stock status, both plain product-metadata checkboxes.
    pub fn storefront_defaults() -> Self {
        FilterRegistry::new(vec![
            FilterDefinition::checkbox(
                "clearance",
                "Clearance",
                MetaPredicate {
                    key: "_clearance".to_string(),
                    value: MetaValue::Int(1),
                    compare: Compare::Equal,
                },
            ),
            FilterDefinition::checkbox(
                "in_stock",
                "In Stock",
                MetaPredicate {
                    key: "_stock_status".to_string(),
                    value: MetaValue::String("instock".to_string()),
                    compare: Compare::Equal,
                },
            ),
        ])
    }

    /// Unknown ids return `None`, never an error.
    pub fn get(&self, filter_id: &str) -> Option<&FilterDefinition> {
        self.filters.iter().find(|f| f.id == filter_id)
    }

    pub fn contains(&self, filter_id: &str) -> bool {
        self.get(filter_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterDefinition> {
        self.filters.iter()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_declaration_order() {
        let registry = FilterRegistry::storefront_defaults();
        let ids = registry.iter().map(|f| f.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["clearance", "in_stock"]);
    }

    #[test]
    fn unknown_id_is_absent_not_an_error() {
        let registry = FilterRegistry::storefront_defaults();
        assert!(registry.get("bogus_id").is_none());
        assert!(registry.contains("in_stock"));
    }
}
