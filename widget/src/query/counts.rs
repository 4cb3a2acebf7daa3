//! Per-filter candidate counts against the current listing context.

use common::constraints::ConstraintSet;
use common::counts::FilterCounts;

use crate::catalog::CatalogEngine;
use crate::registry::FilterRegistry;


/// Computes, for every registered filter, how many products would match
/// if that filter alone were toggled on in the current listing context.
///
/// `base` is the main listing scope (taxonomy, search, sibling attribute
/// constraints). Any of this widget's own meta-filters are stripped from
/// it before counting: each count answers "what if only filter F were
/// enabled", independent of the other chosen meta-filters.
///
/// Filter ids missing from the engine's reply count as 0.
pub async fn compute_filter_counts<E: CatalogEngine + Sync>(
    engine: &E,
    registry: &FilterRegistry,
    base: &ConstraintSet,
) -> anyhow::Result<FilterCounts> {
    let mut base = base.clone();
    for definition in registry.iter() {
        base.meta_filters.remove(&definition.id);
    }

    let requests = registry
        .iter()
        .map(|definition| {
            let mut per_filter = base.clone();
            per_filter
                .meta_filters
                .insert(definition.id.clone(), definition.predicate.clone());
            (definition.id.clone(), per_filter)
        })
        .collect::<Vec<_>>();

    let counted = engine.count_products_batch(&requests).await?;

    let mut counts = FilterCounts::default();
    for definition in registry.iter() {
        let count = counted.get(&definition.id).copied().unwrap_or(0);
        counts.counts.insert(definition.id.clone(), count);
    }
    Ok(counts)
}
