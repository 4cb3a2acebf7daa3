//! Catalog engine boundary: the collaborator that executes listing and
//! count queries against the product store.

use std::collections::BTreeMap;

use common::constraints::ConstraintSet;

mod memory;
pub use memory::{MemoryCatalog, ProductRecord};

mod sql;
pub use sql::SqlCatalog;


/// What the widget needs from the host's catalog engine: count-only
/// aggregate results for a constraint set, without materializing
/// product records.
pub trait CatalogEngine {
    fn count_products(
        &self,
        constraints: &ConstraintSet,
    ) -> impl Future<Output = anyhow::Result<u64>> + Send;

    /// Counts every request in as few round trips as the engine allows.
    /// The default body issues the independent counts concurrently;
    /// engines with a batching capability override this with a single
    /// round trip. Either way the resulting mapping is identical.
    fn count_products_batch(
        &self,
        requests: &[(String, ConstraintSet)],
    ) -> impl Future<Output = anyhow::Result<BTreeMap<String, u64>>> + Send
    where
        Self: Sync,
    {
        async move {
            let counted = futures::future::try_join_all(requests.iter().map(
                |(filter_id, constraints)| async move {
                    let count = self.count_products(constraints).await?;
                    Ok::<_, anyhow::Error>((filter_id.clone(), count))
                },
            ))
            .await?;
            Ok(counted.into_iter().collect())
        }
    }
}

impl<E: CatalogEngine + Send + Sync> CatalogEngine for std::sync::Arc<E> {
    fn count_products(
        &self,
        constraints: &ConstraintSet,
    ) -> impl Future<Output = anyhow::Result<u64>> + Send {
        (**self).count_products(constraints)
    }

    fn count_products_batch(
        &self,
        requests: &[(String, ConstraintSet)],
    ) -> impl Future<Output = anyhow::Result<BTreeMap<String, u64>>> + Send {
        (**self).count_products_batch(requests)
    }
}
