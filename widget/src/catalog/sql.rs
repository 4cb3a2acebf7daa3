//! Catalog engine adapter for SQL-over-HTTP product stores.

use std::collections::BTreeMap;

use common::constraints::ConstraintSet;
use serde::{Deserialize, de::DeserializeOwned};

use crate::query::count_sql::{build_batched_count_select, build_single_count_select};

use super::CatalogEngine;


#[derive(Debug, Deserialize)]
struct RawSqlResult<T> {
    hits: RawSqlHits<T>,
}

#[derive(Debug, Deserialize)]
struct RawSqlHits<T> {
    hits: Vec<RawSqlHit<T>>,
}

#[derive(Debug, Deserialize)]
struct RawSqlHit<T> {
    _source: T,
}

#[derive(Debug, Deserialize)]
struct RawTotalCount {
    total_count: u64,
}

/// Engine backed by an SQL endpoint speaking the ES-flavoured JSON row
/// format. All per-filter counts go out as one SELECT of independent
/// scalar subqueries, so the whole batch reads one store snapshot.
#[derive(Debug, Clone)]
pub struct SqlCatalog {
    base_url: String,
    client: reqwest::Client,
}

impl SqlCatalog {
    pub fn new(base_url: String) -> Self {
        SqlCatalog {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CATALOG_SQL_URL").unwrap_or("http://127.0.0.1:9308".to_string());
        SqlCatalog::new(base_url)
    }

    async fn run_sql<T: DeserializeOwned>(&self, sql: String) -> anyhow::Result<RawSqlResult<T>> {
        let url = format!("{}/sql", self.base_url);
        let response = self.client.post(url).body(sql).send().await?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("catalog sql error: {}: {}", status, response_txt);
        }
        let response: RawSqlResult<T> = serde_json::from_str(&response_txt)?;
        Ok(response)
    }
}

impl CatalogEngine for SqlCatalog {
    async fn count_products(&self, constraints: &ConstraintSet) -> anyhow::Result<u64> {
        let sql = build_single_count_select(constraints);
        let response = self.run_sql::<RawTotalCount>(sql).await?;
        let response = response.hits.hits;
        if response.is_empty() {
            return Ok(0);
        }
        Ok(response[0]._source.total_count)
    }

    async fn count_products_batch(
        &self,
        requests: &[(String, ConstraintSet)],
    ) -> anyhow::Result<BTreeMap<String, u64>> {
        if requests.is_empty() {
            return Ok(BTreeMap::new());
        }
        let sql = build_batched_count_select(requests);
        tracing::debug!(sql = %sql, "running batched filter count");
        let response = self.run_sql::<BTreeMap<String, u64>>(sql).await?;
        let mut rows = response.hits.hits;
        if rows.is_empty() {
            // no row back means no products at all; every filter counts 0
            return Ok(BTreeMap::new());
        }
        Ok(rows.remove(0)._source)
    }
}
