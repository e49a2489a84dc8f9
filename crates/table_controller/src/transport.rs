//! Row fetching seam plus a reqwest-backed implementation for JSON:API
//! style collection endpoints (`{ data: [...], meta: { total_items } }`).

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::domain::{FilterValue, QueryParams, RowPage};
use tracing::debug;
use url::Url;

#[async_trait]
pub trait RowFetcher: Send + Sync {
    /// Fetches the whole collection in one page of at most `limit` rows.
    async fn fetch_all(&self, identifier: Option<&str>, limit: u32) -> Result<RowPage>;
    async fn fetch_page(&self, identifier: Option<&str>, params: &QueryParams) -> Result<RowPage>;
}

pub struct MissingRowFetcher;

#[async_trait]
impl RowFetcher for MissingRowFetcher {
    async fn fetch_all(&self, _identifier: Option<&str>, _limit: u32) -> Result<RowPage> {
        Err(anyhow!("no row source configured"))
    }

    async fn fetch_page(&self, _identifier: Option<&str>, _params: &QueryParams) -> Result<RowPage> {
        Err(anyhow!("no row source configured"))
    }
}

pub struct HttpRowFetcher {
    http: Client,
    base_url: Url,
    collection_path: String,
}

impl HttpRowFetcher {
    /// `collection_path` is resolved against `base_url` and may contain an
    /// `{id}` placeholder for the identifier, e.g. `packages/{id}/systems`.
    pub fn new(base_url: &str, collection_path: impl Into<String>) -> Result<Self> {
        Self::with_client(Client::new(), base_url, collection_path)
    }

    pub fn with_client(
        http: Client,
        base_url: &str,
        collection_path: impl Into<String>,
    ) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&normalized).with_context(|| format!("invalid api base url '{base_url}'"))?;
        Ok(Self {
            http,
            base_url,
            collection_path: collection_path.into(),
        })
    }

    fn collection_url(&self, identifier: Option<&str>) -> Result<Url> {
        let path = self.collection_path.trim_start_matches('/');
        let path = if path.contains("{id}") {
            let identifier = identifier
                .filter(|identifier| !identifier.is_empty())
                .ok_or_else(|| anyhow!("collection path '{path}' requires an identifier"))?;
            path.replace("{id}", identifier)
        } else {
            path.to_string()
        };
        self.base_url
            .join(&path)
            .with_context(|| format!("invalid collection path '{path}'"))
    }

    async fn get_page(&self, url: Url, query: Vec<(String, String)>) -> Result<RowPage> {
        debug!(url = %url, params = query.len(), "fetching rows");
        let page = self
            .http
            .get(url.clone())
            .query(&query)
            .send()
            .await
            .with_context(|| format!("failed to reach {url}"))?
            .error_for_status()?
            .json::<RowPage>()
            .await
            .with_context(|| format!("malformed row page from {url}"))?;
        Ok(page)
    }
}

#[async_trait]
impl RowFetcher for HttpRowFetcher {
    async fn fetch_all(&self, identifier: Option<&str>, limit: u32) -> Result<RowPage> {
        let url = self.collection_url(identifier)?;
        self.get_page(url, vec![("limit".to_string(), limit.to_string())])
            .await
    }

    async fn fetch_page(&self, identifier: Option<&str>, params: &QueryParams) -> Result<RowPage> {
        let url = self.collection_url(identifier)?;
        self.get_page(url, query_pairs(params)).await
    }
}

pub fn query_pairs(params: &QueryParams) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("limit".to_string(), params.limit.to_string()),
        ("offset".to_string(), params.offset.to_string()),
    ];
    if let Some(sort) = params.sort.as_ref().filter(|sort| !sort.is_empty()) {
        pairs.push(("sort".to_string(), sort.clone()));
    }
    if !params.search.is_empty() {
        pairs.push(("search".to_string(), params.search.clone()));
    }
    for (category, value) in &params.filter {
        if value.is_empty() {
            continue;
        }
        let joined = match value {
            FilterValue::List(values) => values.join(","),
            FilterValue::Scalar(value) => value.clone(),
        };
        pairs.push((format!("filter[{category}]"), joined));
    }
    pairs
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
