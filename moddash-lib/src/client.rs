//! REST client for the hosted database

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::backend::Backend;
use crate::backend::TagEdit;
use crate::backend::check_status;
use crate::backend::distinct_tags;
use crate::cache::CacheConfig;
use crate::cache::LookupCache;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::EntityId;
use crate::model::Platform;
use crate::model::ReviewStatus;
use crate::model::decode_rows;
use crate::query::EntityQuery;
use crate::query::Page;
use crate::response::Response;

/// Client for a PostgREST-style API (`/rest/v1/{table}`).
///
/// Cheap to clone (uses `Arc` internally). Tag vocabularies and counts are
/// cached per client; see [`CacheConfig`].
///
/// # Example
///
/// ```ignore
/// use moddash_lib::ModdashClient;
///
/// let client = ModdashClient::builder()
///     .url("https://project.supabase.co")
///     .api_key("service-key")
///     .build()?;
///
/// client.connect().await?;
/// ```
#[derive(Clone)]
pub struct ModdashClient {
    inner: Arc<ModdashClientInner>,
}

struct ModdashClientInner {
    base_url: Url,
    api_key: String,
    http_client: Client,
    timeout: Option<Duration>,
    cache_config: CacheConfig,
    tag_cache: LookupCache<(Platform, usize), Vec<String>>,
    count_cache: LookupCache<EntityQuery, usize>,
}

#[derive(Debug, Deserialize)]
struct TagsRow {
    tags: Option<Vec<String>>,
}

impl ModdashClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ModdashClientBuilder<Missing, Missing> {
        ModdashClientBuilder::new()
    }

    /// Checks that the API is reachable and the key is accepted.
    pub async fn connect(&self) -> Result<(), Error> {
        let url = self.endpoint("rest/v1/")?;
        self.send(self.http(Method::GET, url)).await?;
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    pub fn cache_config(&self) -> &CacheConfig {
        &self.inner.cache_config
    }

    /// Drops every cached lookup.
    pub fn clear_cache(&self) {
        self.inner.tag_cache.clear();
        self.inner.count_cache.clear();
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)).into())
    }

    fn table_url(&self, platform: Platform) -> Result<Url, Error> {
        self.endpoint(&format!("rest/v1/{}", platform.schema().table))
    }

    fn http(&self, method: Method, url: Url) -> RequestBuilder {
        log::debug!("[client] {} {}", method, url);
        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .header("apikey", &self.inner.api_key)
            .bearer_auth(&self.inner.api_key);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, Error> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.inner.timeout.unwrap_or_default())
            } else {
                ApiError::Transport(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[client] HTTP {}: {}", status.as_u16(), body);
            Err(ApiError::from_body(status.as_u16(), body).into())
        }
    }

    async fn fetch_page_uncached(
        &self,
        query: &EntityQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Page, Error> {
        let pairs = query.to_rest_pairs(offset, limit)?;
        let mut url = self.table_url(query.platform)?;
        url.query_pairs_mut()
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let response = self
            .send(self.http(Method::GET, url).header("Prefer", "count=exact"))
            .await?;

        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);
        let value: serde_json::Value = response.json().await.map_err(ApiError::from)?;
        let records = decode_rows(query.platform, value)?;

        let has_more = match total {
            Some(total) => offset + records.len() < total,
            None => records.len() == limit,
        };
        let mut page = Page::new(records, offset).with_has_more(has_more);
        if let Some(total) = total {
            page = page.with_total_count(total);
        }
        Ok(page)
    }

    async fn patch_rows(
        &self,
        platform: Platform,
        filter: String,
        body: serde_json::Value,
    ) -> Result<usize, Error> {
        let schema = platform.schema();
        let mut url = self.table_url(platform)?;
        url.query_pairs_mut()
            .append_pair(schema.id, &filter)
            .append_pair("select", schema.id);

        let response = self
            .send(
                self.http(Method::PATCH, url)
                    .header("Prefer", "return=representation")
                    .json(&body),
            )
            .await?;

        let updated: Vec<serde_json::Value> = response.json().await.map_err(ApiError::from)?;
        Ok(updated.len())
    }

    async fn fetch_tags(&self, platform: Platform, id: EntityId) -> Result<Vec<String>, Error> {
        let schema = platform.schema();
        let mut url = self.table_url(platform)?;
        url.query_pairs_mut()
            .append_pair("select", schema.tags)
            .append_pair(schema.id, &format!("eq.{}", id));

        let response = self.send(self.http(Method::GET, url)).await?;
        let rows: Vec<TagsRow> = response.json().await.map_err(ApiError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or(Error::NotFound { platform, id })?;
        Ok(row.tags.unwrap_or_default())
    }

    async fn fetch_vocabulary(&self, platform: Platform, limit: usize) -> Result<Vec<String>, Error> {
        let schema = platform.schema();
        let mut url = self.table_url(platform)?;
        url.query_pairs_mut()
            .append_pair("select", schema.tags)
            .append_pair(schema.tags, "not.is.null")
            .append_pair("limit", &limit.to_string());

        let response = self.send(self.http(Method::GET, url)).await?;
        let rows: Vec<TagsRow> = response.json().await.map_err(ApiError::from)?;
        let all: Vec<String> = rows.into_iter().flat_map(|r| r.tags.unwrap_or_default()).collect();
        Ok(distinct_tags(all.iter()))
    }
}

/// Parses the total out of a `Content-Range` header ("0-19/45", "*/0").
fn parse_content_range(value: &str) -> Option<usize> {
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}

fn review_body(platform: Platform, status: Option<ReviewStatus>) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(
        platform.schema().review.to_string(),
        status.map_or(serde_json::Value::Null, |s| json!(s.as_str())),
    );
    serde_json::Value::Object(body)
}

#[async_trait]
impl Backend for ModdashClient {
    async fn fetch_page(
        &self,
        query: &EntityQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Page, Error> {
        self.fetch_page_uncached(query, offset, limit).await
    }

    async fn update_review(
        &self,
        platform: Platform,
        id: EntityId,
        status: Option<ReviewStatus>,
    ) -> Result<(), Error> {
        check_status(platform, status)?;
        let updated = self
            .patch_rows(platform, format!("eq.{}", id), review_body(platform, status))
            .await?;
        if updated == 0 {
            return Err(Error::NotFound { platform, id });
        }
        self.inner.count_cache.clear();
        Ok(())
    }

    async fn bulk_update_review(
        &self,
        platform: Platform,
        ids: &[EntityId],
        status: Option<ReviewStatus>,
    ) -> Result<usize, Error> {
        check_status(platform, status)?;
        if ids.is_empty() {
            return Ok(0);
        }

        let list: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        let updated = self
            .patch_rows(
                platform,
                format!("in.({})", list.join(",")),
                review_body(platform, status),
            )
            .await?;
        self.inner.count_cache.clear();
        Ok(updated)
    }

    async fn edit_tags(
        &self,
        platform: Platform,
        id: EntityId,
        edit: &TagEdit,
    ) -> Result<Vec<String>, Error> {
        // Read-modify-write; concurrent editors of the same row can race.
        let current = self.fetch_tags(platform, id).await?;
        let tags = edit.apply(&current)?;

        let mut body = serde_json::Map::new();
        body.insert(platform.schema().tags.to_string(), json!(tags));
        self.patch_rows(platform, format!("eq.{}", id), serde_json::Value::Object(body))
            .await?;

        self.inner.tag_cache.clear();
        Ok(tags)
    }

    async fn list_tags(
        &self,
        platform: Platform,
        limit: usize,
    ) -> Result<Response<Arc<Vec<String>>>, Error> {
        let client = self.clone();
        self.inner
            .tag_cache
            .get_or_fetch((platform, limit), self.inner.cache_config.tag_ttl, move || async move {
                client.fetch_vocabulary(platform, limit).await
            })
            .await
    }

    async fn count(&self, query: &EntityQuery) -> Result<usize, Error> {
        let client = self.clone();
        let owned = query.clone();
        let response = self
            .inner
            .count_cache
            .get_or_fetch(query.clone(), self.inner.cache_config.count_ttl, move || async move {
                let page = client.fetch_page_uncached(&owned, 0, 1).await?;
                Ok(page.total_count().unwrap_or(page.len()))
            })
            .await?;
        Ok(**response.data())
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ModdashClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The project base URL
/// - `api_key` - Key sent as `apikey` and bearer token
pub struct ModdashClientBuilder<Url, Key> {
    url: Url,
    api_key: Key,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    cache_config: CacheConfig,
}

impl ModdashClientBuilder<Missing, Missing> {
    pub fn new() -> Self {
        Self {
            url: Missing,
            api_key: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
            cache_config: CacheConfig::default(),
        }
    }
}

impl Default for ModdashClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ModdashClientBuilder<Missing, K> {
    /// Sets the project base URL.
    pub fn url(self, url: impl Into<String>) -> ModdashClientBuilder<Set<String>, K> {
        ModdashClientBuilder {
            url: Set(url.into()),
            api_key: self.api_key,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            cache_config: self.cache_config,
        }
    }
}

impl<U> ModdashClientBuilder<U, Missing> {
    /// Sets the API key.
    pub fn api_key(self, key: impl Into<String>) -> ModdashClientBuilder<U, Set<String>> {
        ModdashClientBuilder {
            url: self.url,
            api_key: Set(key.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            cache_config: self.cache_config,
        }
    }
}

impl<U, K> ModdashClientBuilder<U, K> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout. Ignored when a custom HTTP client is set.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }
}

impl ModdashClientBuilder<Set<String>, Set<String>> {
    /// Builds the [`ModdashClient`].
    pub fn build(self) -> Result<ModdashClient, Error> {
        let mut raw = self.url.0.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(ModdashClient {
            inner: Arc::new(ModdashClientInner {
                base_url,
                api_key: self.api_key.0,
                http_client,
                timeout: self.timeout,
                cache_config: self.cache_config,
                tag_cache: LookupCache::new(),
                count_cache: LookupCache::new(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RedditReview;

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range("0-19/45"), Some(45));
        assert_eq!(parse_content_range("*/0"), Some(0));
        assert_eq!(parse_content_range("0-19/*"), None);
        assert_eq!(parse_content_range("garbage"), None);
    }

    #[test]
    fn test_review_body_uses_platform_column() {
        assert_eq!(
            review_body(Platform::Reddit, Some(ReviewStatus::Reddit(RedditReview::Ok))),
            json!({ "review": "Ok" })
        );
        assert_eq!(
            review_body(Platform::Instagram, None),
            json!({ "review_status": null })
        );
    }

    #[test]
    fn test_build_normalizes_base_url() {
        let client = ModdashClient::builder()
            .url("https://example.supabase.co/project")
            .api_key("key")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://example.supabase.co/project/");
        assert_eq!(
            client.table_url(Platform::Instagram).unwrap().as_str(),
            "https://example.supabase.co/project/rest/v1/instagram_creators"
        );
    }

    #[test]
    fn test_build_rejects_invalid_url() {
        let result = ModdashClient::builder().url("not a url").api_key("key").build();
        assert!(matches!(result, Err(Error::Api(ApiError::InvalidUrl(_)))));
    }
}
