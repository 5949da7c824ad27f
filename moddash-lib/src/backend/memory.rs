//! In-process backend

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::RwLock;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::CacheConfig;
use crate::cache::LookupCache;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::EntityId;
use crate::model::ListedEntity;
use crate::model::Platform;
use crate::model::ReviewStatus;
use crate::query::EntityQuery;
use crate::query::Page;
use crate::response::Response;

use super::Backend;
use super::TagEdit;
use super::check_status;
use super::distinct_tags;

/// A [`Backend`] holding entities in memory.
///
/// Used for the demo mode of the binary and in tests. Supports simulated
/// latency and one-shot failure injection.
///
/// # Example
///
/// ```
/// use moddash_lib::backend::MemoryBackend;
/// use moddash_lib::model::{ListedEntity, Platform};
///
/// let backend = MemoryBackend::new(vec![
///     ListedEntity::new(1, Platform::Reddit, "rust"),
/// ]);
/// assert_eq!(backend.len(), 1);
/// ```
pub struct MemoryBackend {
    entities: RwLock<Vec<ListedEntity>>,
    latency: Option<Duration>,
    fail_next: Mutex<Option<ApiError>>,
    fetches: AtomicUsize,
    tag_cache: LookupCache<(Platform, usize), Vec<String>>,
    cache_config: CacheConfig,
}

impl MemoryBackend {
    pub fn new(entities: Vec<ListedEntity>) -> Self {
        Self {
            entities: RwLock::new(entities),
            latency: None,
            fail_next: Mutex::new(None),
            fetches: AtomicUsize::new(0),
            tag_cache: LookupCache::new(),
            cache_config: CacheConfig::default(),
        }
    }

    /// Delays every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Makes the next `fetch_page` call fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        if let Ok(mut guard) = self.fail_next.lock() {
            *guard = Some(error);
        }
    }

    /// Number of `fetch_page` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns a copy of one entity.
    pub fn get(&self, platform: Platform, id: EntityId) -> Option<ListedEntity> {
        self.read()
            .iter()
            .find(|e| e.platform == platform && e.id == id)
            .cloned()
    }

    /// Clears cached tag vocabularies.
    pub fn clear_cache(&self) {
        self.tag_cache.clear();
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<ListedEntity>> {
        self.entities.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<ListedEntity>> {
        self.entities.write().unwrap_or_else(|p| p.into_inner())
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn take_failure(&self) -> Option<ApiError> {
        self.fail_next.lock().ok().and_then(|mut guard| guard.take())
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn fetch_page(
        &self,
        query: &EntityQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Page, Error> {
        query.validate()?;
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if let Some(error) = self.take_failure() {
            return Err(error.into());
        }

        let mut matched: Vec<ListedEntity> = self
            .read()
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();
        matched.sort_by(|a, b| query.compare(a, b));

        let total = matched.len();
        let records: Vec<ListedEntity> = matched.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + records.len() < total;

        log::debug!(
            "[memory] {} page offset={} limit={} -> {} of {}",
            query.platform,
            offset,
            limit,
            records.len(),
            total
        );

        Ok(Page::new(records, offset)
            .with_total_count(total)
            .with_has_more(has_more))
    }

    async fn update_review(
        &self,
        platform: Platform,
        id: EntityId,
        status: Option<ReviewStatus>,
    ) -> Result<(), Error> {
        check_status(platform, status)?;
        self.simulate_latency().await;

        let mut entities = self.write();
        let entity = entities
            .iter_mut()
            .find(|e| e.platform == platform && e.id == id)
            .ok_or(Error::NotFound { platform, id })?;
        entity.review = status;
        Ok(())
    }

    async fn bulk_update_review(
        &self,
        platform: Platform,
        ids: &[EntityId],
        status: Option<ReviewStatus>,
    ) -> Result<usize, Error> {
        check_status(platform, status)?;
        self.simulate_latency().await;

        let mut updated = 0;
        for entity in self
            .write()
            .iter_mut()
            .filter(|e| e.platform == platform && ids.contains(&e.id))
        {
            entity.review = status;
            updated += 1;
        }
        Ok(updated)
    }

    async fn edit_tags(
        &self,
        platform: Platform,
        id: EntityId,
        edit: &TagEdit,
    ) -> Result<Vec<String>, Error> {
        self.simulate_latency().await;

        let tags = {
            let mut entities = self.write();
            let entity = entities
                .iter_mut()
                .find(|e| e.platform == platform && e.id == id)
                .ok_or(Error::NotFound { platform, id })?;
            entity.tags = edit.apply(&entity.tags)?;
            entity.tags.clone()
        };

        self.tag_cache.clear();
        Ok(tags)
    }

    async fn list_tags(
        &self,
        platform: Platform,
        limit: usize,
    ) -> Result<Response<Arc<Vec<String>>>, Error> {
        let snapshot: Vec<ListedEntity> = self
            .read()
            .iter()
            .filter(|e| e.platform == platform)
            .take(limit)
            .cloned()
            .collect();
        let latency = self.latency;

        self.tag_cache
            .get_or_fetch((platform, limit), self.cache_config.tag_ttl, move || async move {
                if let Some(latency) = latency {
                    tokio::time::sleep(latency).await;
                }
                Ok(distinct_tags(snapshot.iter().flat_map(|e| e.tags.iter())))
            })
            .await
    }
}
