//! Paged entity feed.
//!
//! [`EntityFeed`] is the one data source behind every list view: it owns an
//! [`EntityQuery`], accumulates pages for infinite scroll, and patches its
//! local copy after successful mutations.
//!
//! Each append or patch produces a new `Rows` allocation, so consumers can
//! detect changes by pointer comparison alone.
//!
//! Page requests carry a generation ticket. Changing the query bumps the
//! generation, and completions from an older generation are dropped.

use std::future::Future;
use std::sync::Arc;

use crate::backend::Backend;
use crate::backend::TagEdit;
use crate::error::Error;
use crate::model::EntityId;
use crate::model::ListedEntity;
use crate::model::ReviewStatus;
use crate::query::EntityQuery;
use crate::query::Page;

/// Shared, immutable snapshot of the loaded rows.
pub type Rows = Arc<[ListedEntity]>;

/// Identifies one outstanding page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    generation: u64,
    pub offset: usize,
    pub limit: usize,
}

/// Result of completing (or trying to start) a page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was appended.
    Appended { added: usize },
    /// Nothing was requested: already loading, exhausted, or capped.
    Skipped,
    /// The completion belonged to an older query and was dropped.
    Stale,
    /// The fetch failed; see [`EntityFeed::error`].
    Failed,
}

pub struct EntityFeed<B: Backend + ?Sized> {
    backend: Arc<B>,
    query: EntityQuery,
    rows: Rows,
    generation: u64,
    in_flight: Option<PageTicket>,
    has_more: bool,
    total_count: Option<usize>,
    error: Option<String>,
    truncated: bool,
}

impl<B: Backend + ?Sized + 'static> EntityFeed<B> {
    pub fn new(backend: Arc<B>, query: EntityQuery) -> Self {
        Self {
            backend,
            query,
            rows: Arc::from(Vec::new()),
            generation: 0,
            in_flight: None,
            has_more: true,
            total_count: None,
            error: None,
            truncated: false,
        }
    }

    pub fn query(&self) -> &EntityQuery {
        &self.query
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Current rows. Cheap to clone.
    pub fn rows(&self) -> Rows {
        self.rows.clone()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Message of the last failed fetch, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `true` when `max_rows` stopped loading while the backend had more rows.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Total matching rows as last reported by the backend.
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    /// Replaces the query. Returns `true` (and resets) if it changed.
    pub fn set_query(&mut self, query: EntityQuery) -> bool {
        if query == self.query {
            return false;
        }
        self.query = query;
        self.reset();
        true
    }

    /// Drops loaded rows and invalidates outstanding requests.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.rows = Arc::from(Vec::new());
        self.in_flight = None;
        self.has_more = true;
        self.total_count = None;
        self.error = None;
        self.truncated = false;
    }

    /// Starts a page request, or returns `None` if one should not be made.
    pub fn begin_load(&mut self) -> Option<PageTicket> {
        if self.in_flight.is_some() || !self.has_more {
            return None;
        }

        let offset = self.rows.len();
        let limit = self.query.limit_at(offset);
        if limit == 0 {
            self.has_more = false;
            self.truncated = true;
            log::debug!("[feed] row cap {:?} reached", self.query.max_rows);
            return None;
        }

        let ticket = PageTicket {
            generation: self.generation,
            offset,
            limit,
        };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Builds the request future for a ticket without borrowing the feed.
    pub fn request(&self, ticket: PageTicket) -> impl Future<Output = Result<Page, Error>> + Send + 'static {
        let backend = self.backend.clone();
        let query = self.query.clone();
        async move { backend.fetch_page(&query, ticket.offset, ticket.limit).await }
    }

    /// Applies the result of a request started with [`begin_load`](Self::begin_load).
    pub fn complete(&mut self, ticket: PageTicket, result: Result<Page, Error>) -> LoadOutcome {
        if ticket.generation != self.generation || self.in_flight != Some(ticket) {
            log::debug!(
                "[feed] dropping stale page offset={} (generation {} != {})",
                ticket.offset,
                ticket.generation,
                self.generation
            );
            return LoadOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                let backend_has_more = page.has_more();
                self.total_count = page.total_count().or(self.total_count);

                let added = page.len();
                let mut rows = self.rows.to_vec();
                rows.extend(page.into_records());
                self.rows = rows.into();
                self.error = None;

                let capped = self.query.limit_at(self.rows.len()) == 0;
                self.has_more = backend_has_more && !capped;
                self.truncated = backend_has_more && capped;

                log::debug!(
                    "[feed] appended {} rows (total {}, has_more {})",
                    added,
                    self.rows.len(),
                    self.has_more
                );
                LoadOutcome::Appended { added }
            }
            Err(e) => {
                log::warn!("[feed] page fetch failed: {}", e);
                self.error = Some(e.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Fetches and appends the next page.
    pub async fn load_more(&mut self) -> LoadOutcome {
        let Some(ticket) = self.begin_load() else {
            return LoadOutcome::Skipped;
        };
        let result = self.request(ticket).await;
        self.complete(ticket, result)
    }

    /// Drops loaded rows and fetches the first page again.
    pub async fn reload(&mut self) -> LoadOutcome {
        self.reset();
        self.load_more().await
    }

    /// Sets a review status on the backend, then patches the local copy.
    pub async fn review(&mut self, id: EntityId, status: Option<ReviewStatus>) -> Result<(), Error> {
        self.backend
            .update_review(self.query.platform, id, status)
            .await?;
        self.apply_review(id, status);
        Ok(())
    }

    /// Sets a review status for many entities at once.
    pub async fn bulk_review(
        &mut self,
        ids: &[EntityId],
        status: Option<ReviewStatus>,
    ) -> Result<usize, Error> {
        let updated = self
            .backend
            .bulk_update_review(self.query.platform, ids, status)
            .await?;
        for id in ids {
            self.apply_review(*id, status);
        }
        Ok(updated)
    }

    /// Applies a tag edit on the backend, then patches the local copy.
    pub async fn edit_tags(&mut self, id: EntityId, edit: &TagEdit) -> Result<Vec<String>, Error> {
        let tags = self
            .backend
            .edit_tags(self.query.platform, id, edit)
            .await?;
        self.apply_tags(id, tags.clone());
        Ok(tags)
    }

    /// Patches one row's review status locally.
    ///
    /// Rows that no longer match the query (e.g. reviewed rows in an
    /// "unreviewed" queue) are dropped. Returns `true` if rows changed.
    pub fn apply_review(&mut self, id: EntityId, status: Option<ReviewStatus>) -> bool {
        self.patch(id, |entity| entity.review = status)
    }

    /// Replaces one row's tags locally. Returns `true` if rows changed.
    pub fn apply_tags(&mut self, id: EntityId, tags: Vec<String>) -> bool {
        self.patch(id, move |entity| entity.tags = tags)
    }

    fn patch(&mut self, id: EntityId, f: impl FnOnce(&mut ListedEntity)) -> bool {
        let Some(index) = self.rows.iter().position(|e| e.id == id) else {
            return false;
        };

        let mut rows = self.rows.to_vec();
        f(&mut rows[index]);
        if !self.query.matches(&rows[index]) {
            rows.remove(index);
            if let Some(total) = self.total_count.as_mut() {
                *total = total.saturating_sub(1);
            }
        }
        self.rows = rows.into();
        true
    }
}
