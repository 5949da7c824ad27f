//! Entity query builder.

use crate::error::ValidationError;
use crate::model::Platform;
use crate::model::ReviewOutcome;
use crate::model::ReviewStatus;

use super::OrderBy;

/// Rows per page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound on a single page request.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Filter, sort and paging parameters for one entity list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityQuery {
    pub platform: Platform,
    /// Case-insensitive substring matched against name and title.
    pub search: Option<String>,
    pub review: Option<ReviewOutcome>,
    /// Every listed tag must be present on the entity.
    pub tags: Vec<String>,
    pub order: OrderBy,
    pub page_size: usize,
    /// Hard cap on the rows a feed will accumulate. `None` means unbounded.
    ///
    /// Feeds report [`truncated`](crate::feed::EntityFeed::truncated) when
    /// the cap cuts off rows that exist on the backend.
    pub max_rows: Option<usize>,
}

impl EntityQuery {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            search: None,
            review: None,
            tags: Vec::new(),
            order: OrderBy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            max_rows: None,
        }
    }

    /// Sets the search term. Blank terms clear the search.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    pub fn review(mut self, outcome: ReviewOutcome) -> Self {
        self.review = Some(outcome);
        self
    }

    pub fn any_review(mut self) -> Self {
        self.review = None;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into().trim().to_string();
        if !tag.is_empty() && !self.tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            self.tags.push(tag);
        }
        self
    }

    pub fn order(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    /// Sets the page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn max_rows(mut self, cap: usize) -> Self {
        self.max_rows = Some(cap);
        self
    }

    /// Checks that the filters can be expressed for this platform.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(outcome) = self.review {
            ReviewStatus::from_outcome(self.platform, outcome)?;
        }
        Ok(())
    }

    /// Number of rows to request for a page starting at `offset`,
    /// honouring `max_rows`. Zero means the cap is reached.
    pub fn limit_at(&self, offset: usize) -> usize {
        match self.max_rows {
            Some(cap) => self.page_size.min(cap.saturating_sub(offset)),
            None => self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_search_is_cleared() {
        let query = EntityQuery::new(Platform::Reddit).search("   ");
        assert_eq!(query.search, None);
    }

    #[test]
    fn test_duplicate_tags_are_ignored() {
        let query = EntityQuery::new(Platform::Reddit).tag("Tech").tag("tech");
        assert_eq!(query.tags, vec!["Tech"]);
    }

    #[test]
    fn test_limit_respects_cap() {
        let query = EntityQuery::new(Platform::Reddit).page_size(20).max_rows(50);
        assert_eq!(query.limit_at(0), 20);
        assert_eq!(query.limit_at(40), 10);
        assert_eq!(query.limit_at(50), 0);
    }

    #[test]
    fn test_validate_rejects_unsupported_outcome() {
        let query = EntityQuery::new(Platform::Instagram).review(ReviewOutcome::NoSeller);
        assert!(query.validate().is_err());
        let query = EntityQuery::new(Platform::Reddit).review(ReviewOutcome::NoSeller);
        assert!(query.validate().is_ok());
    }
}
