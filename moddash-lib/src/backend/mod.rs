//! Backend seam.
//!
//! The remote database owns all durable state. A [`Backend`] serves pages
//! of entities and applies mutations; list views and the table engine only
//! ever see the client-side copies it returns.

mod memory;

pub use memory::*;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Error;
use crate::error::ValidationError;
use crate::model::EntityId;
use crate::model::Platform;
use crate::model::ReviewStatus;
use crate::query::EntityQuery;
use crate::query::Page;
use crate::response::Response;

/// Default cap on the number of distinct tags returned by `list_tags`.
pub const DEFAULT_TAG_LIMIT: usize = 500;

/// A change to an entity's tag list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEdit {
    Add(String),
    Remove(String),
    Rename { from: String, to: String },
}

impl TagEdit {
    /// Applies the edit to a tag list and returns the new list.
    ///
    /// Tag comparison is case-insensitive. Adding an existing tag and
    /// removing a missing one leave the list unchanged.
    pub fn apply(&self, tags: &[String]) -> Result<Vec<String>, ValidationError> {
        match self {
            Self::Add(tag) => {
                let tag = valid_tag(tag)?;
                let mut out = tags.to_vec();
                if !out.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
                    out.push(tag);
                }
                Ok(out)
            }
            Self::Remove(tag) => Ok(tags
                .iter()
                .filter(|t| !t.eq_ignore_ascii_case(tag.trim()))
                .cloned()
                .collect()),
            Self::Rename { from, to } => {
                let to = valid_tag(to)?;
                let from = from.trim();
                let mut out: Vec<String> = Vec::with_capacity(tags.len());
                for tag in tags {
                    let next = if tag.eq_ignore_ascii_case(from) {
                        to.clone()
                    } else {
                        tag.clone()
                    };
                    if !out.iter().any(|t| t.eq_ignore_ascii_case(&next)) {
                        out.push(next);
                    }
                }
                Ok(out)
            }
        }
    }
}

fn valid_tag(tag: &str) -> Result<String, ValidationError> {
    let tag = tag.trim();
    if tag.is_empty() {
        Err(ValidationError::InvalidTag(tag.to_string()))
    } else {
        Ok(tag.to_string())
    }
}

/// Ensures a review status belongs to the entity's platform.
pub fn check_status(
    platform: Platform,
    status: Option<ReviewStatus>,
) -> Result<(), ValidationError> {
    match status {
        Some(status) if status.platform() != platform => Err(ValidationError::PlatformMismatch {
            platform,
            status: status.as_str(),
        }),
        _ => Ok(()),
    }
}

/// Data access for listed entities.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetches `limit` rows matching `query`, starting at `offset`.
    async fn fetch_page(
        &self,
        query: &EntityQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Page, Error>;

    /// Sets (or with `None`, clears) the review status of one entity.
    async fn update_review(
        &self,
        platform: Platform,
        id: EntityId,
        status: Option<ReviewStatus>,
    ) -> Result<(), Error>;

    /// Sets the review status of many entities. Returns the number updated.
    async fn bulk_update_review(
        &self,
        platform: Platform,
        ids: &[EntityId],
        status: Option<ReviewStatus>,
    ) -> Result<usize, Error>;

    /// Applies a tag edit and returns the entity's new tag list.
    async fn edit_tags(
        &self,
        platform: Platform,
        id: EntityId,
        edit: &TagEdit,
    ) -> Result<Vec<String>, Error>;

    /// Distinct tags in use on a platform, sorted case-insensitively.
    ///
    /// At most `limit` rows are scanned; the limit is explicit so callers
    /// can see when the vocabulary may be incomplete.
    async fn list_tags(
        &self,
        platform: Platform,
        limit: usize,
    ) -> Result<Response<Arc<Vec<String>>>, Error>;

    /// Total rows matching `query`, for metrics cards.
    async fn count(&self, query: &EntityQuery) -> Result<usize, Error> {
        let page = self.fetch_page(query, 0, 1).await?;
        Ok(page.total_count().unwrap_or(page.len()))
    }
}

/// Collects distinct tags, sorted case-insensitively.
pub(crate) fn distinct_tags<'a>(tags: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if !out.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            out.push(tag.clone());
        }
    }
    out.sort_by_key(|t| t.to_lowercase());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_is_idempotent() {
        let edit = TagEdit::Add("Tech".into());
        assert_eq!(edit.apply(&tags(&["tech"])).unwrap(), tags(&["tech"]));
        assert_eq!(edit.apply(&tags(&["art"])).unwrap(), tags(&["art", "Tech"]));
    }

    #[test]
    fn test_rename_keeps_position_and_dedupes() {
        let edit = TagEdit::Rename {
            from: "art".into(),
            to: "Design".into(),
        };
        assert_eq!(
            edit.apply(&tags(&["tech", "art", "music"])).unwrap(),
            tags(&["tech", "Design", "music"])
        );
        assert_eq!(
            edit.apply(&tags(&["design", "art"])).unwrap(),
            tags(&["design"])
        );
    }

    #[test]
    fn test_blank_tag_is_rejected() {
        assert!(TagEdit::Add("  ".into()).apply(&[]).is_err());
    }

    #[test]
    fn test_remove_missing_tag_is_noop() {
        let edit = TagEdit::Remove("gaming".into());
        assert_eq!(edit.apply(&tags(&["tech"])).unwrap(), tags(&["tech"]));
    }

    #[test]
    fn test_status_platform_check() {
        use crate::model::InstagramReview;
        let status = Some(ReviewStatus::Instagram(InstagramReview::Ok));
        assert!(check_status(Platform::Instagram, status).is_ok());
        assert!(check_status(Platform::Reddit, status).is_err());
        assert!(check_status(Platform::Reddit, None).is_ok());
    }
}
