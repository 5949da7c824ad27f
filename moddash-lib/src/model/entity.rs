//! Listed entity types

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ValidationError;

use super::ReviewOutcome;
use super::ReviewStatus;

/// Stable numeric identifier assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// The content platform an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Reddit communities (subreddits).
    Reddit,
    /// Instagram creator accounts.
    Instagram,
}

impl Platform {
    /// All supported platforms.
    pub const ALL: [Platform; 2] = [Platform::Reddit, Platform::Instagram];

    /// Lowercase name used in config and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reddit => "reddit",
            Self::Instagram => "instagram",
        }
    }

    /// Prefix shown before the entity name ("r/" or "@").
    pub fn handle_prefix(&self) -> &'static str {
        match self {
            Self::Reddit => "r/",
            Self::Instagram => "@",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reddit" | "subreddit" | "subreddits" => Ok(Self::Reddit),
            "instagram" | "ig" | "creators" => Ok(Self::Instagram),
            other => Err(ValidationError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Platform-specific boolean flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFlags {
    /// Reddit "over 18" communities.
    pub adult: bool,
    /// Verified Instagram account.
    pub verified: bool,
    /// Private Instagram account.
    pub private: bool,
}

/// A community or creator record shown as one table row.
///
/// Created by the backend only. The client keeps a transient copy and
/// submits mutations back through a [`Backend`](crate::backend::Backend).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedEntity {
    pub id: EntityId,
    pub platform: Platform,
    /// Subreddit name or Instagram username, without prefix.
    pub name: String,
    /// Subreddit title or creator bio.
    pub title: Option<String>,
    /// Subscribers or followers.
    pub audience: u64,
    /// Engagement ratio (0.12 = 12%).
    pub engagement: f64,
    /// Average upvotes or likes per post.
    pub avg_performance: f64,
    /// `None` until the entity has been reviewed.
    pub review: Option<ReviewStatus>,
    pub tags: Vec<String>,
    pub icon_url: Option<String>,
    pub secondary_icon_url: Option<String>,
    pub flags: EntityFlags,
}

impl ListedEntity {
    /// Creates an unreviewed entity with empty metrics.
    pub fn new(id: impl Into<EntityId>, platform: Platform, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            platform,
            name: name.into(),
            title: None,
            audience: 0,
            engagement: 0.0,
            avg_performance: 0.0,
            review: None,
            tags: Vec::new(),
            icon_url: None,
            secondary_icon_url: None,
            flags: EntityFlags::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_audience(mut self, audience: u64) -> Self {
        self.audience = audience;
        self
    }

    pub fn with_engagement(mut self, engagement: f64) -> Self {
        self.engagement = engagement;
        self
    }

    pub fn with_avg_performance(mut self, avg: f64) -> Self {
        self.avg_performance = avg;
        self
    }

    pub fn with_review(mut self, review: ReviewStatus) -> Self {
        self.review = Some(review);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_icon(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }

    pub fn with_secondary_icon(mut self, url: impl Into<String>) -> Self {
        self.secondary_icon_url = Some(url.into());
        self
    }

    pub fn with_flags(mut self, flags: EntityFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Display handle, e.g. "r/rust" or "@someone".
    pub fn handle(&self) -> String {
        format!("{}{}", self.platform.handle_prefix(), self.name)
    }

    /// Platform-independent review outcome.
    pub fn outcome(&self) -> ReviewOutcome {
        self.review
            .map(|r| r.outcome())
            .unwrap_or(ReviewOutcome::Unreviewed)
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RedditReview;

    #[test]
    fn test_platform_parse() {
        assert_eq!("Reddit".parse::<Platform>().unwrap(), Platform::Reddit);
        assert_eq!("ig".parse::<Platform>().unwrap(), Platform::Instagram);
        assert!("tiktok".parse::<Platform>().is_err());
    }

    #[test]
    fn test_handle_uses_platform_prefix() {
        let sub = ListedEntity::new(1, Platform::Reddit, "rust");
        let creator = ListedEntity::new(2, Platform::Instagram, "ferris");
        assert_eq!(sub.handle(), "r/rust");
        assert_eq!(creator.handle(), "@ferris");
    }

    #[test]
    fn test_outcome_defaults_to_unreviewed() {
        let sub = ListedEntity::new(1, Platform::Reddit, "rust");
        assert_eq!(sub.outcome(), ReviewOutcome::Unreviewed);

        let sub = sub.with_review(ReviewStatus::Reddit(RedditReview::NoSeller));
        assert_eq!(sub.outcome(), ReviewOutcome::NoSeller);
    }
}
