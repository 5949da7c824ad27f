//! Review status vocabularies.
//!
//! Reddit and Instagram store review decisions as different string sets:
//!
//! | Outcome      | Reddit          | Instagram       |
//! |--------------|-----------------|-----------------|
//! | Unreviewed   | `null`          | `"pending"`     |
//! | Approved     | `"Ok"`          | `"ok"`          |
//! | Rejected     | `"Non Related"` | `"non_related"` |
//! | NoSeller     | `"No Seller"`   | n/a             |
//!
//! [`ReviewStatus`] keeps the platform-specific value and [`REVIEW_TABLE`]
//! maps it to the shared [`ReviewOutcome`]. Nothing outside this module
//! compares review strings.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ValidationError;

use super::Platform;

/// Review values stored on the `subreddits` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedditReview {
    #[serde(rename = "Ok")]
    Ok,
    #[serde(rename = "No Seller")]
    NoSeller,
    #[serde(rename = "Non Related")]
    NonRelated,
}

/// Review values stored on the `instagram_creators` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstagramReview {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "non_related")]
    NonRelated,
    #[serde(rename = "pending")]
    Pending,
}

/// A review decision in the vocabulary of one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewStatus {
    Reddit(RedditReview),
    Instagram(InstagramReview),
}

/// Platform-independent classification of a review decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Unreviewed,
    Approved,
    Rejected,
    NoSeller,
}

/// Bidirectional mapping between wire strings and outcomes.
pub const REVIEW_TABLE: &[(ReviewStatus, &str, ReviewOutcome)] = &[
    (
        ReviewStatus::Reddit(RedditReview::Ok),
        "Ok",
        ReviewOutcome::Approved,
    ),
    (
        ReviewStatus::Reddit(RedditReview::NoSeller),
        "No Seller",
        ReviewOutcome::NoSeller,
    ),
    (
        ReviewStatus::Reddit(RedditReview::NonRelated),
        "Non Related",
        ReviewOutcome::Rejected,
    ),
    (
        ReviewStatus::Instagram(InstagramReview::Ok),
        "ok",
        ReviewOutcome::Approved,
    ),
    (
        ReviewStatus::Instagram(InstagramReview::NonRelated),
        "non_related",
        ReviewOutcome::Rejected,
    ),
    (
        ReviewStatus::Instagram(InstagramReview::Pending),
        "pending",
        ReviewOutcome::Unreviewed,
    ),
];

const REDDIT_CHOICES: &[ReviewStatus] = &[
    ReviewStatus::Reddit(RedditReview::Ok),
    ReviewStatus::Reddit(RedditReview::NoSeller),
    ReviewStatus::Reddit(RedditReview::NonRelated),
];

const INSTAGRAM_CHOICES: &[ReviewStatus] = &[
    ReviewStatus::Instagram(InstagramReview::Ok),
    ReviewStatus::Instagram(InstagramReview::NonRelated),
];

impl ReviewStatus {
    /// The platform this value belongs to.
    pub fn platform(&self) -> Platform {
        match self {
            Self::Reddit(_) => Platform::Reddit,
            Self::Instagram(_) => Platform::Instagram,
        }
    }

    /// The exact string stored by the backend.
    pub fn as_str(&self) -> &'static str {
        REVIEW_TABLE
            .iter()
            .find(|(status, _, _)| status == self)
            .map(|(_, wire, _)| *wire)
            .unwrap_or_default()
    }

    pub fn outcome(&self) -> ReviewOutcome {
        REVIEW_TABLE
            .iter()
            .find(|(status, _, _)| status == self)
            .map(|(_, _, outcome)| *outcome)
            .unwrap_or(ReviewOutcome::Unreviewed)
    }

    /// Parses a backend string. Matching is exact: `"ok"` is not a Reddit value.
    pub fn parse(platform: Platform, value: &str) -> Result<Self, ValidationError> {
        REVIEW_TABLE
            .iter()
            .find(|(status, wire, _)| status.platform() == platform && *wire == value)
            .map(|(status, _, _)| *status)
            .ok_or_else(|| ValidationError::UnknownReview {
                platform,
                value: value.to_string(),
            })
    }

    /// Maps an outcome back to the platform vocabulary.
    ///
    /// Returns `Ok(None)` when the platform stores the outcome as null
    /// (unreviewed Reddit communities).
    pub fn from_outcome(
        platform: Platform,
        outcome: ReviewOutcome,
    ) -> Result<Option<Self>, ValidationError> {
        if platform == Platform::Reddit && outcome == ReviewOutcome::Unreviewed {
            return Ok(None);
        }

        REVIEW_TABLE
            .iter()
            .find(|(status, _, o)| status.platform() == platform && *o == outcome)
            .map(|(status, _, _)| Some(*status))
            .ok_or(ValidationError::UnsupportedOutcome { platform, outcome })
    }

    /// The mutually exclusive review buttons offered for a platform.
    pub fn choices(platform: Platform) -> &'static [ReviewStatus] {
        match platform {
            Platform::Reddit => REDDIT_CHOICES,
            Platform::Instagram => INSTAGRAM_CHOICES,
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ReviewOutcome {
    pub const ALL: [ReviewOutcome; 4] = [
        ReviewOutcome::Unreviewed,
        ReviewOutcome::Approved,
        ReviewOutcome::Rejected,
        ReviewOutcome::NoSeller,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unreviewed => "unreviewed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::NoSeller => "no_seller",
        }
    }
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewOutcome {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "unreviewed" | "pending" => Ok(Self::Unreviewed),
            "approved" | "ok" => Ok(Self::Approved),
            "rejected" | "non_related" => Ok(Self::Rejected),
            "no_seller" => Ok(Self::NoSeller),
            other => Err(ValidationError::UnknownOutcome(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_round_trips_through_parse() {
        for (status, wire, _) in REVIEW_TABLE {
            assert_eq!(ReviewStatus::parse(status.platform(), wire), Ok(*status));
        }
    }

    #[test]
    fn test_parse_is_platform_and_case_sensitive() {
        assert!(ReviewStatus::parse(Platform::Reddit, "ok").is_err());
        assert!(ReviewStatus::parse(Platform::Instagram, "Ok").is_err());
        assert!(ReviewStatus::parse(Platform::Instagram, "No Seller").is_err());
    }

    #[test]
    fn test_approved_strings_differ_between_platforms() {
        let reddit = ReviewStatus::from_outcome(Platform::Reddit, ReviewOutcome::Approved)
            .unwrap()
            .unwrap();
        let instagram = ReviewStatus::from_outcome(Platform::Instagram, ReviewOutcome::Approved)
            .unwrap()
            .unwrap();
        assert_eq!(reddit.as_str(), "Ok");
        assert_eq!(instagram.as_str(), "ok");
        assert_ne!(reddit.as_str(), instagram.as_str());
    }

    #[test]
    fn test_unreviewed_mapping() {
        assert_eq!(
            ReviewStatus::from_outcome(Platform::Reddit, ReviewOutcome::Unreviewed),
            Ok(None)
        );
        assert_eq!(
            ReviewStatus::from_outcome(Platform::Instagram, ReviewOutcome::Unreviewed),
            Ok(Some(ReviewStatus::Instagram(InstagramReview::Pending)))
        );
    }

    #[test]
    fn test_instagram_has_no_seller_status() {
        assert_eq!(
            ReviewStatus::from_outcome(Platform::Instagram, ReviewOutcome::NoSeller),
            Err(ValidationError::UnsupportedOutcome {
                platform: Platform::Instagram,
                outcome: ReviewOutcome::NoSeller,
            })
        );
    }

    #[test]
    fn test_choices_match_platform() {
        assert_eq!(ReviewStatus::choices(Platform::Reddit).len(), 3);
        assert_eq!(ReviewStatus::choices(Platform::Instagram).len(), 2);
        assert!(
            ReviewStatus::choices(Platform::Instagram)
                .iter()
                .all(|s| s.platform() == Platform::Instagram)
        );
    }

    #[test]
    fn test_serializes_as_wire_string() {
        let json = serde_json::to_string(&ReviewStatus::Reddit(RedditReview::NoSeller)).unwrap();
        assert_eq!(json, "\"No Seller\"");
    }
}
