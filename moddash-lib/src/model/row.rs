//! Backend row shapes and column names per platform.
//!
//! The two tables predate the shared model and use different column names.
//! Rows are decoded loosely (every column optional) and validated when
//! converted into a [`ListedEntity`].

use serde::Deserialize;

use crate::error::ValidationError;

use super::EntityFlags;
use super::EntityId;
use super::ListedEntity;
use super::Platform;
use super::ReviewStatus;

/// Column names of one platform's table.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub table: &'static str,
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub audience: &'static str,
    pub engagement: &'static str,
    pub avg_performance: &'static str,
    pub review: &'static str,
    pub tags: &'static str,
}

const REDDIT_SCHEMA: Schema = Schema {
    table: "subreddits",
    id: "id",
    name: "name",
    title: "title",
    audience: "subscribers",
    engagement: "subscriber_engagement_ratio",
    avg_performance: "avg_upvotes_per_post",
    review: "review",
    tags: "tags",
};

const INSTAGRAM_SCHEMA: Schema = Schema {
    table: "instagram_creators",
    id: "id",
    name: "username",
    title: "biography",
    audience: "followers_count",
    engagement: "engagement_rate",
    avg_performance: "avg_likes_per_post",
    review: "review_status",
    tags: "tags",
};

impl Platform {
    /// Table and column names for this platform.
    pub fn schema(&self) -> &'static Schema {
        match self {
            Self::Reddit => &REDDIT_SCHEMA,
            Self::Instagram => &INSTAGRAM_SCHEMA,
        }
    }
}

/// A row of the `subreddits` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubredditRow {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub subscribers: Option<i64>,
    pub subscriber_engagement_ratio: Option<f64>,
    pub avg_upvotes_per_post: Option<f64>,
    pub review: Option<String>,
    pub tags: Option<Vec<String>>,
    pub icon_img: Option<String>,
    pub community_icon: Option<String>,
    pub over18: Option<bool>,
}

/// A row of the `instagram_creators` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatorRow {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub biography: Option<String>,
    pub followers_count: Option<i64>,
    pub engagement_rate: Option<f64>,
    pub avg_likes_per_post: Option<f64>,
    pub review_status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub profile_pic_url: Option<String>,
    pub profile_pic_url_hd: Option<String>,
    pub is_verified: Option<bool>,
    pub is_private: Option<bool>,
}

impl TryFrom<SubredditRow> for ListedEntity {
    type Error = ValidationError;

    fn try_from(row: SubredditRow) -> Result<Self, Self::Error> {
        let platform = Platform::Reddit;
        let id = row.id.ok_or(ValidationError::MissingField {
            platform,
            field: "id",
        })?;
        let name = non_empty(row.name).ok_or(ValidationError::MissingField {
            platform,
            field: "name",
        })?;
        let review = non_empty(row.review)
            .map(|r| ReviewStatus::parse(platform, &r))
            .transpose()?;

        Ok(ListedEntity {
            id: EntityId(id),
            platform,
            name,
            title: non_empty(row.title),
            audience: row.subscribers.unwrap_or(0).max(0) as u64,
            engagement: row.subscriber_engagement_ratio.unwrap_or(0.0),
            avg_performance: row.avg_upvotes_per_post.unwrap_or(0.0),
            review,
            tags: clean_tags(row.tags),
            icon_url: non_empty(row.icon_img),
            secondary_icon_url: non_empty(row.community_icon),
            flags: EntityFlags {
                adult: row.over18.unwrap_or(false),
                ..EntityFlags::default()
            },
        })
    }
}

impl TryFrom<CreatorRow> for ListedEntity {
    type Error = ValidationError;

    fn try_from(row: CreatorRow) -> Result<Self, Self::Error> {
        let platform = Platform::Instagram;
        let id = row.id.ok_or(ValidationError::MissingField {
            platform,
            field: "id",
        })?;
        let name = non_empty(row.username).ok_or(ValidationError::MissingField {
            platform,
            field: "username",
        })?;
        let review = non_empty(row.review_status)
            .map(|r| ReviewStatus::parse(platform, &r))
            .transpose()?;

        Ok(ListedEntity {
            id: EntityId(id),
            platform,
            name,
            title: non_empty(row.biography).or(non_empty(row.full_name)),
            audience: row.followers_count.unwrap_or(0).max(0) as u64,
            engagement: row.engagement_rate.unwrap_or(0.0),
            avg_performance: row.avg_likes_per_post.unwrap_or(0.0),
            review,
            tags: clean_tags(row.tags),
            icon_url: non_empty(row.profile_pic_url),
            secondary_icon_url: non_empty(row.profile_pic_url_hd),
            flags: EntityFlags {
                verified: row.is_verified.unwrap_or(false),
                private: row.is_private.unwrap_or(false),
                ..EntityFlags::default()
            },
        })
    }
}

/// Decodes a JSON array of rows of the given platform.
pub fn decode_rows(
    platform: Platform,
    value: serde_json::Value,
) -> Result<Vec<ListedEntity>, crate::error::Error> {
    use crate::error::ApiError;

    match platform {
        Platform::Reddit => {
            let rows: Vec<SubredditRow> = serde_json::from_value(value)
                .map_err(|e| ApiError::decode("subreddit rows", e))?;
            Ok(rows
                .into_iter()
                .map(ListedEntity::try_from)
                .collect::<Result<_, _>>()?)
        }
        Platform::Instagram => {
            let rows: Vec<CreatorRow> = serde_json::from_value(value)
                .map_err(|e| ApiError::decode("creator rows", e))?;
            Ok(rows
                .into_iter()
                .map(ListedEntity::try_from)
                .collect::<Result<_, _>>()?)
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn clean_tags(tags: Option<Vec<String>>) -> Vec<String> {
    tags.unwrap_or_default()
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InstagramReview;
    use crate::model::RedditReview;

    #[test]
    fn test_subreddit_row_conversion() {
        let json = serde_json::json!([{
            "id": 7,
            "name": "rust",
            "title": "The Rust Programming Language",
            "subscribers": 300000,
            "subscriber_engagement_ratio": 0.08,
            "avg_upvotes_per_post": 120.5,
            "review": "No Seller",
            "tags": ["tech", " ", "programming"],
            "icon_img": "",
            "community_icon": "https://example.com/icon.png",
            "over18": false
        }]);

        let entities = decode_rows(Platform::Reddit, json).unwrap();
        let e = &entities[0];
        assert_eq!(e.id, EntityId(7));
        assert_eq!(e.review, Some(ReviewStatus::Reddit(RedditReview::NoSeller)));
        assert_eq!(e.tags, vec!["tech", "programming"]);
        assert_eq!(e.icon_url, None);
        assert_eq!(e.secondary_icon_url.as_deref(), Some("https://example.com/icon.png"));
    }

    #[test]
    fn test_creator_row_conversion() {
        let json = serde_json::json!([{
            "id": 9,
            "username": "ferris",
            "full_name": "Ferris Crab",
            "followers_count": 1200,
            "engagement_rate": 0.2,
            "review_status": "pending",
            "is_verified": true
        }]);

        let entities = decode_rows(Platform::Instagram, json).unwrap();
        let e = &entities[0];
        assert_eq!(e.title.as_deref(), Some("Ferris Crab"));
        assert_eq!(
            e.review,
            Some(ReviewStatus::Instagram(InstagramReview::Pending))
        );
        assert!(e.flags.verified);
        assert!(!e.flags.private);
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let row = SubredditRow {
            name: Some("rust".into()),
            ..Default::default()
        };
        assert_eq!(
            ListedEntity::try_from(row),
            Err(ValidationError::MissingField {
                platform: Platform::Reddit,
                field: "id",
            })
        );
    }

    #[test]
    fn test_foreign_review_string_is_rejected() {
        let row = CreatorRow {
            id: Some(1),
            username: Some("ferris".into()),
            review_status: Some("No Seller".into()),
            ..Default::default()
        };
        assert!(matches!(
            ListedEntity::try_from(row),
            Err(ValidationError::UnknownReview { .. })
        ));
    }
}
