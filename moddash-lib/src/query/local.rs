//! In-process evaluation of entity queries.

use std::cmp::Ordering;

use crate::model::ListedEntity;

use super::Direction;
use super::EntityQuery;
use super::SortField;

impl EntityQuery {
    /// Returns `true` if the entity passes every filter of this query.
    pub fn matches(&self, entity: &ListedEntity) -> bool {
        if entity.platform != self.platform {
            return false;
        }

        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let in_name = entity.name.to_lowercase().contains(&term);
            let in_title = entity
                .title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&term));
            if !in_name && !in_title {
                return false;
            }
        }

        if let Some(outcome) = self.review {
            if entity.outcome() != outcome {
                return false;
            }
        }

        self.tags.iter().all(|tag| entity.has_tag(tag))
    }

    /// Orders two entities the way the backend would.
    pub fn compare(&self, a: &ListedEntity, b: &ListedEntity) -> Ordering {
        let primary = match self.order.field {
            SortField::Audience => a.audience.cmp(&b.audience),
            SortField::Engagement => a.engagement.total_cmp(&b.engagement),
            SortField::AvgPerformance => a.avg_performance.total_cmp(&b.avg_performance),
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        };
        let primary = match self.order.direction {
            Direction::Asc => primary,
            Direction::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Platform;
    use crate::model::RedditReview;
    use crate::model::ReviewOutcome;
    use crate::model::ReviewStatus;
    use crate::query::OrderBy;

    #[test]
    fn test_matches_search_in_title() {
        let entity =
            ListedEntity::new(1, Platform::Reddit, "rust").with_title("Systems Programming");
        assert!(EntityQuery::new(Platform::Reddit).search("programming").matches(&entity));
        assert!(!EntityQuery::new(Platform::Reddit).search("python").matches(&entity));
        assert!(!EntityQuery::new(Platform::Instagram).matches(&entity));
    }

    #[test]
    fn test_matches_review_and_tags() {
        let entity = ListedEntity::new(1, Platform::Reddit, "rust")
            .with_review(ReviewStatus::Reddit(RedditReview::Ok))
            .with_tags(["Tech", "Programming"]);

        let query = EntityQuery::new(Platform::Reddit)
            .review(ReviewOutcome::Approved)
            .tag("tech");
        assert!(query.matches(&entity));
        assert!(!query.clone().tag("gaming").matches(&entity));
        assert!(!EntityQuery::new(Platform::Reddit)
            .review(ReviewOutcome::Unreviewed)
            .matches(&entity));
    }

    #[test]
    fn test_compare_breaks_ties_by_id() {
        let a = ListedEntity::new(2, Platform::Reddit, "a").with_audience(10);
        let b = ListedEntity::new(1, Platform::Reddit, "b").with_audience(10);
        let query = EntityQuery::new(Platform::Reddit).order(OrderBy::desc(SortField::Audience));
        assert_eq!(query.compare(&a, &b), Ordering::Greater);
    }
}
