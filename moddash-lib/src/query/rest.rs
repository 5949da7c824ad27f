//! PostgREST rendering of entity queries.

use crate::error::ValidationError;
use crate::model::InstagramReview;
use crate::model::ReviewStatus;

use super::Direction;
use super::EntityQuery;

impl EntityQuery {
    /// Renders the query as PostgREST query parameters for one page.
    ///
    /// Parameters are returned unencoded; the caller appends them with
    /// `Url::query_pairs_mut`.
    pub fn to_rest_pairs(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<(String, String)>, ValidationError> {
        let schema = self.platform.schema();
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        let mut or_groups = Vec::new();

        if let Some(term) = self.search.as_deref().map(sanitize_term) {
            if !term.is_empty() {
                or_groups.push(format!(
                    "{}.ilike.*{}*,{}.ilike.*{}*",
                    schema.name, term, schema.title, term
                ));
            }
        }

        if let Some(outcome) = self.review {
            match ReviewStatus::from_outcome(self.platform, outcome)? {
                None => pairs.push((schema.review.to_string(), "is.null".to_string())),
                // Older creator rows carry null instead of "pending".
                Some(ReviewStatus::Instagram(InstagramReview::Pending)) => or_groups.push(format!(
                    "{}.is.null,{}.eq.pending",
                    schema.review, schema.review
                )),
                Some(status) => {
                    pairs.push((schema.review.to_string(), format!("eq.{}", status.as_str())))
                }
            }
        }

        if !self.tags.is_empty() {
            let quoted: Vec<String> = self.tags.iter().map(|t| quote(t)).collect();
            pairs.push((schema.tags.to_string(), format!("cs.{{{}}}", quoted.join(","))));
        }

        match or_groups.len() {
            0 => {}
            1 => pairs.push(("or".to_string(), format!("({})", or_groups[0]))),
            _ => {
                let groups: Vec<String> = or_groups.iter().map(|g| format!("or({})", g)).collect();
                pairs.push(("and".to_string(), format!("({})", groups.join(","))));
            }
        }

        let direction = match self.order.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc.nullslast",
        };
        pairs.push((
            "order".to_string(),
            format!(
                "{}.{},{}.asc",
                self.order.field.column(schema),
                direction,
                schema.id
            ),
        ));
        pairs.push(("offset".to_string(), offset.to_string()));
        pairs.push(("limit".to_string(), limit.to_string()));

        Ok(pairs)
    }
}

/// Drops characters with meaning inside PostgREST logic trees.
fn sanitize_term(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*' | '"' | '\\' | ':'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Platform;
    use crate::model::ReviewOutcome;
    use crate::query::OrderBy;
    use crate::query::SortField;

    fn get<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_reddit_query() {
        let pairs = EntityQuery::new(Platform::Reddit).to_rest_pairs(0, 20).unwrap();
        assert_eq!(get(&pairs, "select"), Some("*"));
        assert_eq!(get(&pairs, "order"), Some("subscribers.desc.nullslast,id.asc"));
        assert_eq!(get(&pairs, "offset"), Some("0"));
        assert_eq!(get(&pairs, "limit"), Some("20"));
    }

    #[test]
    fn test_review_filters_use_platform_vocabulary() {
        let reddit = EntityQuery::new(Platform::Reddit)
            .review(ReviewOutcome::Approved)
            .to_rest_pairs(0, 20)
            .unwrap();
        assert_eq!(get(&reddit, "review"), Some("eq.Ok"));

        let instagram = EntityQuery::new(Platform::Instagram)
            .review(ReviewOutcome::Approved)
            .to_rest_pairs(0, 20)
            .unwrap();
        assert_eq!(get(&instagram, "review_status"), Some("eq.ok"));

        let unreviewed = EntityQuery::new(Platform::Reddit)
            .review(ReviewOutcome::Unreviewed)
            .to_rest_pairs(0, 20)
            .unwrap();
        assert_eq!(get(&unreviewed, "review"), Some("is.null"));
    }

    #[test]
    fn test_search_and_pending_combine_into_and_group() {
        let pairs = EntityQuery::new(Platform::Instagram)
            .search("fit(ness)")
            .review(ReviewOutcome::Unreviewed)
            .order(OrderBy::asc(SortField::Name))
            .to_rest_pairs(40, 20)
            .unwrap();

        assert_eq!(get(&pairs, "or"), None);
        assert_eq!(
            get(&pairs, "and"),
            Some(
                "(or(username.ilike.*fitness*,biography.ilike.*fitness*),or(review_status.is.null,review_status.eq.pending))"
            )
        );
        assert_eq!(get(&pairs, "order"), Some("username.asc,id.asc"));
        assert_eq!(get(&pairs, "offset"), Some("40"));
    }

    #[test]
    fn test_tag_filter_is_quoted() {
        let pairs = EntityQuery::new(Platform::Reddit)
            .tag("Fitness & Health")
            .to_rest_pairs(0, 20)
            .unwrap();
        assert_eq!(get(&pairs, "tags"), Some("cs.{\"Fitness & Health\"}"));
    }

    #[test]
    fn test_unsupported_outcome_is_an_error() {
        let result = EntityQuery::new(Platform::Instagram)
            .review(ReviewOutcome::NoSeller)
            .to_rest_pairs(0, 20);
        assert!(result.is_err());
    }
}
