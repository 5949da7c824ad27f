//! Aggregate numbers for the metrics cards.

use serde::Serialize;

use super::ListedEntity;
use super::ReviewOutcome;

/// Review counts and averages over a set of entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub total: usize,
    pub unreviewed: usize,
    pub approved: usize,
    pub rejected: usize,
    pub no_seller: usize,
    /// Mean engagement ratio, `None` for an empty set.
    pub mean_engagement: Option<f64>,
    pub total_audience: u64,
}

impl ReviewSummary {
    pub fn from_entities<'a>(entities: impl IntoIterator<Item = &'a ListedEntity>) -> Self {
        let mut summary = Self::default();
        let mut engagement_sum = 0.0;

        for entity in entities {
            summary.total += 1;
            summary.total_audience = summary.total_audience.saturating_add(entity.audience);
            engagement_sum += entity.engagement;
            match entity.outcome() {
                ReviewOutcome::Unreviewed => summary.unreviewed += 1,
                ReviewOutcome::Approved => summary.approved += 1,
                ReviewOutcome::Rejected => summary.rejected += 1,
                ReviewOutcome::NoSeller => summary.no_seller += 1,
            }
        }

        if summary.total > 0 {
            summary.mean_engagement = Some(engagement_sum / summary.total as f64);
        }
        summary
    }

    /// Share of entities that have been reviewed (0.0 to 1.0).
    pub fn reviewed_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.total - self.unreviewed) as f64 / self.total as f64
        }
    }

    pub fn count(&self, outcome: ReviewOutcome) -> usize {
        match outcome {
            ReviewOutcome::Unreviewed => self.unreviewed,
            ReviewOutcome::Approved => self.approved,
            ReviewOutcome::Rejected => self.rejected,
            ReviewOutcome::NoSeller => self.no_seller,
        }
    }
}
