//! Ordering types for entity queries.

use std::fmt;
use std::str::FromStr;

use crate::model::Schema;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// Columns an entity list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Audience,
    Engagement,
    AvgPerformance,
    Name,
}

impl SortField {
    /// Backend column name for this field.
    pub fn column(&self, schema: &Schema) -> &'static str {
        match self {
            Self::Audience => schema.audience,
            Self::Engagement => schema.engagement,
            Self::AvgPerformance => schema.avg_performance,
            Self::Name => schema.name,
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "audience" | "subscribers" | "followers" => Ok(Self::Audience),
            "engagement" => Ok(Self::Engagement),
            "avg_performance" | "performance" => Ok(Self::AvgPerformance),
            "name" => Ok(Self::Name),
            other => Err(format!("unknown sort field '{}'", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Audience => "audience",
            Self::Engagement => "engagement",
            Self::AvgPerformance => "avg_performance",
            Self::Name => "name",
        })
    }
}

/// Ordering of query results. Ties are always broken by ascending id so
/// offset pagination is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderBy {
    pub field: SortField,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

impl Default for OrderBy {
    fn default() -> Self {
        Self::desc(SortField::Audience)
    }
}
