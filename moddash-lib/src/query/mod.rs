//! Entity queries.
//!
//! [`EntityQuery`] is the single description of "which rows, in which
//! order" shared by every list view. Backends either render it to REST
//! query parameters ([`EntityQuery::to_rest_pairs`]) or evaluate it in
//! process ([`EntityQuery::matches`], [`EntityQuery::compare`]).
//!
//! # Example
//!
//! ```
//! use moddash_lib::model::{Platform, ReviewOutcome};
//! use moddash_lib::query::{EntityQuery, OrderBy, SortField};
//!
//! let query = EntityQuery::new(Platform::Reddit)
//!     .search("crypto")
//!     .review(ReviewOutcome::Unreviewed)
//!     .order(OrderBy::desc(SortField::Audience))
//!     .page_size(50);
//! assert_eq!(query.page_size, 50);
//! ```

mod builder;
mod local;
mod order;
mod page;
mod rest;

pub use builder::*;
pub use order::*;
pub use page::*;
