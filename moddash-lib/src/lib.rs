//! Moderation dashboard data library
//!
//! Typed access to the subreddit and creator review queues: paged entity
//! queries, review and tag mutations, a single-flight TTL cache for lookups,
//! and an [`feed::EntityFeed`] that accumulates pages for infinite scroll.
//!
//! Two [`backend::Backend`] implementations are provided: [`ModdashClient`]
//! for the hosted REST API and [`backend::MemoryBackend`] for tests and
//! offline demos.

pub mod backend;
pub mod cache;
pub mod debounce;
pub mod error;
pub mod feed;
pub mod model;
pub mod query;
pub mod response;

mod client;

pub use client::*;
pub use response::CacheStatus;
pub use response::Response;
