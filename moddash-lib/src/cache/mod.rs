//! Lookup caching
//!
//! [`LookupCache`] memoizes remote lookups for a freshness window and
//! collapses concurrent identical requests into one in-flight fetch. It is
//! owned by the client that uses it, so tests get a fresh cache per client.

mod config;
mod lookup;

pub use config::*;
pub use lookup::*;
