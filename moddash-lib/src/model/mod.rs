//! Entity model shared by the data layer and the table engine.
//!
//! Two content platforms are served by one model: Reddit communities and
//! Instagram creators. Their review vocabularies differ, see [`ReviewStatus`].

mod entity;
mod review;
mod row;
mod summary;

pub use entity::*;
pub use review::*;
pub use row::*;
pub use summary::*;
