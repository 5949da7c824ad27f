//! Headless table engine for the moderation dashboard.
//!
//! The engine turns caller-owned [`TableProps`](props::TableProps) into a
//! [`TableView`](table::TableView) of plain cell models and turns user
//! interaction ([`TableEvent`](table::TableEvent)) into callback calls. It
//! never performs I/O; page loading, mutations and errors belong to the
//! caller (usually an [`EntityFeed`](moddash_lib::feed::EntityFeed)).
//!
//! Pieces, leaves first:
//!
//! - [`column`]: column definitions, validated at build time
//! - [`compare`]: whether new props can reuse the last view
//! - [`row`] and [`entity`]: row renderers
//! - [`scroll`]: infinite-scroll state machine
//! - [`broken_icons`]: bounded memory of failed icons
//! - [`virtualize`]: row windowing for long lists

pub mod broken_icons;
pub mod callbacks;
pub mod cell;
pub mod column;
pub mod compare;
pub mod config;
pub mod entity;
pub mod error;
pub mod format;
pub mod props;
pub mod row;
pub mod scroll;
pub mod selection;
pub mod table;
pub mod virtualize;

pub mod prelude {
    pub use crate::broken_icons::BrokenIconCache;
    pub use crate::broken_icons::SharedBrokenIcons;
    pub use crate::callbacks::Callback;
    pub use crate::callbacks::TableCallbacks;
    pub use crate::cell::AvatarView;
    pub use crate::cell::Cell;
    pub use crate::cell::Tone;
    pub use crate::cell::Value;
    pub use crate::column::Accessor;
    pub use crate::column::ColumnDef;
    pub use crate::column::Columns;
    pub use crate::column::FieldKind;
    pub use crate::column::Record;
    pub use crate::config::TableConfig;
    pub use crate::entity::EntityRenderer;
    pub use crate::error::ColumnError;
    pub use crate::error::TableError;
    pub use crate::props::Rows;
    pub use crate::props::TableProps;
    pub use crate::row::ColumnRenderer;
    pub use crate::row::DisplayMode;
    pub use crate::row::RowRenderer;
    pub use crate::row::RowView;
    pub use crate::scroll::InfiniteScroll;
    pub use crate::scroll::ScrollPhase;
    pub use crate::selection::KeySet;
    pub use crate::selection::SelectionMode;
    pub use crate::selection::SelectionSet;
    pub use crate::table::Table;
    pub use crate::table::TableEvent;
    pub use crate::table::TableStatus;
    pub use crate::table::TableView;
    pub use crate::virtualize::Virtualizer;
    pub use crate::virtualize::Window;
}
