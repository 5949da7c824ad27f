//! Column configuration model.
//!
//! A [`ColumnDef`] pairs an [`Accessor`] (how to read a value from a record)
//! with a [`FieldKind`] (how to present it). Every kind carries its own
//! options, so a percentage column without thresholds or an actions column
//! without actions cannot be expressed.
//!
//! Column sets are validated once, in [`Columns::new`]:
//!
//! ```
//! use moddash_table::column::{Accessor, ColumnDef, Columns, FieldKind, NumberOptions};
//! use moddash_lib::model::ListedEntity;
//!
//! let columns = Columns::<ListedEntity>::new(vec![
//!     ColumnDef::new("name", "Name", Accessor::field("name"), FieldKind::text()),
//!     ColumnDef::new("audience", "Members", Accessor::field("audience"),
//!         FieldKind::Number(NumberOptions::compact())),
//! ]);
//! assert!(columns.is_ok());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::cell::ActionView;
use crate::cell::AvatarView;
use crate::cell::BadgeView;
use crate::cell::Cell;
use crate::cell::NumberCell;
use crate::cell::SubtitleView;
use crate::cell::TextCell;
use crate::cell::Tone;
use crate::cell::Value;
use crate::cell::name_seed;
use crate::cell::placeholder_color;
use crate::cell::placeholder_letter;
use crate::error::ColumnError;
use crate::format::format_compact;
use crate::format::format_percent;
use crate::format::format_plain;
use crate::format::truncate_to_width;

// =============================================================================
// Record
// =============================================================================

/// A row type the table can display.
pub trait Record: Send + Sync + 'static {
    /// Unique, immutable identity of a row.
    type Key: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    fn key(&self) -> Self::Key;

    /// Names accepted by [`field`](Self::field).
    fn field_names() -> &'static [&'static str];

    /// Reads a named field. `None` means the name is unknown.
    fn field(&self, name: &str) -> Option<Value>;
}

// =============================================================================
// Accessor
// =============================================================================

/// Reads a value from a record, either by field name or by derivation.
pub enum Accessor<R> {
    Field(String),
    Derive(fn(&R) -> Value),
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(name) => Accessor::Field(name.clone()),
            Accessor::Derive(f) => Accessor::Derive(*f),
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

impl<R: Record> Accessor<R> {
    pub fn field(name: impl Into<String>) -> Self {
        Accessor::Field(name.into())
    }

    pub fn derive(f: fn(&R) -> Value) -> Self {
        Accessor::Derive(f)
    }

    pub fn read(&self, record: &R) -> Value {
        match self {
            Accessor::Field(name) => record.field(name).unwrap_or_default(),
            Accessor::Derive(f) => f(record),
        }
    }

    fn check(&self, column: &str) -> Result<(), ColumnError> {
        match self {
            Accessor::Field(name) if !R::field_names().contains(&name.as_str()) => {
                Err(ColumnError::UnknownField {
                    column: column.to_string(),
                    field: name.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

// =============================================================================
// Field kinds
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// How wide a column renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Fixed width in characters.
    Fixed(u16),
    /// Flexible width with weight.
    Flex(u16),
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Flex(1)
    }
}

pub enum Subtitle<R> {
    Text(Accessor<R>),
    Link { label: Accessor<R>, href: Accessor<R> },
}

impl<R> Clone for Subtitle<R> {
    fn clone(&self) -> Self {
        match self {
            Subtitle::Text(a) => Subtitle::Text(a.clone()),
            Subtitle::Link { label, href } => Subtitle::Link {
                label: label.clone(),
                href: href.clone(),
            },
        }
    }
}

pub struct TextOptions<R> {
    /// Maximum display width; longer text ends with `…`.
    pub max_len: Option<usize>,
    pub bold: bool,
    pub tone: Tone,
    pub subtitle: Option<Subtitle<R>>,
    /// List-valued accessor rendered as inline badges.
    pub badges: Option<Accessor<R>>,
}

impl<R> Default for TextOptions<R> {
    fn default() -> Self {
        Self {
            max_len: None,
            bold: false,
            tone: Tone::Neutral,
            subtitle: None,
            badges: None,
        }
    }
}

impl<R> Clone for TextOptions<R> {
    fn clone(&self) -> Self {
        Self {
            max_len: self.max_len,
            bold: self.bold,
            tone: self.tone,
            subtitle: self.subtitle.clone(),
            badges: self.badges.clone(),
        }
    }
}

impl<R> TextOptions<R> {
    pub fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn subtitle(mut self, subtitle: Subtitle<R>) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn badges(mut self, accessor: Accessor<R>) -> Self {
        self.badges = Some(accessor);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// Digit grouping: `12,345`.
    #[default]
    Plain,
    /// Magnitude suffix: `12.3K`.
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberOptions {
    pub format: NumberFormat,
    pub decimals: usize,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self::plain()
    }
}

impl NumberOptions {
    pub fn plain() -> Self {
        Self {
            format: NumberFormat::Plain,
            decimals: 0,
        }
    }

    pub fn compact() -> Self {
        Self {
            format: NumberFormat::Compact,
            decimals: 1,
        }
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn format(&self, value: f64) -> String {
        match self.format {
            NumberFormat::Plain => format_plain(value, self.decimals),
            NumberFormat::Compact => format_compact(value, self.decimals),
        }
    }
}

/// Ordered tone bands for ratios.
///
/// The tone is that of the first band whose upper bound exceeds the value,
/// otherwise `fallback`.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub bands: Vec<(f64, Tone)>,
    pub fallback: Tone,
}

impl Thresholds {
    pub fn new(fallback: Tone) -> Self {
        Self {
            bands: Vec::new(),
            fallback,
        }
    }

    /// Adds a band for values below `upper`.
    pub fn below(mut self, upper: f64, tone: Tone) -> Self {
        self.bands.push((upper, tone));
        self
    }

    pub fn tone_for(&self, value: f64) -> Tone {
        self.bands
            .iter()
            .find(|(upper, _)| *upper > value)
            .map_or(self.fallback, |(_, tone)| *tone)
    }

    pub fn is_ordered(&self) -> bool {
        self.bands.iter().all(|(upper, _)| upper.is_finite())
            && self.bands.windows(2).all(|w| w[0].0 < w[1].0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PercentOptions {
    pub thresholds: Thresholds,
    pub decimals: usize,
}

impl PercentOptions {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            decimals: 2,
        }
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }
}

/// Value → tone lookup for badge columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BadgeOptions {
    pub tones: Vec<(String, Tone)>,
    pub default_tone: Tone,
}

impl BadgeOptions {
    pub fn new(default_tone: Tone) -> Self {
        Self {
            tones: Vec::new(),
            default_tone,
        }
    }

    pub fn tone(mut self, value: impl Into<String>, tone: Tone) -> Self {
        self.tones.push((value.into(), tone));
        self
    }

    pub fn tone_for(&self, value: &str) -> Tone {
        self.tones
            .iter()
            .find(|(v, _)| v == value)
            .map_or(self.default_tone, |(_, tone)| *tone)
    }
}

pub struct AvatarOptions<R> {
    pub url: Accessor<R>,
    /// Source of the placeholder letter.
    pub name: Accessor<R>,
}

impl<R> Clone for AvatarOptions<R> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            name: self.name.clone(),
        }
    }
}

/// A clickable operation in an actions column.
pub struct ActionSpec<R> {
    pub id: String,
    pub label: String,
    pub disabled: Option<fn(&R) -> bool>,
    pub loading: Option<fn(&R) -> bool>,
}

impl<R> Clone for ActionSpec<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            disabled: self.disabled,
            loading: self.loading,
        }
    }
}

impl<R> ActionSpec<R> {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            disabled: None,
            loading: None,
        }
    }

    pub fn disabled_when(mut self, f: fn(&R) -> bool) -> Self {
        self.disabled = Some(f);
        self
    }

    pub fn loading_when(mut self, f: fn(&R) -> bool) -> Self {
        self.loading = Some(f);
        self
    }

    /// Whether a click on this action should be dispatched.
    pub fn is_enabled(&self, record: &R) -> bool {
        let disabled = self.disabled.is_some_and(|f| f(record));
        let loading = self.loading.is_some_and(|f| f(record));
        !disabled && !loading
    }

    fn view(&self, record: &R) -> ActionView {
        ActionView {
            id: self.id.clone(),
            label: self.label.clone(),
            disabled: self.disabled.is_some_and(|f| f(record)),
            loading: self.loading.is_some_and(|f| f(record)),
        }
    }
}

pub enum FieldKind<R> {
    Text(TextOptions<R>),
    Number(NumberOptions),
    Percentage(PercentOptions),
    Badge(BadgeOptions),
    Avatar(AvatarOptions<R>),
    Actions(Vec<ActionSpec<R>>),
    Custom(fn(&R) -> Cell),
}

impl<R> Clone for FieldKind<R> {
    fn clone(&self) -> Self {
        match self {
            FieldKind::Text(o) => FieldKind::Text(o.clone()),
            FieldKind::Number(o) => FieldKind::Number(*o),
            FieldKind::Percentage(o) => FieldKind::Percentage(o.clone()),
            FieldKind::Badge(o) => FieldKind::Badge(o.clone()),
            FieldKind::Avatar(o) => FieldKind::Avatar(o.clone()),
            FieldKind::Actions(a) => FieldKind::Actions(a.clone()),
            FieldKind::Custom(f) => FieldKind::Custom(*f),
        }
    }
}

impl<R> FieldKind<R> {
    pub fn text() -> Self {
        FieldKind::Text(TextOptions::default())
    }

    fn name(&self) -> &'static str {
        match self {
            FieldKind::Text(_) => "text",
            FieldKind::Number(_) => "number",
            FieldKind::Percentage(_) => "percentage",
            FieldKind::Badge(_) => "badge",
            FieldKind::Avatar(_) => "avatar",
            FieldKind::Actions(_) => "actions",
            FieldKind::Custom(_) => "custom",
        }
    }
}

// =============================================================================
// ColumnDef
// =============================================================================

pub struct ColumnDef<R> {
    pub id: String,
    pub header: String,
    pub accessor: Accessor<R>,
    pub kind: FieldKind<R>,
    pub align: Align,
    pub width: ColumnWidth,
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            kind: self.kind.clone(),
            align: self.align,
            width: self.width,
        }
    }
}

impl<R> fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("kind", &self.kind.name())
            .field("align", &self.align)
            .field("width", &self.width)
            .finish()
    }
}

impl<R: Record> ColumnDef<R> {
    /// Creates a column. Numeric kinds default to right alignment.
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: Accessor<R>,
        kind: FieldKind<R>,
    ) -> Self {
        let align = match kind {
            FieldKind::Number(_) | FieldKind::Percentage(_) => Align::Right,
            _ => Align::Left,
        };
        Self {
            id: id.into(),
            header: header.into(),
            accessor,
            kind,
            align,
            width: ColumnWidth::default(),
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set a fixed width for this column.
    pub fn fixed(mut self, width: u16) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Set a flex width for this column.
    pub fn flex(mut self, weight: u16) -> Self {
        self.width = ColumnWidth::Flex(weight);
        self
    }

    /// Checks this column on its own.
    pub fn validate(&self) -> Result<(), ColumnError> {
        self.accessor.check(&self.id)?;

        match &self.kind {
            FieldKind::Text(options) => {
                match &options.subtitle {
                    Some(Subtitle::Text(a)) => a.check(&self.id)?,
                    Some(Subtitle::Link { label, href }) => {
                        label.check(&self.id)?;
                        href.check(&self.id)?;
                    }
                    None => {}
                }
                if let Some(badges) = &options.badges {
                    badges.check(&self.id)?;
                }
            }
            FieldKind::Percentage(options) if !options.thresholds.is_ordered() => {
                return Err(ColumnError::UnorderedThresholds {
                    column: self.id.clone(),
                });
            }
            FieldKind::Avatar(options) => {
                options.url.check(&self.id)?;
                options.name.check(&self.id)?;
            }
            FieldKind::Actions(actions) if actions.is_empty() => {
                return Err(ColumnError::EmptyActions {
                    column: self.id.clone(),
                });
            }
            _ => {}
        }
        Ok(())
    }

    /// Renders this column for one record.
    ///
    /// `broken` tells avatar columns that the record's icon is known broken.
    pub fn render(&self, record: &R, broken: bool) -> Cell {
        match &self.kind {
            FieldKind::Custom(f) => f(record),
            FieldKind::Actions(actions) => {
                Cell::Actions(actions.iter().map(|a| a.view(record)).collect())
            }
            FieldKind::Avatar(options) => {
                let url = options.url.read(record).to_text();
                let name = options.name.read(record).to_text();
                if url.trim().is_empty() || broken {
                    Cell::Avatar(AvatarView::Placeholder {
                        letter: placeholder_letter(&name),
                        color: placeholder_color(name_seed(&name)),
                    })
                } else {
                    Cell::Avatar(AvatarView::Image { url })
                }
            }
            FieldKind::Text(options) => Cell::Text(render_text(options, record, &self.accessor)),
            FieldKind::Number(options) => match self.accessor.read(record).as_f64() {
                Some(value) => Cell::Number(NumberCell {
                    text: options.format(value),
                    value,
                    tone: Tone::Neutral,
                }),
                None => Cell::Empty,
            },
            FieldKind::Percentage(options) => match self.accessor.read(record).as_f64() {
                Some(value) => Cell::Number(NumberCell {
                    text: format_percent(value, options.decimals),
                    value,
                    tone: options.thresholds.tone_for(value),
                }),
                None => Cell::Empty,
            },
            FieldKind::Badge(options) => {
                let value = self.accessor.read(record);
                if value.is_null() {
                    Cell::Empty
                } else {
                    let label = value.to_text();
                    let tone = options.tone_for(&label);
                    Cell::Badge(BadgeView::new(label, tone))
                }
            }
        }
    }

    /// The action with `id`, when this is an actions column.
    pub fn action(&self, id: &str) -> Option<&ActionSpec<R>> {
        match &self.kind {
            FieldKind::Actions(actions) => actions.iter().find(|a| a.id == id),
            _ => None,
        }
    }
}

fn render_text<R: Record>(options: &TextOptions<R>, record: &R, accessor: &Accessor<R>) -> TextCell {
    let full = accessor.read(record).to_text();
    let (text, full_text) = match options.max_len {
        Some(max) => match truncate_to_width(&full, max) {
            (short, true) => (short, Some(full)),
            (short, false) => (short, None),
        },
        None => (full, None),
    };

    let subtitle = options.subtitle.as_ref().and_then(|s| match s {
        Subtitle::Text(a) => {
            let text = a.read(record).to_text();
            (!text.is_empty()).then_some(SubtitleView::Text(text))
        }
        Subtitle::Link { label, href } => {
            let href = href.read(record).to_text();
            (!href.is_empty()).then(|| SubtitleView::Link {
                label: label.read(record).to_text(),
                href,
            })
        }
    });

    let badges = options
        .badges
        .as_ref()
        .map(|a| {
            a.read(record)
                .into_list()
                .into_iter()
                .map(|label| BadgeView::new(label, Tone::Neutral))
                .collect()
        })
        .unwrap_or_default();

    TextCell {
        text,
        full_text,
        bold: options.bold,
        tone: options.tone,
        subtitle,
        badges,
    }
}

// =============================================================================
// Columns
// =============================================================================

/// A validated, ordered set of columns.
pub struct Columns<R> {
    defs: Vec<ColumnDef<R>>,
}

impl<R> Clone for Columns<R> {
    fn clone(&self) -> Self {
        Self {
            defs: self.defs.clone(),
        }
    }
}

impl<R> fmt::Debug for Columns<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.defs).finish()
    }
}

impl<R: Record> Columns<R> {
    /// Validates every column and rejects duplicate ids.
    pub fn new(defs: Vec<ColumnDef<R>>) -> Result<Self, ColumnError> {
        if defs.is_empty() {
            return Err(ColumnError::NoColumns);
        }

        let mut seen = HashSet::new();
        for def in &defs {
            if !seen.insert(def.id.as_str()) {
                return Err(ColumnError::DuplicateColumn(def.id.clone()));
            }
            def.validate()?;
        }
        Ok(Self { defs })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDef<R>> {
        self.defs.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDef<R>> {
        self.defs.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        id: u32,
        name: String,
        score: f64,
        url: String,
    }

    impl Record for Item {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }

        fn field_names() -> &'static [&'static str] {
            &["name", "score", "url"]
        }

        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "name" => Some(self.name.clone().into()),
                "score" => Some(self.score.into()),
                "url" => Some(self.url.clone().into()),
                _ => None,
            }
        }
    }

    fn item() -> Item {
        Item {
            id: 7,
            name: "widget".into(),
            score: 0.034,
            url: String::new(),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Columns::<Item>::new(vec![ColumnDef::new(
            "x",
            "X",
            Accessor::field("missing"),
            FieldKind::text(),
        )]);
        assert_eq!(
            result.unwrap_err(),
            ColumnError::UnknownField {
                column: "x".into(),
                field: "missing".into()
            }
        );
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = Columns::<Item>::new(vec![
            ColumnDef::new("name", "A", Accessor::field("name"), FieldKind::text()),
            ColumnDef::new("name", "B", Accessor::field("name"), FieldKind::text()),
        ]);
        assert_eq!(result.unwrap_err(), ColumnError::DuplicateColumn("name".into()));
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let thresholds = Thresholds::new(Tone::Positive)
            .below(0.05, Tone::Warning)
            .below(0.01, Tone::Negative);
        let result = Columns::<Item>::new(vec![ColumnDef::new(
            "score",
            "Score",
            Accessor::field("score"),
            FieldKind::Percentage(PercentOptions::new(thresholds)),
        )]);
        assert!(matches!(result, Err(ColumnError::UnorderedThresholds { .. })));
    }

    #[test]
    fn test_empty_actions_rejected() {
        let result = Columns::<Item>::new(vec![ColumnDef::new(
            "actions",
            "",
            Accessor::derive(|_| Value::Null),
            FieldKind::Actions(Vec::new()),
        )]);
        assert!(matches!(result, Err(ColumnError::EmptyActions { .. })));
    }

    #[test]
    fn test_avatar_accessors_are_checked() {
        let result = Columns::<Item>::new(vec![ColumnDef::new(
            "icon",
            "",
            Accessor::field("url"),
            FieldKind::Avatar(AvatarOptions {
                url: Accessor::field("url"),
                name: Accessor::field("title"),
            }),
        )]);
        assert!(matches!(result, Err(ColumnError::UnknownField { .. })));
    }

    #[test]
    fn test_threshold_tone_is_first_band_above_value() {
        let thresholds = Thresholds::new(Tone::Positive)
            .below(0.01, Tone::Negative)
            .below(0.05, Tone::Warning);
        assert_eq!(thresholds.tone_for(0.005), Tone::Negative);
        assert_eq!(thresholds.tone_for(0.01), Tone::Warning);
        assert_eq!(thresholds.tone_for(0.034), Tone::Warning);
        assert_eq!(thresholds.tone_for(0.2), Tone::Positive);
    }

    #[test]
    fn test_render_percentage_with_tone() {
        let def = ColumnDef::new(
            "score",
            "Score",
            Accessor::field("score"),
            FieldKind::Percentage(PercentOptions::new(
                Thresholds::new(Tone::Positive).below(0.05, Tone::Warning),
            )),
        );
        assert_eq!(def.align, Align::Right);
        match def.render(&item(), false) {
            Cell::Number(cell) => {
                assert_eq!(cell.text, "3.40%");
                assert_eq!(cell.tone, Tone::Warning);
            }
            other => panic!("unexpected cell {:?}", other),
        }
    }

    #[test]
    fn test_render_text_truncates() {
        let def = ColumnDef::new(
            "name",
            "Name",
            Accessor::field("name"),
            FieldKind::Text(TextOptions::default().max_len(4).bold()),
        );
        match def.render(&item(), false) {
            Cell::Text(cell) => {
                assert_eq!(cell.text, "wid…");
                assert_eq!(cell.full_text.as_deref(), Some("widget"));
                assert!(cell.bold);
            }
            other => panic!("unexpected cell {:?}", other),
        }
    }

    #[test]
    fn test_render_derived_value() {
        let def = ColumnDef::new(
            "double",
            "Double",
            Accessor::derive(|i: &Item| Value::Float(i.score * 2.0)),
            FieldKind::Number(NumberOptions::plain().decimals(3)),
        );
        assert_eq!(def.render(&item(), false).plain_text(), "0.068");
    }

    #[test]
    fn test_render_avatar_placeholder_when_url_empty() {
        let def = ColumnDef::new(
            "icon",
            "",
            Accessor::field("url"),
            FieldKind::Avatar(AvatarOptions {
                url: Accessor::field("url"),
                name: Accessor::field("name"),
            }),
        );
        assert_eq!(def.render(&item(), false).plain_text(), "W");
    }

    #[test]
    fn test_action_enabled_state() {
        let action = ActionSpec::<Item>::new("boost", "Boost").disabled_when(|i| i.score < 0.05);
        assert!(!action.is_enabled(&item()));
        let view = action.view(&item());
        assert!(view.disabled);
        assert!(!view.loading);
    }
}
