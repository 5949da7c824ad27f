//! Headless cell view models.
//!
//! Renderers produce these; the host maps them onto whatever it draws with.

use moddash_lib::model::ReviewStatus;

// =============================================================================
// Value
// =============================================================================

/// A field value read from a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text view of the value. `Null` becomes the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::List(items) => items.join(", "),
        }
    }

    pub fn into_list(self) -> Vec<String> {
        match self {
            Value::List(items) => items,
            Value::Null => Vec::new(),
            other => {
                let text = other.to_text();
                if text.is_empty() { Vec::new() } else { vec![text] }
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Option<String>> for Value {
    fn from(s: Option<String>) -> Self {
        s.map_or(Value::Null, Value::Text)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        i64::try_from(i).map_or(Value::Float(i as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

// =============================================================================
// Tone
// =============================================================================

/// Semantic colour of a cell or badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Muted,
    Info,
    Positive,
    Warning,
    Negative,
}

// =============================================================================
// Cell
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(TextCell),
    Number(NumberCell),
    Badge(BadgeView),
    Avatar(AvatarView),
    Actions(Vec<ActionView>),
    Checkbox { checked: bool },
    Review(ReviewControl),
    Tags(TagList),
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text(TextCell::new(text))
    }

    /// Plain text of the cell, for terminal output and assertions.
    pub fn plain_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(t) => t.text.clone(),
            Cell::Number(n) => n.text.clone(),
            Cell::Badge(b) => b.label.clone(),
            Cell::Avatar(AvatarView::Image { .. }) => String::new(),
            Cell::Avatar(AvatarView::Placeholder { letter, .. }) => letter.to_string(),
            Cell::Actions(actions) => actions
                .iter()
                .map(|a| a.label.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            Cell::Checkbox { checked } => (if *checked { "[x]" } else { "[ ]" }).to_string(),
            Cell::Review(control) => control
                .active()
                .map(|b| b.label.to_string())
                .unwrap_or_default(),
            Cell::Tags(tags) => tags
                .tags
                .iter()
                .map(|t| t.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextCell {
    pub text: String,
    /// Set when `text` was shortened; holds the full value.
    pub full_text: Option<String>,
    pub bold: bool,
    pub tone: Tone,
    pub subtitle: Option<SubtitleView>,
    pub badges: Vec<BadgeView>,
}

impl TextCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubtitleView {
    Text(String),
    Link { label: String, href: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberCell {
    pub text: String,
    pub value: f64,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    pub label: String,
    pub tone: Tone,
}

impl BadgeView {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }
}

/// Avatar after icon resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarView {
    /// Load `url`; report a failure with `TableEvent::IconFailed`.
    Image { url: String },
    /// First-letter placeholder on a colour derived from the record.
    Placeholder { letter: char, color: &'static str },
}

impl AvatarView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, AvatarView::Placeholder { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub id: String,
    pub label: String,
    pub disabled: bool,
    pub loading: bool,
}

/// Mutually exclusive review buttons for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewControl {
    pub buttons: Vec<ReviewButton>,
}

impl ReviewControl {
    pub fn active(&self) -> Option<&ReviewButton> {
        self.buttons.iter().find(|b| b.active)
    }

    pub fn button(&self, label: &str) -> Option<&ReviewButton> {
        self.buttons.iter().find(|b| b.label == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewButton {
    pub status: ReviewStatus,
    pub label: &'static str,
    pub active: bool,
}

/// Tag badges with optional editing affordances.
///
/// An affordance whose callback is not supplied is absent, not disabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagList {
    pub tags: Vec<TagBadge>,
    pub can_add: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBadge {
    pub label: String,
    pub editable: bool,
    pub removable: bool,
}

const PLACEHOLDER_COLORS: [&str; 8] = [
    "#ef4444", "#f97316", "#eab308", "#22c55e", "#14b8a6", "#3b82f6", "#8b5cf6", "#ec4899",
];

/// Stable placeholder colour for a seed (entity id, name hash).
pub fn placeholder_color(seed: u64) -> &'static str {
    PLACEHOLDER_COLORS[(seed % PLACEHOLDER_COLORS.len() as u64) as usize]
}

/// First alphanumeric character of `name`, uppercased, or `?`.
pub fn placeholder_letter(name: &str) -> char {
    name.chars()
        .find(|c| c.is_alphanumeric())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}

/// FNV-1a over the name, used when a record has no numeric id.
pub fn name_seed(name: &str) -> u64 {
    name.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}
