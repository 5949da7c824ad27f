//! Rendering for subreddits and creators.

use moddash_lib::model::EntityId;
use moddash_lib::model::ListedEntity;
use moddash_lib::model::Platform;
use moddash_lib::model::ReviewStatus;

use crate::cell::AvatarView;
use crate::cell::BadgeView;
use crate::cell::Cell;
use crate::cell::NumberCell;
use crate::cell::ReviewButton;
use crate::cell::ReviewControl;
use crate::cell::SubtitleView;
use crate::cell::TagBadge;
use crate::cell::TagList;
use crate::cell::TextCell;
use crate::cell::Tone;
use crate::cell::Value;
use crate::cell::placeholder_color;
use crate::cell::placeholder_letter;
use crate::column::Align;
use crate::column::NumberOptions;
use crate::column::Record;
use crate::column::Thresholds;
use crate::format::format_percent;
use crate::format::truncate_to_width;
use crate::row::DisplayMode;
use crate::row::Header;
use crate::row::RowContext;
use crate::row::RowRenderer;
use crate::row::RowView;
use crate::row::SELECT_COLUMN;
use crate::row::select_header_for;
use crate::selection::SelectionMode;

pub const ICON_COLUMN: &str = "icon";
pub const NAME_COLUMN: &str = "name";
pub const AUDIENCE_COLUMN: &str = "audience";
pub const ENGAGEMENT_COLUMN: &str = "engagement";
pub const PERFORMANCE_COLUMN: &str = "avg_performance";
pub const REVIEW_COLUMN: &str = "review";
pub const TAGS_COLUMN: &str = "tags";

const FIELDS: &[&str] = &[
    "id",
    "platform",
    "name",
    "handle",
    "title",
    "audience",
    "engagement",
    "avg_performance",
    "review",
    "outcome",
    "tags",
    "icon_url",
    "secondary_icon_url",
    "adult",
    "verified",
    "private",
];

impl Record for ListedEntity {
    type Key = EntityId;

    fn key(&self) -> EntityId {
        self.id
    }

    fn field_names() -> &'static [&'static str] {
        FIELDS
    }

    fn field(&self, name: &str) -> Option<Value> {
        let value = match name {
            "id" => Value::Int(self.id.0),
            "platform" => Value::from(self.platform.as_str()),
            "name" => Value::from(self.name.clone()),
            "handle" => Value::from(self.handle()),
            "title" => Value::from(self.title.clone()),
            "audience" => Value::from(self.audience),
            "engagement" => Value::Float(self.engagement),
            "avg_performance" => Value::Float(self.avg_performance),
            "review" => self
                .review
                .map_or(Value::Null, |r| Value::from(r.as_str())),
            "outcome" => Value::from(self.outcome().as_str()),
            "tags" => Value::List(self.tags.clone()),
            "icon_url" => Value::from(self.icon_url.clone()),
            "secondary_icon_url" => Value::from(self.secondary_icon_url.clone()),
            "adult" => Value::Bool(self.flags.adult),
            "verified" => Value::Bool(self.flags.verified),
            "private" => Value::Bool(self.flags.private),
            _ => return None,
        };
        Some(value)
    }
}

/// Resolves the avatar for an entity.
///
/// Primary icon, then secondary icon, then a first-letter placeholder. A
/// broken icon always yields the placeholder.
pub fn resolve_icon(entity: &ListedEntity, broken: bool) -> AvatarView {
    let url = [&entity.icon_url, &entity.secondary_icon_url]
        .into_iter()
        .flatten()
        .find(|u| !u.trim().is_empty());

    match url {
        Some(url) if !broken => AvatarView::Image { url: url.clone() },
        _ => AvatarView::Placeholder {
            letter: placeholder_letter(&entity.name),
            color: placeholder_color(entity.id.0.unsigned_abs()),
        },
    }
}

/// Profile URL on the platform itself.
pub fn profile_url(entity: &ListedEntity) -> String {
    match entity.platform {
        Platform::Reddit => format!("https://www.reddit.com/r/{}", entity.name),
        Platform::Instagram => format!("https://www.instagram.com/{}", entity.name),
    }
}

/// The review buttons for an entity, with its current status flagged.
pub fn review_control(entity: &ListedEntity) -> ReviewControl {
    ReviewControl {
        buttons: ReviewStatus::choices(entity.platform)
            .iter()
            .map(|status| ReviewButton {
                status: *status,
                label: status.as_str(),
                active: entity.review == Some(*status),
            })
            .collect(),
    }
}

/// [`RowRenderer`] for [`ListedEntity`] rows.
#[derive(Debug, Clone)]
pub struct EntityRenderer {
    platform: Option<Platform>,
    name_width: usize,
    engagement: Thresholds,
    audience: NumberOptions,
}

impl Default for EntityRenderer {
    fn default() -> Self {
        Self {
            platform: None,
            name_width: 32,
            engagement: Thresholds::new(Tone::Positive)
                .below(0.01, Tone::Negative)
                .below(0.05, Tone::Warning),
            audience: NumberOptions::compact(),
        }
    }
}

impl EntityRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses platform-specific header labels.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform: Some(platform),
            ..Self::default()
        }
    }

    /// Maximum display width of the name cell.
    pub fn name_width(mut self, width: usize) -> Self {
        self.name_width = width;
        self
    }

    pub fn engagement_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.engagement = thresholds;
        self
    }

    fn audience_label(&self) -> &'static str {
        match self.platform {
            Some(Platform::Reddit) => "Subscribers",
            Some(Platform::Instagram) => "Followers",
            None => "Audience",
        }
    }

    fn performance_label(&self) -> &'static str {
        match self.platform {
            Some(Platform::Reddit) => "Avg Upvotes",
            Some(Platform::Instagram) => "Avg Likes",
            None => "Avg Performance",
        }
    }

    fn name_cell(&self, entity: &ListedEntity) -> Cell {
        let (text, cut) = truncate_to_width(&entity.name, self.name_width);

        let mut badges = Vec::new();
        if entity.flags.adult {
            badges.push(BadgeView::new("NSFW", Tone::Negative));
        }
        if entity.flags.verified {
            badges.push(BadgeView::new("Verified", Tone::Info));
        }
        if entity.flags.private {
            badges.push(BadgeView::new("Private", Tone::Muted));
        }

        Cell::Text(TextCell {
            text,
            full_text: cut.then(|| entity.name.clone()),
            bold: true,
            tone: Tone::Neutral,
            subtitle: Some(SubtitleView::Link {
                label: entity.handle(),
                href: profile_url(entity),
            }),
            badges,
        })
    }

    fn number_cell(&self, value: f64) -> Cell {
        Cell::Number(NumberCell {
            text: self.audience.format(value),
            value,
            tone: Tone::Neutral,
        })
    }

    fn engagement_cell(&self, ratio: f64) -> Cell {
        Cell::Number(NumberCell {
            text: format_percent(ratio, 2),
            value: ratio,
            tone: self.engagement.tone_for(ratio),
        })
    }
}

impl RowRenderer<ListedEntity> for EntityRenderer {
    fn headers(&self, mode: DisplayMode, selection: SelectionMode) -> Vec<Header> {
        let mut headers: Vec<Header> = select_header_for(selection).into_iter().collect();
        headers.push(Header::new(ICON_COLUMN, "").fixed(4).align(Align::Center));
        headers.push(Header::new(NAME_COLUMN, "Name").flex(3));
        headers.push(Header::new(AUDIENCE_COLUMN, self.audience_label()).align(Align::Right));
        headers.push(Header::new(ENGAGEMENT_COLUMN, "Engagement").align(Align::Right));

        match mode {
            DisplayMode::Review => {
                headers.push(Header::new(REVIEW_COLUMN, "Review").flex(2));
            }
            DisplayMode::Category => {
                headers.push(
                    Header::new(PERFORMANCE_COLUMN, self.performance_label()).align(Align::Right),
                );
                headers.push(Header::new(TAGS_COLUMN, "Tags").flex(3));
            }
        }
        headers
    }

    fn accepts_review(&self, entity: &ListedEntity, status: ReviewStatus) -> bool {
        status.platform() == entity.platform
    }

    fn render(&self, entity: &ListedEntity, ctx: &RowContext<'_, EntityId>) -> RowView<EntityId> {
        let key = entity.id;
        let mut cells = Vec::with_capacity(7);

        if let Some(checkbox) = ctx.checkbox(&key) {
            cells.push((SELECT_COLUMN.to_string(), checkbox));
        }
        cells.push((
            ICON_COLUMN.to_string(),
            Cell::Avatar(resolve_icon(entity, ctx.icon_broken)),
        ));
        cells.push((NAME_COLUMN.to_string(), self.name_cell(entity)));
        cells.push((
            AUDIENCE_COLUMN.to_string(),
            self.number_cell(entity.audience as f64),
        ));
        cells.push((
            ENGAGEMENT_COLUMN.to_string(),
            self.engagement_cell(entity.engagement),
        ));

        match ctx.mode {
            DisplayMode::Review => {
                cells.push((REVIEW_COLUMN.to_string(), Cell::Review(review_control(entity))));
            }
            DisplayMode::Category => {
                cells.push((
                    PERFORMANCE_COLUMN.to_string(),
                    self.number_cell(entity.avg_performance),
                ));
                cells.push((
                    TAGS_COLUMN.to_string(),
                    Cell::Tags(TagList {
                        tags: entity
                            .tags
                            .iter()
                            .map(|tag| TagBadge {
                                label: tag.clone(),
                                editable: ctx.tags.edit,
                                removable: ctx.tags.remove,
                            })
                            .collect(),
                        can_add: ctx.tags.add,
                    }),
                ));
            }
        }

        RowView {
            selected: ctx.is_selected(&key),
            highlighted: ctx.is_highlighted(),
            removing: ctx.is_removing(&key),
            key,
            index: ctx.index,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::TagAffordances;
    use crate::selection::KeySet;
    use moddash_lib::model::EntityFlags;
    use moddash_lib::model::InstagramReview;
    use moddash_lib::model::RedditReview;

    fn ctx<'a>(mode: DisplayMode) -> RowContext<'a, EntityId> {
        RowContext {
            index: 0,
            mode,
            selection_mode: SelectionMode::None,
            selection: None,
            highlighted: None,
            removing: None,
            icon_broken: false,
            tags: TagAffordances::default(),
        }
    }

    #[test]
    fn test_icon_resolution_order() {
        let entity = ListedEntity::new(1, Platform::Reddit, "rust");
        assert!(resolve_icon(&entity, false).is_placeholder());

        let secondary = entity.clone().with_secondary_icon("https://b/icon.png");
        assert_eq!(
            resolve_icon(&secondary, false),
            AvatarView::Image {
                url: "https://b/icon.png".into()
            }
        );

        let both = secondary.clone().with_icon("https://a/icon.png");
        assert_eq!(
            resolve_icon(&both, false),
            AvatarView::Image {
                url: "https://a/icon.png".into()
            }
        );

        let blank_primary = secondary.with_icon("  ");
        assert_eq!(
            resolve_icon(&blank_primary, false),
            AvatarView::Image {
                url: "https://b/icon.png".into()
            }
        );

        match resolve_icon(&both, true) {
            AvatarView::Placeholder { letter, .. } => assert_eq!(letter, 'R'),
            other => panic!("expected placeholder, got {:?}", other),
        }
    }

    #[test]
    fn test_review_buttons_per_platform() {
        let reddit = ListedEntity::new(1, Platform::Reddit, "rust")
            .with_review(ReviewStatus::Reddit(RedditReview::NoSeller));
        let control = review_control(&reddit);
        let labels: Vec<_> = control.buttons.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["Ok", "No Seller", "Non Related"]);
        assert_eq!(control.active().map(|b| b.label), Some("No Seller"));

        let creator = ListedEntity::new(2, Platform::Instagram, "someone");
        let control = review_control(&creator);
        let labels: Vec<_> = control.buttons.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["ok", "non_related"]);
        assert!(control.active().is_none());
        assert_eq!(
            control.button("ok").map(|b| b.status),
            Some(ReviewStatus::Instagram(InstagramReview::Ok))
        );
    }

    #[test]
    fn test_category_mode_affordances() {
        let entity = ListedEntity::new(1, Platform::Reddit, "rust").with_tags(["lang"]);
        let mut context = ctx(DisplayMode::Category);
        context.tags = TagAffordances {
            add: true,
            remove: false,
            edit: true,
        };

        let row = EntityRenderer::new().render(&entity, &context);
        assert!(row.cell(REVIEW_COLUMN).is_none());
        match row.cell(TAGS_COLUMN) {
            Some(Cell::Tags(list)) => {
                assert!(list.can_add);
                assert_eq!(list.tags.len(), 1);
                assert!(list.tags[0].editable);
                assert!(!list.tags[0].removable);
            }
            other => panic!("unexpected tags cell {:?}", other),
        }
    }

    #[test]
    fn test_checkbox_only_with_selection() {
        let entity = ListedEntity::new(5, Platform::Reddit, "rust");
        let renderer = EntityRenderer::new();

        let row = renderer.render(&entity, &ctx(DisplayMode::Review));
        assert!(row.cell(SELECT_COLUMN).is_none());

        let selection: KeySet<EntityId> = [EntityId(5)].into_iter().collect();
        let mut context = ctx(DisplayMode::Review);
        context.selection_mode = SelectionMode::Multi;
        context.selection = Some(&selection);
        let row = renderer.render(&entity, &context);
        assert_eq!(row.cell(SELECT_COLUMN), Some(&Cell::Checkbox { checked: true }));
        assert!(row.selected);
    }

    #[test]
    fn test_name_cell_flags_and_link() {
        let entity = ListedEntity::new(1, Platform::Instagram, "someone").with_flags(EntityFlags {
            adult: false,
            verified: true,
            private: false,
        });
        let row = EntityRenderer::new().render(&entity, &ctx(DisplayMode::Review));
        match row.cell(NAME_COLUMN) {
            Some(Cell::Text(text)) => {
                assert_eq!(text.badges, vec![BadgeView::new("Verified", Tone::Info)]);
                assert_eq!(
                    text.subtitle,
                    Some(SubtitleView::Link {
                        label: "@someone".into(),
                        href: "https://www.instagram.com/someone".into()
                    })
                );
            }
            other => panic!("unexpected name cell {:?}", other),
        }
    }

    #[test]
    fn test_headers_match_cells() {
        let renderer = EntityRenderer::for_platform(Platform::Reddit);
        let entity = ListedEntity::new(1, Platform::Reddit, "rust");
        for mode in [DisplayMode::Review, DisplayMode::Category] {
            let headers = renderer.headers(mode, SelectionMode::None);
            let row = renderer.render(&entity, &ctx(mode));
            let header_ids: Vec<_> = headers.iter().map(|h| h.id.as_str()).collect();
            let cell_ids: Vec<_> = row.cells.iter().map(|(id, _)| id.as_str()).collect();
            assert_eq!(header_ids, cell_ids);
        }
        assert_eq!(
            renderer.headers(DisplayMode::Review, SelectionMode::None)[2].label,
            "Subscribers"
        );
    }

    #[test]
    fn test_record_fields() {
        let entity = ListedEntity::new(9, Platform::Reddit, "rust").with_audience(1500);
        assert_eq!(entity.field("handle"), Some(Value::Text("r/rust".into())));
        assert_eq!(entity.field("audience"), Some(Value::Int(1500)));
        assert_eq!(entity.field("review"), Some(Value::Null));
        assert_eq!(entity.field("nope"), None);
        for name in ListedEntity::field_names() {
            assert!(entity.field(name).is_some(), "field {} missing", name);
        }
    }
}
