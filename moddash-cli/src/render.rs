//! Plain-text rendering of table views for the terminal.

use moddash_lib::model::ReviewOutcome;
use moddash_lib::model::ReviewSummary;
use moddash_table::cell::AvatarView;
use moddash_table::cell::Cell;
use moddash_table::column::Align;
use moddash_table::column::ColumnWidth;
use moddash_table::format::display_width;
use moddash_table::format::format_compact;
use moddash_table::format::format_percent;
use moddash_table::format::truncate_to_width;
use moddash_table::row::Header;
use moddash_table::table::TableStatus;
use moddash_table::table::TableView;

/// Characters per flex weight unit.
const FLEX_UNIT: usize = 16;

const GAP: &str = "  ";

/// Renders a view as aligned columns, one line per row.
pub fn table<K>(view: &TableView<K>) -> String {
    match &view.status {
        TableStatus::Loading => return "Loading…\n".to_string(),
        TableStatus::Error(message) => return format!("Error: {}\n", message),
        TableStatus::Empty | TableStatus::Ready => {}
    }

    let body: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            view.headers
                .iter()
                .map(|header| row.cell(&header.id).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = view
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| column_width(header, body.iter().map(|cells| cells[i].as_str())))
        .collect();

    let mut out = String::new();
    push_line(
        &mut out,
        view.headers.iter().map(|h| h.label.as_str()),
        &view.headers,
        &widths,
    );
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &view.headers, &widths);

    if view.status == TableStatus::Empty {
        out.push_str("No rows\n");
        return out;
    }

    for cells in &body {
        push_line(&mut out, cells.iter().map(String::as_str), &view.headers, &widths);
    }
    if view.loading_more {
        out.push_str("Loading more…\n");
    }
    out
}

/// One-line text for a cell.
pub fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => {
            let mut out = text.text.clone();
            for badge in &text.badges {
                out.push(' ');
                out.push_str(&badge.label);
            }
            out
        }
        Cell::Avatar(AvatarView::Image { .. }) => "img".to_string(),
        Cell::Review(control) => control
            .buttons
            .iter()
            .map(|b| {
                if b.active {
                    format!("[{}]", b.label)
                } else {
                    b.label.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
        Cell::Tags(list) if list.tags.is_empty() => "-".to_string(),
        other => other.plain_text(),
    }
}

/// Pads (or truncates) `text` to exactly `width` display columns.
pub fn pad(text: &str, width: usize, align: Align) -> String {
    let (text, _) = truncate_to_width(text, width);
    let fill = width.saturating_sub(display_width(&text));
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(fill)),
        Align::Right => format!("{}{}", " ".repeat(fill), text),
        Align::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
    }
}

pub fn summary(summary: &ReviewSummary, total: Option<usize>) -> String {
    let mut out = String::new();
    match total {
        Some(total) if total != summary.total => {
            out.push_str(&format!("Loaded      {} of {}\n", summary.total, total));
        }
        _ => out.push_str(&format!("Loaded      {}\n", summary.total)),
    }
    for outcome in [
        ReviewOutcome::Unreviewed,
        ReviewOutcome::Approved,
        ReviewOutcome::Rejected,
        ReviewOutcome::NoSeller,
    ] {
        out.push_str(&format!(
            "{:<12}{}\n",
            outcome.as_str(),
            summary.count(outcome)
        ));
    }
    out.push_str(&format!(
        "Reviewed    {}\n",
        format_percent(summary.reviewed_fraction(), 1)
    ));
    out.push_str(&format!(
        "Audience    {}\n",
        format_compact(summary.total_audience as f64, 1)
    ));
    if let Some(mean) = summary.mean_engagement {
        out.push_str(&format!("Engagement  {}\n", format_percent(mean, 2)));
    }
    out
}

fn column_width<'a>(header: &Header, cells: impl Iterator<Item = &'a str>) -> usize {
    let natural = cells
        .map(display_width)
        .chain(std::iter::once(display_width(&header.label)))
        .max()
        .unwrap_or(0);
    match header.width {
        ColumnWidth::Fixed(width) => width as usize,
        ColumnWidth::Flex(weight) => natural.min(FLEX_UNIT * weight.max(1) as usize),
    }
}

fn push_line<'a>(
    out: &mut String,
    cells: impl Iterator<Item = &'a str>,
    headers: &[Header],
    widths: &[usize],
) {
    let line: Vec<String> = cells
        .zip(headers.iter().zip(widths))
        .map(|(text, (header, width))| pad(text, *width, header.align))
        .collect();
    out.push_str(line.join(GAP).trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use moddash_lib::model::ListedEntity;
    use moddash_lib::model::Platform;
    use moddash_lib::model::RedditReview;
    use moddash_lib::model::ReviewStatus;
    use moddash_table::prelude::*;

    use super::*;

    fn view_of(rows: Vec<ListedEntity>, mode: DisplayMode) -> String {
        let props = TableProps::new(Arc::from(rows)).mode(mode);
        let mut grid = Table::new(
            EntityRenderer::for_platform(Platform::Reddit),
            TableConfig::new().without_virtualization(),
            props,
        )
        .unwrap();
        table(grid.view())
    }

    #[test]
    fn test_pad_aligns_by_display_width() {
        assert_eq!(pad("ab", 4, Align::Left), "ab  ");
        assert_eq!(pad("ab", 4, Align::Right), "  ab");
        assert_eq!(pad("ab", 5, Align::Center), " ab  ");
        assert_eq!(pad("日本", 6, Align::Right), "  日本");
    }

    #[test]
    fn test_pad_truncates_long_text() {
        assert_eq!(display_width(&pad("mechanicalkeyboards", 8, Align::Left)), 8);
    }

    #[test]
    fn test_review_mode_marks_active_button() {
        let entity = ListedEntity::new(1, Platform::Reddit, "homelab")
            .with_audience(845_900)
            .with_review(ReviewStatus::Reddit(RedditReview::Ok));
        let text = view_of(vec![entity], DisplayMode::Review);

        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("Subscribers"));
        assert!(header.contains("Review"));
        let row = lines.nth(1).unwrap();
        assert!(row.contains("homelab"));
        assert!(row.contains("845.9K"));
        assert!(row.contains("[Ok] No Seller Non Related"));
    }

    #[test]
    fn test_category_mode_shows_tags() {
        let entity = ListedEntity::new(1, Platform::Reddit, "homelab").with_tags(["Tech", "Hobby"]);
        let text = view_of(vec![entity], DisplayMode::Category);
        assert!(text.contains("Tags"));
        assert!(text.contains("Tech, Hobby"));
    }

    #[test]
    fn test_empty_view_says_so() {
        let text = view_of(Vec::new(), DisplayMode::Review);
        assert!(text.ends_with("No rows\n"));
    }

    #[test]
    fn test_summary_lists_every_outcome() {
        let entities = [
            ListedEntity::new(1, Platform::Reddit, "a").with_audience(1_500),
            ListedEntity::new(2, Platform::Reddit, "b")
                .with_review(ReviewStatus::Reddit(RedditReview::NoSeller)),
        ];
        let text = summary(&ReviewSummary::from_entities(&entities), Some(10));
        assert!(text.starts_with("Loaded      2 of 10\n"));
        assert!(text.contains("unreviewed  1\n"));
        assert!(text.contains("no_seller   1\n"));
        assert!(text.contains("Reviewed    50.0%\n"));
        assert!(text.contains("Audience    1.5K\n"));
    }
}
