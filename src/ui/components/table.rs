//! Results table: TITLE, KIND, YEAR, RATING and the favorite star.

use crate::ui::helpers::{
    pad, position_cursor, push_highlighted, title_column_width, width, FAVORITE_WIDTH, KIND_WIDTH,
    MARKER_WIDTH, RATING_WIDTH, YEAR_WIDTH,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Writes the column headings. Returns the next free row.
pub fn render_table_headers(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    let title_width = title_column_width(cols);

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(MARKER_WIDTH));
    out.push_str(&pad("TITLE", title_width));
    out.push_str(&pad("KIND", KIND_WIDTH));
    out.push_str(&pad("YEAR", YEAR_WIDTH));
    out.push_str(&pad("RATING", RATING_WIDTH));
    out.push_str(&pad("★", FAVORITE_WIDTH));
    out.push_str(Theme::reset());
    row + 1
}

/// Writes one line per item. Returns the next free row.
pub fn render_table_rows(out: &mut String, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(out, current_row, item, theme, cols);
    }
    current_row
}

/// Selected rows get the selection colors across the full width; match
/// highlighting only applies to unselected rows.
fn render_table_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let title_width = title_column_width(cols);
    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    position_cursor(out, row, 1);
    out.push_str(&base);
    out.push_str(if item.is_selected { "▶ " } else { "  " });

    push_highlighted(out, &item.title, &item.highlight_ranges, theme, item.is_selected);
    out.push_str(&" ".repeat(title_width.saturating_sub(width(&item.title))));

    if !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    }
    out.push_str(&pad(&item.kind, KIND_WIDTH));
    out.push_str(&pad(&item.year, YEAR_WIDTH));
    out.push_str(&pad(&item.rating, RATING_WIDTH));

    if item.is_favorite {
        if !item.is_selected {
            out.push_str(&Theme::fg(&theme.colors.favorite_fg));
        }
        out.push_str(&pad("★", FAVORITE_WIDTH));
    } else {
        out.push_str(&" ".repeat(FAVORITE_WIDTH));
    }

    let line_len = MARKER_WIDTH + title_width + KIND_WIDTH + YEAR_WIDTH + RATING_WIDTH + FAVORITE_WIDTH;
    out.push_str(&base);
    out.push_str(&" ".repeat(cols.saturating_sub(line_len)));
    out.push_str(Theme::reset());
    row + 1
}
