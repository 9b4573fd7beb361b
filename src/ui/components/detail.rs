//! Movie detail panel.

use crate::ui::helpers::{position_cursor, truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const LEFT_MARGIN: usize = 2;

/// Writes the detail panel from `row`, using at most `max_rows` rows.
///
/// Sections are dropped from the bottom when the pane is too short; the
/// overview is wrapped and cut to whatever space is left after the cast.
pub fn render_detail(out: &mut String, row: usize, detail: &DetailInfo, theme: &Theme, cols: usize, max_rows: usize) {
    let inner = cols.saturating_sub(LEFT_MARGIN * 2);
    let mut lines: Vec<(String, String)> = Vec::new();
    let normal = Theme::fg(&theme.colors.text_normal);
    let dim = Theme::fg(&theme.colors.text_dim);

    let star = if detail.is_favorite { " ★" } else { "" };
    lines.push((
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)),
        format!("{}{star}", detail.title),
    ));
    if let Some(tagline) = &detail.tagline {
        lines.push((dim.clone(), tagline.clone()));
    }
    if !detail.facts.is_empty() {
        lines.push((normal.clone(), detail.facts.clone()));
    }
    if !detail.genres.is_empty() {
        lines.push((dim.clone(), detail.genres.clone()));
    }
    lines.push((String::new(), String::new()));

    let mut tail: Vec<(String, String)> = Vec::new();
    if !detail.cast.is_empty() {
        tail.push((String::new(), String::new()));
        tail.push((Theme::bold().to_string(), "Cast".to_string()));
        for member in &detail.cast {
            tail.push((normal.clone(), format!("  {member}")));
        }
    }
    if detail.imdb_url.is_some() || detail.poster_url.is_some() {
        tail.push((String::new(), String::new()));
    }
    if let Some(url) = &detail.imdb_url {
        tail.push((dim.clone(), format!("IMDb    {url}")));
    }
    if let Some(url) = &detail.poster_url {
        tail.push((dim.clone(), format!("Poster  {url}")));
    }

    let overview_rows = max_rows.saturating_sub(lines.len() + tail.len()).max(1);
    let mut overview = wrap(&detail.overview, inner);
    if overview.len() > overview_rows {
        overview.truncate(overview_rows);
        if let Some(last) = overview.last_mut() {
            *last = truncate(&format!("{last} ..."), inner);
        }
    }
    lines.extend(overview.into_iter().map(|line| (normal.clone(), line)));
    lines.extend(tail);

    for (offset, (style, text)) in lines.into_iter().take(max_rows).enumerate() {
        position_cursor(out, row + offset, LEFT_MARGIN + 1);
        out.push_str(&style);
        out.push_str(&truncate(&text, inner));
        out.push_str(Theme::reset());
    }
}
