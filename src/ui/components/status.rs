//! Status line: loading or error marker on the left, notice in the middle,
//! logged-in user on the right.

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusInfo;

pub fn render_status(out: &mut String, row: usize, status: &StatusInfo, theme: &Theme, cols: usize) {
    let user = status
        .user
        .as_ref()
        .map_or_else(|| "not logged in".to_string(), |name| format!("● {name}"));
    let user_color = if status.user.is_some() {
        &theme.colors.favorite_fg
    } else {
        &theme.colors.text_dim
    };

    let (left, left_color) = if status.loading {
        ("Loading...".to_string(), &theme.colors.text_dim)
    } else if let Some(error) = &status.error {
        (format!("Failed to load: {error}"), &theme.colors.error_fg)
    } else {
        (String::new(), &theme.colors.text_dim)
    };

    let room = cols.saturating_sub(width(&user) + 3);
    let mut left_text = left;
    if let Some(notice) = &status.notice {
        if left_text.is_empty() {
            left_text = notice.clone();
        } else {
            left_text = format!("{left_text} · {notice}");
        }
    }
    let left_text = truncate(&left_text, room);

    position_cursor(out, row, 2);
    out.push_str(&Theme::fg(left_color));
    out.push_str(&left_text);
    out.push_str(&" ".repeat(room.saturating_sub(width(&left_text))));
    out.push_str(&Theme::fg(user_color));
    out.push_str(&user);
    out.push_str(Theme::reset());
}
