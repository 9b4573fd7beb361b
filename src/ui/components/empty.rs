//! Centered message shown instead of an empty list.

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Blank rows between the top of the body and the message.
const TOP_MARGIN: usize = 2;

pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let message = truncate(&empty.message, cols);
    let msg_len = width(&message);
    let msg_padding = cols.saturating_sub(msg_len) / 2;

    position_cursor(out, row + TOP_MARGIN, 1);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&" ".repeat(msg_padding));
    out.push_str(&message);
    out.push_str(&" ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    out.push_str(Theme::reset());

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_len = width(&subtitle);
    let sub_padding = cols.saturating_sub(sub_len) / 2;

    position_cursor(out, row + TOP_MARGIN + 1, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(sub_padding));
    out.push_str(&subtitle);
    out.push_str(&" ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    out.push_str(Theme::reset());
}
