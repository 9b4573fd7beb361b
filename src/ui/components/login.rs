//! Login / sign-up form.

use crate::ui::helpers::{pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LoginInfo;

const LABEL_WIDTH: usize = 10;
const FIELD_WIDTH: usize = 36;

pub fn render_login(out: &mut String, row: usize, login: &LoginInfo, theme: &Theme, cols: usize) {
    let form_width = LABEL_WIDTH + FIELD_WIDTH + 2;
    let left = cols.saturating_sub(form_width) / 2 + 1;

    position_cursor(out, row + 1, left);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&login.title);
    out.push_str(Theme::reset());

    for (offset, field) in login.fields.iter().enumerate() {
        position_cursor(out, row + 3 + offset * 2, left);
        let marker = if field.is_active { "▶ " } else { "  " };
        out.push_str(&Theme::fg(&theme.colors.prompt_border));
        out.push_str(marker);
        out.push_str(&pad(&field.label, LABEL_WIDTH));
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        let value = if field.is_active {
            format!("{}█", field.value)
        } else {
            field.value.clone()
        };
        out.push_str(&pad(&value, FIELD_WIDTH));
        out.push_str(Theme::reset());
    }
}
