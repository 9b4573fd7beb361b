//! Page bar: `‹ 3 4 [5] 6 7 › of 120`.

use crate::ui::helpers::{position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PageBarInfo;

pub fn render_page_bar(out: &mut String, row: usize, bar: &PageBarInfo, theme: &Theme, cols: usize) {
    let mut plain = String::new();
    let mut styled = String::new();
    let dim = Theme::fg(&theme.colors.text_dim);
    let normal = Theme::fg(&theme.colors.text_normal);

    let mut push = |text: &str, style: &str| {
        plain.push_str(text);
        styled.push_str(style);
        styled.push_str(text);
    };

    push(if bar.current > 1 { "‹ " } else { "  " }, &dim);
    for page in &bar.pages {
        if *page == bar.current {
            let highlight = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.prompt_border));
            push(&format!("[{page}] "), &highlight);
            push("", Theme::reset());
        } else {
            push(&format!("{page} "), &normal);
        }
    }
    push(if bar.current < bar.total { "›" } else { " " }, &dim);
    push(&format!("  of {}", bar.total), &dim);

    let padding = cols.saturating_sub(width(&plain)) / 2;
    position_cursor(out, row, padding + 1);
    out.push_str(&styled);
    out.push_str(Theme::reset());
}
