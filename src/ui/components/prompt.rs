//! Single-line input bar used by search, the year prompt and the genre picker.

use crate::ui::helpers::{pad, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PromptInfo;

const PROMPT_MARGIN: usize = 2;

/// Writes the prompt line and the rule under it. Returns the next free row.
///
/// ```text
///   Search: the matr█                                   [movies]
///   ──────────────────────────────────────────────────────────
/// ```
pub fn render_prompt(out: &mut String, row: usize, prompt: &PromptInfo, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(PROMPT_MARGIN * 2);
    let label = format!("{}: ", prompt.label);
    let hint_len = width(&prompt.hint);
    let text_field = inner.saturating_sub(width(&label) + hint_len + 1);

    position_cursor(out, row, 1);
    out.push_str(&" ".repeat(PROMPT_MARGIN));
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.prompt_border));
    out.push_str(&label);
    out.push_str(Theme::reset());
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&pad(&format!("{}█", prompt.text), text_field));
    out.push(' ');
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&prompt.hint);
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 1);
    out.push_str(&" ".repeat(PROMPT_MARGIN));
    out.push_str(&Theme::fg(&theme.colors.prompt_border));
    out.push_str(&"─".repeat(inner));
    out.push_str(Theme::reset());

    row + 2
}
