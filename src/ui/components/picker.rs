//! Genre picker list.

use crate::ui::helpers::{pad, position_cursor, push_highlighted, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PickerInfo;

const LEFT_MARGIN: usize = 4;

pub fn render_picker(out: &mut String, row: usize, picker: &PickerInfo, theme: &Theme, cols: usize) {
    position_cursor(out, row, LEFT_MARGIN + 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&picker.title);
    out.push_str(Theme::reset());

    let field = cols.saturating_sub(LEFT_MARGIN * 2 + 4);
    for (offset, entry) in picker.entries.iter().enumerate() {
        position_cursor(out, row + 1 + offset, LEFT_MARGIN + 1);
        if entry.is_selected {
            out.push_str(&Theme::fg(&theme.colors.selection_fg));
            out.push_str(&Theme::bg(&theme.colors.selection_bg));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        }
        out.push_str(if entry.is_active { "● " } else { "  " });
        let label = pad(&entry.label, field);
        push_highlighted(out, &label, &entry.highlight_ranges, theme, entry.is_selected);
        out.push_str(&" ".repeat(field.saturating_sub(width(&label))));
        out.push_str(Theme::reset());
    }
}
