//! Component renderers.
//!
//! Each component writes ANSI output for one part of the frame into a `String`
//! and, where it flows top to bottom, returns the next free row.
//!
//! - [`header`]: title and subtitle
//! - [`prompt`]: search, year and genre input line
//! - [`table`]: results table (TITLE, KIND, YEAR, RATING, ★)
//! - [`detail`]: movie detail panel
//! - [`picker`]: genre list
//! - [`login`]: login / sign-up form
//! - [`empty`]: centered message for empty lists
//! - [`pager`]: page bar
//! - [`status`]: loading, error, notice and user
//! - [`footer`]: key hints

mod detail;
mod empty;
mod footer;
mod header;
mod login;
mod pager;
mod picker;
mod prompt;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use login::render_login;
use pager::render_page_bar;
use picker::render_picker;
use prompt::render_prompt;
use status::render_status;
use table::{render_table_headers, render_table_rows};

/// Writes a horizontal rule at `row`. Returns the next free row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Lays out a whole frame.
///
/// ```text
/// [blank]
/// [Header title]
/// [Header subtitle]
/// [Border]
/// [Prompt + rule]        only with a prompt
/// [Table headings]
/// [Body rows]
/// ...
/// [Page bar]             only for paged results
/// [Status]
/// [Border]
/// [Footer]
/// ```
pub fn render_frame(out: &mut String, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    if let Some(prompt) = &vm.prompt {
        current_row = render_prompt(out, current_row, prompt, theme, cols);
    }

    let footer_row = rows.max(current_row + 4);
    let border_row = footer_row - 1;
    let status_row = border_row - 1;
    let body_end = if let Some(bar) = &vm.page_bar {
        render_page_bar(out, status_row - 1, bar, theme, cols);
        status_row - 1
    } else {
        status_row
    };

    match &vm.body {
        Body::Table(table) => {
            current_row = render_table_headers(out, current_row, theme, cols);
            render_table_rows(out, current_row, &table.items, theme, cols);
        }
        Body::Empty(empty) => render_empty_state(out, current_row, empty, theme, cols),
        Body::Detail(detail) => {
            let max_rows = body_end.saturating_sub(current_row);
            render_detail(out, current_row, detail, theme, cols, max_rows);
        }
        Body::Picker(picker) => render_picker(out, current_row, picker, theme, cols),
        Body::Login(login) => render_login(out, current_row, login, theme, cols),
    }

    render_status(out, status_row, &vm.status, theme, cols);
    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}
