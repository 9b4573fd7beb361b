//! Shared rendering utilities.
//!
//! Components render into a `String` frame buffer rather than straight to
//! stdout, so a whole frame can be inspected in tests and written in one go.
//! Text measurements are in characters, not bytes.

use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::fmt::Write as _;

/// Width of each result-table column besides the title.
pub const MARKER_WIDTH: usize = 2;
pub const KIND_WIDTH: usize = 9;
pub const YEAR_WIDTH: usize = 6;
pub const RATING_WIDTH: usize = 8;
pub const FAVORITE_WIDTH: usize = 2;

const MIN_TITLE_WIDTH: usize = 8;
const SAFETY_MARGIN: usize = 2;

/// Width of the title column in a table `cols` characters wide.
#[must_use]
pub const fn title_column_width(cols: usize) -> usize {
    let fixed = MARKER_WIDTH + KIND_WIDTH + YEAR_WIDTH + RATING_WIDTH + FAVORITE_WIDTH + SAFETY_MARGIN;
    let width = cols.saturating_sub(fixed);
    if width < MIN_TITLE_WIDTH {
        MIN_TITLE_WIDTH
    } else {
        width
    }
}

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut cut: String = text.chars().take(max - 3).collect();
    cut.push_str("...");
    cut
}

/// Left-aligns `text` in a field of `field` characters, truncating if needed.
#[must_use]
pub fn pad(text: &str, field: usize) -> String {
    let cut = truncate(text, field);
    let fill = field.saturating_sub(width(&cut));
    format!("{cut}{}", " ".repeat(fill))
}

/// Greedy word wrap to lines of at most `max` characters.
#[must_use]
pub fn wrap(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            width(word)
        } else {
            width(&line) + 1 + width(word)
        };
        if needed > max && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Character ranges of `text` matched by `query`, coalesced into runs.
///
/// Returns an empty list when the query is empty or does not match.
#[must_use]
pub fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return Vec::new();
    }
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Writes `text` with `ranges` highlighted.
///
/// Selected rows skip match highlighting so the selection colors stay intact.
pub fn push_highlighted(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;
    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > pos {
            out.extend(&chars[pos..start]);
        }
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start.max(pos)..end.max(start.max(pos))]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        pos = end.max(pos);
    }
    if pos < chars.len() {
        out.extend(&chars[pos..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_character_boundaries() {
        assert_eq!(truncate("Amélie", 10), "Amélie");
        assert_eq!(truncate("The Lord of the Rings", 10), "The Lor...");
        assert_eq!(pad("Heat", 6), "Heat  ");
    }

    #[test]
    fn wraps_words() {
        assert_eq!(
            wrap("a quick brown fox jumps", 11),
            vec!["a quick", "brown fox", "jumps"]
        );
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn coalesces_consecutive_matches() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(highlight_ranges(&matcher, "matrix", "mat"), vec![(0, 3)]);
        assert!(highlight_ranges(&matcher, "matrix", "").is_empty());
        assert!(highlight_ranges(&matcher, "matrix", "zzz").is_empty());
    }
}
