use crate::text::metrics::chars_per_line;

/// Appended to the last allowed line when it exceeds the character budget.
pub const ELLIPSIS: char = '\u{2026}';

/// Greedy word wrap of `text` into at most `max_lines` lines of `width` pixels at `font_size`.
///
/// Words are appended to the current line while it stays within the character budget. Once the
/// last allowed line is reached every remaining word joins it, and that line is cut to the
/// budget with a trailing [`ELLIPSIS`]. A single word longer than the budget sits alone on its
/// line. Blank input yields no lines, and `max_lines == 0` behaves like `1`.
pub fn wrap_text(text: &str, width: f64, font_size: f64, max_lines: usize) -> Vec<String> {
    wrap_to_budget(text, chars_per_line(width, font_size, 0.0), max_lines)
}

/// [`wrap_text`] against an explicit per-line character budget.
pub fn wrap_to_budget(text: &str, budget: usize, max_lines: usize) -> Vec<String> {
    let budget = budget.max(1);
    let max_lines = max_lines.max(1);

    let mut lines = Vec::<String>::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
            continue;
        }
        let on_last_line = lines.len() + 1 == max_lines;
        if current_len + 1 + word_len <= budget || on_last_line {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() == max_lines
        && let Some(last) = lines.last_mut()
        && last.chars().count() > budget
    {
        *last = truncate_with_ellipsis(last, budget);
    }
    lines
}

fn truncate_with_ellipsis(line: &str, budget: usize) -> String {
    let keep = budget.saturating_sub(1);
    let mut out = line.chars().take(keep).collect::<String>();
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
