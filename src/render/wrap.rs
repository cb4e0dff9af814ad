//! Word wrapping and truncation for help text
//!
//! Wrapping works on byte ranges so styled fragments can be cut without
//! losing their spans.

use std::ops::Range;

use crate::style::{markup, StyledText};

const ELLIPSIS: &str = "...";

fn width(s: &str) -> usize {
    console::measure_text_width(s)
}

/// Byte offset of the longest prefix of `s` that fits in `columns`
/// terminal columns
fn split_at_width(s: &str, columns: usize) -> usize {
    let mut used = 0;
    for (i, ch) in s.char_indices() {
        used += width(&s[i..i + ch.len_utf8()]);
        if used > columns {
            return i;
        }
    }
    s.len()
}

fn words(line: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    let base = line.as_ptr() as usize;
    line.split_whitespace().map(move |word| {
        let start = word.as_ptr() as usize - base;
        start..start + word.len()
    })
}

/// Byte ranges of `text` wrapped to `max_width` columns, breaking at word
/// boundaries. Explicit newlines are kept; words longer than a line are
/// force-broken.
pub fn wrap_ranges(text: &str, max_width: usize) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        wrap_line(line, offset, max_width, &mut lines);
        offset += line.len() + 1;
    }
    lines
}

fn wrap_line(line: &str, base: usize, max_width: usize, out: &mut Vec<Range<usize>>) {
    // Don't wrap if the line already fits or width is too small to be useful
    if width(line) <= max_width || max_width < 5 {
        out.push(base..base + line.len());
        return;
    }

    let mut current: Option<Range<usize>> = None;
    for mut word in words(line) {
        if let Some(cur) = current.take() {
            if width(&line[cur.start..word.end]) <= max_width {
                current = Some(cur.start..word.end);
                continue;
            }
            out.push(base + cur.start..base + cur.end);
        }
        while width(&line[word.clone()]) > max_width {
            let piece = &line[word.clone()];
            let mut cut = word.start + split_at_width(piece, max_width);
            if cut == word.start {
                // a single glyph wider than the line
                cut += piece.chars().next().map_or(piece.len(), char::len_utf8);
            }
            out.push(base + word.start..base + cut);
            word.start = cut;
        }
        current = Some(word);
    }
    match current {
        Some(cur) => out.push(base + cur.start..base + cur.end),
        None => out.push(base..base),
    }
}

/// Wrap plain text into owned lines
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    wrap_ranges(text, max_width)
        .into_iter()
        .map(|range| text[range].to_string())
        .collect()
}

/// Wrap a styled fragment, keeping spans on each line
pub fn wrap_styled(text: &StyledText, max_width: usize) -> Vec<StyledText> {
    wrap_ranges(text.as_str(), max_width)
        .into_iter()
        .map(|range| text.slice(range))
        .collect()
}

/// Shorten `text` to at most `max_len` columns at a word boundary.
///
/// Stops after the first sentence when it fits. When words have to be
/// dropped, `...` is appended and still counts toward `max_len`. Returns an
/// empty string when not even the ellipsis fits.
pub fn truncate_words(text: &str, max_len: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || max_len < ELLIPSIS.len() {
        return String::new();
    }

    let last_index = words.len() - 1;
    let mut total = 0;
    let mut stop = None;
    for (i, word) in words.iter().enumerate() {
        total += width(word) + usize::from(i > 0);
        if total > max_len {
            stop = Some(i);
            break;
        }
        if word.ends_with('.') {
            return words[..=i].join(" ");
        }
        if total == max_len && i != last_index {
            stop = Some(i);
            break;
        }
    }
    let Some(mut i) = stop else {
        return words.join(" ");
    };

    total += ELLIPSIS.len();
    while i > 0 {
        total -= width(words[i]) + usize::from(i > 0);
        if total <= max_len {
            break;
        }
        i -= 1;
    }
    format!("{}{}", words[..i].join(" "), ELLIPSIS)
}

/// First paragraph of a markup help string, truncated to `limit` columns
/// of visible text. Styles survive the cut.
pub fn short_help(help: &str, limit: usize) -> StyledText {
    let paragraph = help.split("\n\n").next().unwrap_or_default();
    let normalized = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
    let styled = markup::parse(&normalized);
    let plain = styled.as_str();

    let truncated = truncate_words(plain, limit);
    if truncated == plain {
        return styled;
    }
    let (body, ellipsis) = match truncated.strip_suffix(ELLIPSIS) {
        Some(body) => (body, true),
        None => (truncated.as_str(), false),
    };
    if !plain.starts_with(body) {
        return StyledText::new(truncated);
    }
    let cut = styled.slice(0..body.len());
    if ellipsis {
        cut.append_str(ELLIPSIS)
    } else {
        cut
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if width(s) <= max_len {
        s.to_string()
    } else {
        let keep = split_at_width(s, max_len.saturating_sub(ELLIPSIS.len()));
        format!("{}{}", &s[..keep], ELLIPSIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_short() {
        let result = wrap_text("hello", 20);
        assert_eq!(result, vec!["hello"]);
    }

    #[test]
    fn test_wrap_text_exact_fit() {
        let result = wrap_text("hello world", 11);
        assert_eq!(result, vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_word_boundary() {
        let result = wrap_text("hello world foo bar", 11);
        assert_eq!(result, vec!["hello world", "foo bar"]);
    }

    #[test]
    fn test_wrap_text_long_word() {
        let result = wrap_text("supercalifragilisticexpialidocious", 10);
        assert_eq!(result.len(), 4);
        assert_eq!(result[0], "supercalif");
        assert_eq!(result[1], "ragilistic");
        assert_eq!(result[2], "expialidoc");
        assert_eq!(result[3], "ious");
    }

    #[test]
    fn test_wrap_text_multiple_lines() {
        let text = "The quick brown fox jumps over the lazy dog";
        let result = wrap_text(text, 15);
        assert_eq!(
            result,
            vec!["The quick brown", "fox jumps over", "the lazy dog"]
        );
    }

    #[test]
    fn test_wrap_keeps_newlines() {
        let result = wrap_text("first\n\nsecond", 20);
        assert_eq!(result, vec!["first", "", "second"]);
    }

    #[test]
    fn test_wrap_styled_keeps_spans() {
        let text = markup::parse("plain [bold]strong words[/bold] tail");
        let lines = wrap_styled(&text, 12);
        assert_eq!(lines[0].as_str(), "plain strong");
        assert!(lines[0].paint_at(6).bold);
        assert_eq!(lines[1].as_str(), "words tail");
        assert!(lines[1].paint_at(0).bold);
        assert!(!lines[1].paint_at(6).bold);
    }

    #[test]
    fn test_truncate_words_fits() {
        assert_eq!(truncate_words("Say hello", 20), "Say hello");
    }

    #[test]
    fn test_truncate_words_first_sentence() {
        assert_eq!(
            truncate_words("Say hello. Then say goodbye.", 40),
            "Say hello."
        );
    }

    #[test]
    fn test_truncate_words_drops_words() {
        let result = truncate_words("Greet a person by name with a custom message", 20);
        assert_eq!(result, "Greet a person by...");
        assert!(result.len() <= 20);
    }

    #[test]
    fn test_truncate_words_never_exceeds_budget() {
        let text = "Remove the generated artifacts from the working tree and reset caches";
        for limit in 0..80 {
            let result = truncate_words(text, limit);
            assert!(result.chars().count() <= limit, "limit {limit}: {result:?}");
        }
    }

    #[test]
    fn test_short_help_keeps_styles_and_budget() {
        let help = "[green]Greet[/green] a person by name with a custom message\n\nLong details.";
        let result = short_help(help, 20);
        assert_eq!(result.as_str(), "Greet a person by...");
        assert!(!result.paint_at(0).is_plain());
        assert!(result.width() <= 20);
    }

    #[test]
    fn test_short_help_untruncated() {
        let result = short_help("Show  the\nversion", 40);
        assert_eq!(result.as_str(), "Show the version");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_truncate_str_wide_chars() {
        let result = truncate_str("日本語のタイトル", 7);
        assert_eq!(result, "日本...");
        assert_eq!(width(&result), 7);

        for max_len in 3..20 {
            let result = truncate_str("表示🎉テキスト", max_len);
            assert!(width(&result) <= max_len, "{max_len}: {result:?}");
        }
    }

    #[test]
    fn test_wrap_text_wide_chars() {
        let result = wrap_text("日本語日本語", 5);
        assert_eq!(result, vec!["日本", "語日", "本語"]);
        assert!(result.iter().all(|line| width(line) <= 5));
    }
}
