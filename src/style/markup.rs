//! Inline markup for help strings
//!
//! Help text, banners and usage overrides may carry tags such as
//! `[bold]Rich[/bold]` or `[green]name[/]`. A tag whose content is not a
//! valid style spec stays in the output as literal text, so `List[int]` and
//! `[default: 3]` are never swallowed. A backslash escapes a tag: `\[bold]`.

use std::sync::LazyLock;

use regex::Regex;

use super::text::{Paint, Span, StyledText};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\\*)\[(/?)([^\[\]]*)\]").expect("static regex must compile")
});

struct OpenTag {
    name: String,
    start: usize,
    paint: Paint,
    seq: usize,
}

/// Parse markup into a styled fragment
pub fn parse(markup: &str) -> StyledText {
    let mut text = String::with_capacity(markup.len());
    let mut spans: Vec<(usize, Span)> = Vec::new();
    let mut open: Vec<OpenTag> = Vec::new();
    let mut seq = 0;
    let mut last = 0;

    for caps in TAG_RE.captures_iter(markup) {
        let Some(whole) = caps.get(0) else { continue };
        text.push_str(&markup[last..whole.start()]);
        last = whole.end();

        let escapes = &caps[1];
        let closing = !caps[2].is_empty();
        let body = caps[3].trim();

        if !escapes.is_empty() {
            // Drop one backslash, keep the bracket literal
            text.push_str(&escapes[1..]);
            text.push_str(&whole.as_str()[escapes.len()..]);
            continue;
        }

        if closing {
            let pos = if body.is_empty() {
                open.len().checked_sub(1)
            } else {
                open.iter().rposition(|tag| tag.name == body)
            };
            match pos {
                Some(i) => {
                    let tag = open.remove(i);
                    spans.push((
                        tag.seq,
                        Span {
                            range: tag.start..text.len(),
                            paint: tag.paint,
                        },
                    ));
                }
                None => text.push_str(whole.as_str()),
            }
            continue;
        }

        match Paint::parse(body) {
            Some(paint) => {
                open.push(OpenTag {
                    name: body.to_string(),
                    start: text.len(),
                    paint,
                    seq,
                });
                seq += 1;
            }
            None => text.push_str(whole.as_str()),
        }
    }
    text.push_str(&markup[last..]);

    // Unclosed tags run to the end
    for tag in open {
        spans.push((
            tag.seq,
            Span {
                range: tag.start..text.len(),
                paint: tag.paint,
            },
        ));
    }

    // Inner tags were opened later, so they paint last
    spans.sort_by_key(|(seq, _)| *seq);
    StyledText::from_parts(text, spans.into_iter().map(|(_, span)| span).collect())
}

/// Escape brackets so `text` renders literally through [`parse`]
pub fn escape(text: &str) -> String {
    text.replace('[', "\\[")
}
