//! Styled text fragments
//!
//! A [`StyledText`] is a plain string plus a list of byte-range spans, each
//! carrying a [`Paint`]. Styling never changes the underlying text; it is
//! only applied when the fragment is rendered.

use std::fmt;
use std::ops::Range;

use console::{Color, Style};

/// An RGB color triplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as an upper-case hex triplet, e.g. `#2020FF`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse a `#RRGGBB` hex triplet
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Nearest entry of the xterm 256-color cube
    pub fn to_ansi256(&self) -> u8 {
        fn level(c: u8) -> u8 {
            if c < 48 {
                0
            } else if c < 115 {
                1
            } else {
                (c - 35) / 40
            }
        }
        16 + 36 * level(self.r) + 6 * level(self.g) + level(self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A foreground color: one of the eight named ANSI colors or an RGB value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Named(Color),
    Rgb(Rgb),
}

/// Foreground color plus text attributes for one span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paint {
    pub fg: Option<Tone>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl Paint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, tone: Tone) -> Self {
        self.fg = Some(tone);
        self
    }

    pub fn named(self, color: Color) -> Self {
        self.fg(Tone::Named(color))
    }

    pub fn rgb(self, rgb: Rgb) -> Self {
        self.fg(Tone::Rgb(rgb))
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Parse a style spec such as `"bold cyan"`, `"bold.cyan"` or `"#ff00ff"`.
    ///
    /// Words may be separated by whitespace or dots. Returns `None` when the
    /// spec is empty or contains any word that is not a known attribute or
    /// color, so arbitrary bracketed text is never mistaken for a style.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut paint = Paint::new();
        let mut words = spec
            .split(|c: char| c.is_whitespace() || c == '.')
            .filter(|w| !w.is_empty())
            .peekable();
        words.peek()?;

        for word in words {
            paint = match word.to_ascii_lowercase().as_str() {
                "bold" | "b" => paint.bold(),
                "dim" => paint.dim(),
                "italic" | "i" => paint.italic(),
                "underline" | "u" => paint.underline(),
                "reverse" => paint.reverse(),
                "black" => paint.named(Color::Black),
                "red" => paint.named(Color::Red),
                "green" => paint.named(Color::Green),
                "yellow" => paint.named(Color::Yellow),
                "blue" => paint.named(Color::Blue),
                "magenta" => paint.named(Color::Magenta),
                "cyan" => paint.named(Color::Cyan),
                "white" => paint.named(Color::White),
                hex if hex.starts_with('#') => paint.rgb(Rgb::from_hex(hex)?),
                _ => return None,
            };
        }
        Some(paint)
    }

    /// Layer `other` on top of this paint; `other` wins for the color
    pub fn overlay(&self, other: &Paint) -> Paint {
        Paint {
            fg: other.fg.or(self.fg),
            bold: self.bold || other.bold,
            dim: self.dim || other.dim,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            reverse: self.reverse || other.reverse,
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Paint::default()
    }

    /// Convert to a `console` style. RGB tones use the 256-color palette.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new();
        match self.fg {
            Some(Tone::Named(color)) => style = style.fg(color),
            Some(Tone::Rgb(rgb)) => style = style.color256(rgb.to_ansi256()),
            None => {}
        }
        if self.bold {
            style = style.bold();
        }
        if self.dim {
            style = style.dim();
        }
        if self.italic {
            style = style.italic();
        }
        if self.underline {
            style = style.underlined();
        }
        if self.reverse {
            style = style.reverse();
        }
        style
    }
}

/// A styled byte range of a [`StyledText`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub range: Range<usize>,
    pub paint: Paint,
}

/// A string annotated with styled spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    text: String,
    spans: Vec<Span>,
}

impl StyledText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// A fragment with one paint over its whole length
    pub fn styled(text: impl Into<String>, paint: Paint) -> Self {
        let text = text.into();
        let len = text.len();
        Self::new(text).stylize(0..len, paint)
    }

    /// Build from text and spans, dropping spans that are empty or do not
    /// fall on character boundaries
    pub fn from_parts(text: String, spans: Vec<Span>) -> Self {
        let spans = spans
            .into_iter()
            .filter(|span| valid_range(&text, &span.range))
            .collect();
        Self { text, spans }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Display width in terminal columns
    pub fn width(&self) -> usize {
        console::measure_text_width(&self.text)
    }

    /// Add a span. Empty or out-of-range ranges are ignored.
    pub fn stylize(mut self, range: Range<usize>, paint: Paint) -> Self {
        if valid_range(&self.text, &range) && !paint.is_plain() {
            self.spans.push(Span { range, paint });
        }
        self
    }

    /// Concatenate another fragment, keeping its spans
    pub fn append(mut self, other: &StyledText) -> Self {
        let offset = self.text.len();
        self.text.push_str(&other.text);
        self.spans.extend(other.spans.iter().map(|span| Span {
            range: span.range.start + offset..span.range.end + offset,
            paint: span.paint,
        }));
        self
    }

    pub fn append_str(self, text: &str) -> Self {
        self.append(&StyledText::new(text))
    }

    /// Copy out a byte range, clipping spans to it
    pub fn slice(&self, range: Range<usize>) -> StyledText {
        if !valid_range(&self.text, &range) {
            return StyledText::default();
        }
        let spans = self
            .spans
            .iter()
            .filter_map(|span| {
                let start = span.range.start.max(range.start);
                let end = span.range.end.min(range.end);
                (start < end).then(|| Span {
                    range: start - range.start..end - range.start,
                    paint: span.paint,
                })
            })
            .collect();
        StyledText {
            text: self.text[range].to_string(),
            spans,
        }
    }

    /// Split on `\n`, keeping styles
    pub fn lines(&self) -> Vec<StyledText> {
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, _) in self.text.match_indices('\n') {
            lines.push(self.slice(start..i));
            start = i + 1;
        }
        lines.push(self.slice(start..self.text.len()));
        lines
    }

    /// Effective paint of the character starting at byte `index`
    pub fn paint_at(&self, index: usize) -> Paint {
        self.spans
            .iter()
            .filter(|span| span.range.contains(&index))
            .fold(Paint::default(), |acc, span| acc.overlay(&span.paint))
    }

    /// Render to a string, with ANSI escapes when `color` is set
    pub fn render(&self, color: bool) -> String {
        if !color || self.spans.is_empty() {
            return self.text.clone();
        }

        let mut cuts: Vec<usize> = vec![0, self.text.len()];
        for span in &self.spans {
            cuts.push(span.range.start);
            cuts.push(span.range.end);
        }
        cuts.sort_unstable();
        cuts.dedup();

        let mut out = String::with_capacity(self.text.len() * 2);
        for pair in cuts.windows(2) {
            let piece = &self.text[pair[0]..pair[1]];
            let paint = self.paint_at(pair[0]);
            if paint.is_plain() {
                out.push_str(piece);
            } else {
                out.push_str(&paint.to_style().force_styling(true).apply_to(piece).to_string());
            }
        }
        out
    }
}

fn valid_range(text: &str, range: &Range<usize>) -> bool {
    range.start < range.end
        && range.end <= text.len()
        && text.is_char_boundary(range.start)
        && text.is_char_boundary(range.end)
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        StyledText::new(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        StyledText::new(text)
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
