//! Bordered, titled panels

use console::{pad_str, Alignment};

use crate::style::{Paint, StyledText};

use super::wrap::truncate_str;

const TOP_LEFT: &str = "╭";
const TOP_RIGHT: &str = "╮";
const BOTTOM_LEFT: &str = "╰";
const BOTTOM_RIGHT: &str = "╯";
const HORIZONTAL: &str = "─";
const VERTICAL: &str = "│";

/// Smallest panel that still has room for one column of content
pub const MIN_PANEL_WIDTH: usize = 10;

/// A rounded box around pre-rendered content lines
#[derive(Debug, Clone)]
pub struct Panel<'a> {
    title: Option<&'a str>,
    body: &'a str,
    border: Paint,
    width: usize,
}

impl<'a> Panel<'a> {
    pub fn new(body: &'a str, width: usize) -> Self {
        Self {
            title: None,
            body,
            border: Paint::default(),
            width: width.max(MIN_PANEL_WIDTH),
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn border(mut self, paint: Paint) -> Self {
        self.border = paint;
        self
    }

    /// Inner content width, excluding borders and one space of padding
    /// on each side
    pub fn inner_width(&self) -> usize {
        self.width - 4
    }

    /// Render the panel. Every line is exactly `width` columns wide; longer
    /// content lines are cut with an ellipsis.
    pub fn render(&self, color: bool) -> String {
        let border = |s: String| StyledText::styled(s, self.border).render(color);
        let inner = self.inner_width();
        let mut out = String::new();

        match self.title {
            Some(title) => {
                let title = truncate_str(title, self.width.saturating_sub(6));
                let fill = self.width.saturating_sub(5 + console::measure_text_width(&title));
                out.push_str(&border(format!("{TOP_LEFT}{HORIZONTAL}")));
                out.push(' ');
                out.push_str(&title);
                out.push(' ');
                out.push_str(&border(format!(
                    "{}{TOP_RIGHT}",
                    HORIZONTAL.repeat(fill)
                )));
            }
            None => out.push_str(&border(format!(
                "{TOP_LEFT}{}{TOP_RIGHT}",
                HORIZONTAL.repeat(self.width - 2)
            ))),
        }
        out.push('\n');

        for line in self.body.lines() {
            out.push_str(&border(VERTICAL.to_string()));
            out.push(' ');
            out.push_str(&pad_str(line, inner, Alignment::Left, Some("…")));
            out.push(' ');
            out.push_str(&border(VERTICAL.to_string()));
            out.push('\n');
        }

        out.push_str(&border(format!(
            "{BOTTOM_LEFT}{}{BOTTOM_RIGHT}",
            HORIZONTAL.repeat(self.width - 2)
        )));
        out
    }
}
