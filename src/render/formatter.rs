//! Help formatter
//!
//! [`HelpFormatter`] turns help content into styled terminal output and
//! writes it straight to a display sink. Parameter tables are built inside
//! [`HelpFormatter::section`], which hands a [`SectionTable`] to a closure
//! and wraps the finished table in a titled panel afterwards.

use std::io::{self, Write};

use console::{pad_str, Alignment};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::style::{
    blend_text, markup, rewrite_trailing_brackets, EpilogBlend, Highlighter, Role, StyledText,
    Theme,
};

use super::panel::{Panel, MIN_PANEL_WIDTH};
use super::wrap::wrap_styled;

/// Indent applied to the free-form help body
const INDENT: &str = "  ";

/// Room taken by cell padding and column gaps in a section table
const TABLE_CHROME: usize = 10;

/// Help column never shrinks below this
const MIN_HELP_WIDTH: usize = 10;

/// Horizontal placement of the banner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BannerAlign {
    /// Written as is
    #[default]
    Default,
    Left,
    Center,
    Right,
}

/// A `(spellings, help)` pair for one argument or option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRecord {
    /// Invocation spellings, e.g. `-m, --message <MESSAGE>`
    pub spellings: String,
    /// Help text, may contain markup
    pub help: String,
}

impl HelpRecord {
    pub fn new(spellings: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            spellings: spellings.into(),
            help: help.into(),
        }
    }
}

/// Rows of one help section: two spelling columns and a help column
#[derive(Debug, Default)]
pub struct SectionTable {
    rows: Vec<[StyledText; 3]>,
}

impl SectionTable {
    pub fn add_row(&mut self, first: StyledText, second: StyledText, help: StyledText) {
        self.rows.push([first, second, help]);
    }

    pub fn rows(&self) -> &[[StyledText; 3]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Writes styled help output to `W`
pub struct HelpFormatter<W: Write> {
    out: W,
    width: usize,
    color: bool,
    theme: Theme,
    option_width: Option<usize>,
}

impl<W: Write> HelpFormatter<W> {
    pub fn new(out: W, width: usize, color: bool, theme: Theme) -> Self {
        Self {
            out,
            width: width.max(MIN_PANEL_WIDTH),
            color,
            theme,
            option_width: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Minimum width of the option-name column for following sections
    pub fn set_option_width(&mut self, width: Option<usize>) {
        self.option_width = width;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one fragment followed by a newline
    pub fn write(&mut self, text: &StyledText) -> io::Result<()> {
        writeln!(self.out, "{}", text.render(self.color))
    }

    pub fn write_newline(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Parse markup and write it
    pub fn write_markup(&mut self, text: &str) -> io::Result<()> {
        self.write(&markup::parse(text))
    }

    /// Write each line of `text` placed according to `align`
    pub fn write_justified(&mut self, text: &StyledText, align: BannerAlign) -> io::Result<()> {
        for line in text.lines() {
            let rendered = line.render(self.color);
            let placed = match align {
                BannerAlign::Default => rendered,
                BannerAlign::Left => pad_str(&rendered, self.width, Alignment::Left, None)
                    .trim_end()
                    .to_string(),
                BannerAlign::Center => {
                    pad_str(&rendered, self.width, Alignment::Center, None).into_owned()
                }
                BannerAlign::Right => {
                    pad_str(&rendered, self.width, Alignment::Right, None).into_owned()
                }
            };
            writeln!(self.out, "{}", placed)?;
        }
        Ok(())
    }

    pub fn write_banner(&mut self, banner: &str, align: BannerAlign) -> io::Result<()> {
        self.write_justified(&markup::parse(banner), align)?;
        self.write_newline()
    }

    /// Write `Usage: <prog> <args>` with the program and arguments styled
    pub fn write_usage(&mut self, prog: &str, args: &str, prefix: Option<&str>) -> io::Result<()> {
        let mut line = StyledText::new(prefix.unwrap_or("Usage: "))
            .append(&StyledText::styled(prog, self.theme.paint(Role::UsageProg)));
        if !args.is_empty() {
            if !prog.is_empty() {
                line = line.append_str(" ");
            }
            line = line.append(&StyledText::styled(args, self.theme.paint(Role::UsageArgs)));
        }
        self.write(&line)
    }

    /// Write body text indented and wrapped to the formatter width
    pub fn write_text(&mut self, text: &StyledText) -> io::Result<()> {
        let width = self.width.saturating_sub(INDENT.len());
        for line in wrap_styled(text, width) {
            if line.is_empty() {
                self.write_newline()?;
            } else {
                writeln!(self.out, "{INDENT}{}", line.render(self.color))?;
            }
        }
        Ok(())
    }

    /// Write the epilog right-justified, blended unless the blend is
    /// disabled
    pub fn write_epilog(&mut self, epilog: &str, blend: EpilogBlend) -> io::Result<()> {
        let parsed = markup::parse(epilog);
        let text = match blend.endpoints() {
            Some((start, end)) => blend_text(parsed.as_str(), start, end),
            None => parsed,
        };
        self.write_justified(&text, BannerAlign::Right)
    }

    /// Collect rows through `build`, then write them as a titled panel.
    ///
    /// The panel is written exactly once, after `build` returns. Callers
    /// that have no rows should not open a section at all.
    pub fn section<R>(
        &mut self,
        title: &str,
        build: impl FnOnce(&Self, &mut SectionTable) -> R,
    ) -> io::Result<R> {
        let mut table = SectionTable::default();
        let result = build(self, &mut table);
        self.write_panel(title, &table)?;
        Ok(result)
    }

    /// Add parameter rows.
    ///
    /// Two comma-separated spellings go to the first and second columns; a
    /// single spelling leaves the first column blank. The trailing bracket
    /// annotation of the help is rewritten before markup and highlighting.
    pub fn add_params(&self, params: &[HelpRecord], table: &mut SectionTable) {
        for record in params {
            let help = markup::parse(&rewrite_trailing_brackets(&record.help));
            self.add_row(&record.spellings, help, table);
        }
    }

    /// Add subcommand rows whose help is already styled and truncated
    pub fn add_commands(&self, rows: &[(String, StyledText)], table: &mut SectionTable) {
        for (name, help) in rows {
            self.add_row(name, help.clone(), table);
        }
    }

    fn add_row(&self, spellings: &str, help: StyledText, table: &mut SectionTable) {
        let (first, second) = self.split_spellings(spellings);
        let help = Highlighter::help().highlight(help, &self.theme);
        table.add_row(first, second, help);
    }

    fn split_spellings(&self, spellings: &str) -> (StyledText, StyledText) {
        let options = Highlighter::options();
        let parts: Vec<&str> = spellings.split(',').collect();
        match parts.as_slice() {
            [first, second] => (
                options.highlight_str(first.trim(), &self.theme),
                options.highlight_str(second.trim(), &self.theme),
            ),
            _ => (
                StyledText::default(),
                options.highlight_str(spellings.trim(), &self.theme),
            ),
        }
    }

    fn write_panel(&mut self, title: &str, table: &SectionTable) -> io::Result<()> {
        let column_width = |i: usize| table.rows.iter().map(|row| row[i].width()).max().unwrap_or(0);
        let first_width = column_width(0);
        let second_width = column_width(1).max(self.option_width.unwrap_or(0));
        let inner = self.width.saturating_sub(4);
        let help_width = inner
            .saturating_sub(first_width + second_width + TABLE_CHROME)
            .max(MIN_HELP_WIDTH);

        let mut builder = Builder::default();
        for [first, second, help] in &table.rows {
            let second = second.render(self.color);
            let help = wrap_styled(help, help_width)
                .iter()
                .map(|line| line.render(self.color))
                .collect::<Vec<_>>()
                .join("\n");
            builder.push_record([
                first.render(self.color),
                pad_str(&second, second_width, Alignment::Left, None).into_owned(),
                help,
            ]);
        }
        let mut grid = builder.build();
        grid.with(Style::blank());
        let body = grid.to_string();

        let panel = Panel::new(&body, self.width)
            .title(title)
            .border(self.theme.paint(Role::Border));
        writeln!(self.out, "{}", panel.render(self.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(width: usize) -> HelpFormatter<Vec<u8>> {
        HelpFormatter::new(Vec::new(), width, false, Theme::default())
    }

    fn output(f: HelpFormatter<Vec<u8>>) -> String {
        String::from_utf8(f.into_inner()).unwrap()
    }

    #[test]
    fn test_two_spellings_use_two_columns() {
        let f = formatter(80);
        let mut table = SectionTable::default();
        f.add_params(
            &[
                HelpRecord::new("-m, --message", "The message"),
                HelpRecord::new("--version", "Show the version"),
            ],
            &mut table,
        );

        let rows = table.rows();
        assert_eq!(rows[0][0].as_str(), "-m");
        assert_eq!(rows[0][1].as_str(), "--message");
        assert_eq!(rows[1][0].as_str(), "");
        assert_eq!(rows[1][1].as_str(), "--version");
    }

    #[test]
    fn test_help_is_rewritten_and_parsed() {
        let f = formatter(80);
        let mut table = SectionTable::default();
        f.add_params(
            &[HelpRecord::new("--count", "Show [bold]info[/bold] [default: 3]")],
            &mut table,
        );
        let help = &table.rows()[0][2];
        assert_eq!(help.as_str(), "Show info (default: 3)");
        assert!(help.paint_at(5).bold);
        assert!(help.paint_at(10).dim);
    }

    #[test]
    fn test_section_writes_one_panel() {
        let mut f = formatter(60);
        let rows = f
            .section("Options", |f, table| {
                f.add_params(&[HelpRecord::new("-h, --help", "Show this message and exit.")], table);
                table.len()
            })
            .unwrap();
        assert_eq!(rows, 1);

        let out = output(f);
        assert_eq!(out.matches("╭─ Options").count(), 1);
        assert_eq!(out.matches('╰').count(), 1);
        assert!(out.contains("--help"));
        assert!(out.contains("Show this message and exit."));
        assert!(out.lines().all(|l| console::measure_text_width(l) == 60));
    }

    #[test]
    fn test_long_help_wraps_inside_panel() {
        let mut f = formatter(40);
        f.section("Options", |f, table| {
            f.add_params(
                &[HelpRecord::new(
                    "--message",
                    "A long help text that cannot possibly fit on one line of this panel",
                )],
                table,
            )
        })
        .unwrap();
        let out = output(f);
        assert!(out.lines().count() > 3);
        assert!(!out.contains('…'));
    }

    #[test]
    fn test_option_width_pads_second_column() {
        let mut f = formatter(60);
        f.set_option_width(Some(20));
        f.section("Options", |f, table| {
            f.add_params(&[HelpRecord::new("--a", "first")], table)
        })
        .unwrap();
        let out = output(f);
        let line = out.lines().nth(1).unwrap();
        let gap = line.find("first").unwrap() - line.find("--a").unwrap();
        assert!(gap >= 20);
    }

    #[test]
    fn test_write_usage() {
        let mut f = formatter(60);
        f.write_usage("greet", "[OPTIONS] NAME", None).unwrap();
        assert_eq!(output(f), "Usage: greet [OPTIONS] NAME\n");
    }

    #[test]
    fn test_write_banner_alignment() {
        let mut f = formatter(20);
        f.write_banner("[b]Hi[/b]", BannerAlign::Right).unwrap();
        let out = output(f);
        assert_eq!(out.lines().next(), Some("                  Hi"));

        let mut f = formatter(20);
        f.write_banner("Hi", BannerAlign::Center).unwrap();
        assert!(output(f).starts_with("         Hi"));
    }

    #[test]
    fn test_write_epilog_right_justified() {
        let mut f = formatter(30);
        f.write_epilog("made with love", EpilogBlend::Default).unwrap();
        let out = output(f);
        let line = out.lines().next().unwrap();
        assert_eq!(console::measure_text_width(line), 30);
        assert!(line.ends_with("made with love"));
    }

    #[test]
    fn test_write_epilog_colored_blend() {
        let mut f = HelpFormatter::new(Vec::new(), 30, true, Theme::default());
        f.write_epilog("abc", EpilogBlend::Default).unwrap();
        let out = output(f);
        assert!(out.contains("\u{1b}[38;5;"));
        assert_eq!(console::strip_ansi_codes(&out).trim(), "abc");
    }

    #[test]
    fn test_write_text_indents_and_wraps() {
        let mut f = formatter(20);
        f.write_text(&StyledText::new("one two three four five six")).unwrap();
        let out = output(f);
        assert!(out.lines().count() > 1);
        assert!(out.lines().all(|l| l.starts_with("  ") && l.len() <= 20));
    }
}
