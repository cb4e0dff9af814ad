//! Regex highlighters for option spellings and help text
//!
//! Each pattern uses named groups; the group name is the [`Role`] whose
//! paint is applied to the matched range. Patterns are anchored to the start
//! or end of the text so they do not overlap.

use std::sync::LazyLock;

use regex::Regex;

use super::text::StyledText;
use super::theme::{Role, Theme};

static OPTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?P<switch>^-\w)(?P<metavar>\s.*)?$",
        r"(?P<option>^--[\w-]+)(?P<metavar>\s.*$)?",
        r"(?P<args_and_cmds>^\w[\w-]*$)",
    ])
});

static HELP_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"(?P<help_require>\([^()]+\)$)"]));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static regex must compile"))
        .collect()
}

/// An ordered set of role-tagging patterns
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    patterns: &'static [Regex],
}

impl Highlighter {
    /// Highlights switches, long options, metavars and bare names
    pub fn options() -> Self {
        Self {
            patterns: OPTION_PATTERNS.as_slice(),
        }
    }

    /// Highlights a trailing parenthesized requirement note
    pub fn help() -> Self {
        Self {
            patterns: HELP_PATTERNS.as_slice(),
        }
    }

    /// Attach role paints to `text`. The text itself is unchanged.
    pub fn highlight(&self, text: StyledText, theme: &Theme) -> StyledText {
        let mut text = text;
        for pattern in self.patterns {
            let found: Vec<_> = pattern
                .captures_iter(text.as_str())
                .flat_map(|caps| {
                    pattern
                        .capture_names()
                        .flatten()
                        .filter_map(|name| Some((Role::from_name(name)?, caps.name(name)?.range())))
                        .collect::<Vec<_>>()
                })
                .collect();
            for (role, range) in found {
                text = text.stylize(range, theme.paint(role));
            }
        }
        text
    }

    pub fn highlight_str(&self, text: &str, theme: &Theme) -> StyledText {
        self.highlight(StyledText::new(text), theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles_at(text: &StyledText, theme: &Theme, index: usize) -> Option<Role> {
        let paint = text.paint_at(index);
        Role::ALL.into_iter().find(|role| !paint.is_plain() && theme.paint(*role) == paint)
    }

    #[test]
    fn test_switch() {
        let theme = Theme::default();
        let text = Highlighter::options().highlight_str("-m", &theme);
        assert_eq!(roles_at(&text, &theme, 0), Some(Role::Switch));
    }

    #[test]
    fn test_switch_with_metavar() {
        let theme = Theme::default();
        let text = Highlighter::options().highlight_str("-o <FILE>", &theme);
        assert_eq!(roles_at(&text, &theme, 0), Some(Role::Switch));
        assert_eq!(roles_at(&text, &theme, 4), Some(Role::Metavar));
    }

    #[test]
    fn test_long_option_and_metavar() {
        let theme = Theme::default();
        let text = Highlighter::options().highlight_str("--message <MESSAGE>", &theme);
        assert_eq!(text.as_str(), "--message <MESSAGE>");
        assert_eq!(roles_at(&text, &theme, 2), Some(Role::Option));
        assert_eq!(roles_at(&text, &theme, 12), Some(Role::Metavar));
    }

    #[test]
    fn test_bare_names() {
        let theme = Theme::default();
        let text = Highlighter::options().highlight_str("NAME", &theme);
        assert_eq!(roles_at(&text, &theme, 0), Some(Role::ArgsAndCmds));
        let text = Highlighter::options().highlight_str("hello-world", &theme);
        assert_eq!(roles_at(&text, &theme, 6), Some(Role::ArgsAndCmds));
    }

    #[test]
    fn test_help_require() {
        let theme = Theme::default();
        let text = Highlighter::help().highlight_str("Show info (default: 3)", &theme);
        assert_eq!(text.as_str(), "Show info (default: 3)");
        assert_eq!(roles_at(&text, &theme, 0), None);
        assert_eq!(roles_at(&text, &theme, 12), Some(Role::HelpRequire));
    }

    #[test]
    fn test_no_match_leaves_text_plain() {
        let theme = Theme::default();
        let text = Highlighter::options().highlight_str("weird token!", &theme);
        assert!(text.spans().is_empty());
    }
}
