//! Trailing bracket rewriting
//!
//! clap-style help often ends with an annotation like `[default: 3]` or
//! `[required]`. Before styling, that last annotation is rewritten to
//! parenthesized form so it cannot be confused with optional-argument
//! bracket syntax.
//!
//! Rule: only one group is rewritten. It must be the last thing in the
//! string, be preceded by whitespace and contain no nested brackets. Any
//! earlier bracket group, or one glued to a word (`List[int]`), is left as
//! is.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static TRAILING_BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\s)\[([^\[\]]+)\]$").expect("static regex must compile")
});

/// Rewrite the trailing `[...]` annotation of `help` to `(...)`
pub fn rewrite_trailing_brackets(help: &str) -> Cow<'_, str> {
    TRAILING_BRACKET_RE.replace(help, "${1}(${2})")
}
