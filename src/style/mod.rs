//! Style engine - styled text, markup, gradients and highlighting

pub mod blend;
pub mod escape;
pub mod highlight;
pub mod markup;
pub mod text;
pub mod theme;

pub use blend::{blend_text, EpilogBlend, DEFAULT_BLEND_END, DEFAULT_BLEND_START};
pub use escape::rewrite_trailing_brackets;
pub use highlight::Highlighter;
pub use text::{Paint, Rgb, Span, StyledText, Tone};
pub use theme::{Role, Theme};
