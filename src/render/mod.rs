//! Rendering - panels, wrapping and the help formatter

pub mod formatter;
pub mod panel;
pub mod wrap;

pub use formatter::{BannerAlign, HelpFormatter, HelpRecord, SectionTable};
pub use panel::Panel;
