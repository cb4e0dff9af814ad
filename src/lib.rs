//! rich-help: styled help pages for clap command-line tools
//!
//! Commands and groups are registered through [`core::RichApp`] with
//! display attributes clap has no notion of (banners, epilog gradients,
//! usage overrides). Parsing stays with clap; help is rendered as panels
//! of highlighted option tables.

pub mod core;
pub mod render;
pub mod style;

pub use crate::core::{CommandInfo, ConfigError, GroupInfo, Node, RichApp, RunError};
pub use crate::render::BannerAlign;
pub use crate::style::{EpilogBlend, Rgb};
