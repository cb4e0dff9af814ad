//! Two-color gradient blending across a string

use super::text::{Paint, Rgb, StyledText};

/// Start color of the default epilog gradient
pub const DEFAULT_BLEND_START: Rgb = Rgb::new(32, 32, 255);
/// End color of the default epilog gradient
pub const DEFAULT_BLEND_END: Rgb = Rgb::new(255, 32, 255);

/// How an epilog is colored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EpilogBlend {
    /// Blend with [`DEFAULT_BLEND_START`] → [`DEFAULT_BLEND_END`]
    #[default]
    Default,
    /// Blend between two explicit endpoints
    Colors(Rgb, Rgb),
    /// No gradient; the epilog is rendered from markup
    Disabled,
}

impl EpilogBlend {
    /// Endpoints to blend with, or `None` when disabled
    pub fn endpoints(&self) -> Option<(Rgb, Rgb)> {
        match self {
            EpilogBlend::Default => Some((DEFAULT_BLEND_START, DEFAULT_BLEND_END)),
            EpilogBlend::Colors(start, end) => Some((*start, *end)),
            EpilogBlend::Disabled => None,
        }
    }
}

/// Color each character of `message` by linear interpolation from `start`
/// to `end`.
///
/// Character `i` of `n` gets `start + (i / n) * (end - start)` per channel,
/// truncated toward zero, so the first character is exactly `start` and the
/// last one stops one step short of `end`.
pub fn blend_text(message: &str, start: Rgb, end: Rgb) -> StyledText {
    let size = message.chars().count();
    let mut text = StyledText::new(message);
    for (index, (offset, ch)) in message.char_indices().enumerate() {
        let factor = index as f64 / size as f64;
        let color = Rgb::new(
            lerp(start.r, end.r, factor),
            lerp(start.g, end.g, factor),
            lerp(start.b, end.b, factor),
        );
        text = text.stylize(offset..offset + ch.len_utf8(), Paint::new().rgb(color));
    }
    text
}

fn lerp(from: u8, to: u8, factor: f64) -> u8 {
    let from = f64::from(from);
    let value = from + (f64::from(to) - from) * factor;
    value.clamp(0.0, 255.0) as u8
}
