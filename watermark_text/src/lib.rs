// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text extent measurement for watermark tiles.
//!
//! Tile geometry is derived from the extents of a single line of text. Measuring
//! that text is a host concern (a shaping engine natively, canvas `measureText`
//! on the web), so tile code depends only on the small [`TextMeasurer`] trait
//! defined here.
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - renderer-agnostic (precise shaping-backed measurers and the portable
//!   heuristic measurer implement the same trait).

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;

/// A text measurement strategy.
///
/// Implementations can be:
/// - precise, backed by a shaping engine (e.g. Parley) or by web platform text
///   measurement (e.g. HTML canvas), or
/// - degraded but portable, like [`HeuristicTextMeasurer`].
///
/// Tile geometry is agnostic to which strategy produced the extents; the only
/// thing a renderer needs to know in addition is [`TextMeasurer::baseline`].
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// Only the first line of `text` is measured. Empty text yields
    /// [`TextExtents::ZERO`].
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtents;

    /// The baseline the returned extents are relative to.
    ///
    /// Drawing the text with this baseline at the measured reference origin
    /// reproduces the measured box.
    fn baseline(&self) -> TextBaseline {
        TextBaseline::Alphabetic
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtents {
        (**self).measure(text, style)
    }

    fn baseline(&self) -> TextBaseline {
        (**self).baseline()
    }
}

/// Distances from a reference origin to the four edges of a line of text.
///
/// All values are non-negative distances in device-independent units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtents {
    /// Distance from the origin to the left edge.
    pub left: f64,
    /// Distance from the origin to the right edge.
    pub right: f64,
    /// Distance from the origin up to the top edge.
    pub ascent: f64,
    /// Distance from the origin down to the bottom edge.
    pub descent: f64,
}

impl TextExtents {
    /// Extents of empty text.
    pub const ZERO: Self = Self {
        left: 0.0,
        right: 0.0,
        ascent: 0.0,
        descent: 0.0,
    };

    /// Creates extents from the four edge distances.
    #[must_use]
    pub const fn new(left: f64, right: f64, ascent: f64, descent: f64) -> Self {
        Self {
            left,
            right,
            ascent,
            descent,
        }
    }

    /// Extents of a text box anchored at its top-left corner.
    ///
    /// This is the convention used by box-model measurement, which cannot see
    /// the glyph origin: `left` and `ascent` are zero.
    #[must_use]
    pub const fn from_box(width: f64, height: f64) -> Self {
        Self::new(0.0, width, 0.0, height)
    }

    /// Returns `left + right`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.left + self.right
    }

    /// Returns `ascent + descent`.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }

    /// Returns `true` if every distance is finite and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.left, self.right, self.ascent, self.descent]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Text styling inputs relevant to measurement and drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in device-independent units (typically CSS pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the font style.
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }

    /// Returns the CSS `font` shorthand, e.g. `"normal 400 16px sans-serif"`.
    #[must_use]
    pub fn css_font(&self) -> String {
        format!(
            "{} {} {}px {}",
            self.font_style.as_css(),
            self.font_weight.0,
            self.font_size,
            self.font_family.as_css_family()
        )
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(16.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

impl FontStyle {
    /// Returns the CSS keyword for this style.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
        }
    }
}

/// Vertical reference line for drawing text at an anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The alphabetic baseline; the anchor sits below the ascent.
    Alphabetic,
    /// The top edge of the text box (`text-before-edge` in SVG).
    Hanging,
    /// The vertical middle of the text box.
    Middle,
    /// The ideographic baseline.
    Ideographic,
}

impl TextBaseline {
    /// Returns the SVG `dominant-baseline` keyword.
    #[must_use]
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Alphabetic => "alphabetic",
            Self::Hanging => "text-before-edge",
            Self::Middle => "middle",
            Self::Ideographic => "ideographic",
        }
    }
}

/// A portable text measurer that never touches a font.
///
/// This is the degraded strategy: it assumes an average glyph advance of
/// ~0.6em and a line height of 1em, and reports box-model extents anchored at
/// the top-left of the text box (`left = ascent = 0`).
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtents {
        let line = first_line(text);
        if line.is_empty() {
            return TextExtents::ZERO;
        }
        TextExtents::from_box(estimated_advance(line, style), style.font_size.max(0.0))
    }

    fn baseline(&self) -> TextBaseline {
        TextBaseline::Hanging
    }
}

/// Average glyph advance assumed by estimated measurement, in ems.
pub const AVERAGE_ADVANCE_EM: f64 = 0.6;

/// Estimated advance of a single line, without consulting any font.
#[must_use]
pub fn estimated_advance(line: &str, style: &TextStyle) -> f64 {
    AVERAGE_ADVANCE_EM * style.font_size.max(0.0) * line.chars().count() as f64
}

/// Estimated extents relative to the alphabetic baseline.
///
/// Used where a baseline-relative measurer cannot get real metrics: the line
/// box is split 0.8em above and 0.2em below the baseline.
#[must_use]
pub fn alphabetic_estimate(line: &str, style: &TextStyle) -> TextExtents {
    let font_size = style.font_size.max(0.0);
    TextExtents::new(0.0, estimated_advance(line, style), 0.8 * font_size, 0.2 * font_size)
}

/// Returns the first line of `text`.
#[must_use]
pub fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn heuristic_extents_are_anchored_top_left() {
        let extents = HeuristicTextMeasurer.measure("abcd", &TextStyle::new(10.0));
        assert_eq!(extents.left, 0.0, "left should be zero");
        assert_eq!(extents.ascent, 0.0, "ascent should be zero");
        assert!((extents.right - 24.0).abs() < 1e-9, "0.6em per glyph");
        assert!((extents.descent - 10.0).abs() < 1e-9, "1em line height");
        assert_eq!(HeuristicTextMeasurer.baseline(), TextBaseline::Hanging);
    }

    #[test]
    fn empty_text_measures_zero() {
        let extents = HeuristicTextMeasurer.measure("", &TextStyle::default());
        assert_eq!(extents, TextExtents::ZERO);
        let extents = HeuristicTextMeasurer.measure("\nsecond", &TextStyle::default());
        assert_eq!(extents, TextExtents::ZERO);
    }

    #[test]
    fn only_the_first_line_is_measured() {
        let style = TextStyle::new(10.0);
        let one = HeuristicTextMeasurer.measure("ab", &style);
        let two = HeuristicTextMeasurer.measure("ab\nlonger line", &style);
        assert_eq!(one, two);
    }

    #[test]
    fn alphabetic_estimate_shares_the_glyph_advance() {
        let style = TextStyle::new(10.0);
        let boxed = HeuristicTextMeasurer.measure("abcd", &style);
        let alphabetic = alphabetic_estimate("abcd", &style);
        assert_eq!(alphabetic.left, 0.0);
        assert_eq!(alphabetic.right, boxed.right, "same advance as the box estimate");
        assert!((alphabetic.height() - boxed.height()).abs() < 1e-9, "1em line height");
        assert!((alphabetic.ascent - 8.0).abs() < 1e-9);
    }

    #[test]
    fn css_font_shorthand() {
        let style = TextStyle::new(16.0)
            .with_family(FontFamily::Named(Arc::from("Inter")))
            .with_weight(FontWeight::BOLD)
            .with_style(FontStyle::Italic);
        assert_eq!(style.css_font(), "italic 700 16px Inter");
        assert_eq!(TextStyle::new(12.5).css_font(), "normal 400 12.5px sans-serif");
    }

    #[test]
    fn extents_validity() {
        assert!(TextExtents::new(1.0, 2.0, 3.0, 4.0).is_valid());
        assert!(!TextExtents::new(-1.0, 2.0, 3.0, 4.0).is_valid());
        assert!(!TextExtents::new(f64::NAN, 2.0, 3.0, 4.0).is_valid());
        let e = TextExtents::new(1.0, 2.0, 3.0, 4.0);
        assert!((e.width() - 3.0).abs() < 1e-12);
        assert!((e.height() - 7.0).abs() < 1e-12);
    }
}
