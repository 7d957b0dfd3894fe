// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Precise watermark text measurement with Parley.
//!
//! A watermark tile is sized from one shaped line of text. [`ParleyTextMeasurer`]
//! shapes that line with the host's fonts and reports its extents from the
//! alphabetic baseline origin, which is where the SVG renderer anchors the
//! `<text>` element.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use core::cell::RefCell;

use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{FontContext, FontStyle as ParleyFontStyle, FontWeight, Layout, LayoutContext};
use watermark_text::{
    FontFamily, FontStyle, TextBaseline, TextExtents, TextMeasurer, TextStyle, first_line,
};

/// Shapes the first line of watermark text and reports its extents.
///
/// `left` is zero because a shaped line starts at its origin. `right` is the
/// line's advance and `ascent`/`descent` come from the line's font metrics.
/// Shaping contexts are reused between calls.
pub struct ParleyTextMeasurer {
    fonts: RefCell<FontContext>,
    layouts: RefCell<LayoutContext<()>>,
    display_scale: f32,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("display_scale", &self.display_scale)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a measurer over the system font collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fonts: RefCell::new(FontContext::new()),
            layouts: RefCell::new(LayoutContext::new()),
            display_scale: 1.0,
        }
    }

    /// Shapes at `display_scale` device pixels per unit.
    ///
    /// Extents stay in tile units; only hinting and glyph selection see the
    /// scale.
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = display_scale.max(0.0);
        self
    }

    fn shape(&self, line: &str, style: &TextStyle, scale: f32) -> Layout<()> {
        let mut fonts = self.fonts.borrow_mut();
        let mut layouts = self.layouts.borrow_mut();

        // Tile geometry is unrounded; keep glyph positions fractional.
        let mut builder = layouts.ranged_builder(&mut fonts, line, scale, false);
        builder.push_default(StyleProperty::FontSize(font_size(style.font_size)));
        builder.push_default(StyleProperty::FontStack(font_stack(&style.font_family)));
        builder.push_default(StyleProperty::FontStyle(font_style(style.font_style)));
        builder.push_default(StyleProperty::FontWeight(FontWeight::new(f32::from(
            style.font_weight.0,
        ))));

        let mut layout = builder.build(line);
        layout.break_all_lines(None);
        layout
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtents {
        let line = first_line(text);
        if line.is_empty() {
            return TextExtents::ZERO;
        }

        let scale = self.display_scale.max(1.0e-6);
        let layout = self.shape(line, style, scale);
        let Some(shaped) = layout.lines().next() else {
            return TextExtents::ZERO;
        };

        let metrics = shaped.metrics();
        let to_tile = |v: f32| (f64::from(v) / f64::from(scale)).max(0.0);
        TextExtents::new(
            0.0,
            to_tile(metrics.advance),
            to_tile(metrics.ascent),
            to_tile(metrics.descent),
        )
    }

    fn baseline(&self) -> TextBaseline {
        TextBaseline::Alphabetic
    }
}

fn font_stack(family: &FontFamily) -> FontStack<'_> {
    FontStack::from(match family {
        FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
        FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
        FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
        FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
    })
}

fn font_style(style: FontStyle) -> ParleyFontStyle {
    match style {
        FontStyle::Normal => ParleyFontStyle::Normal,
        FontStyle::Italic => ParleyFontStyle::Italic,
        FontStyle::Oblique => ParleyFontStyle::Oblique(None),
    }
}

/// Font size as Parley expects it. Invalid sizes shape as zero.
fn font_size(size: f64) -> f32 {
    if !size.is_finite() || size <= 0.0 {
        return 0.0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped to the f32 range first"
    )]
    {
        size.min(f64::from(f32::MAX)) as f32
    }
}
