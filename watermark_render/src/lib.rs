// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static rendering of watermark tiles.
//!
//! This crate turns a [`watermark_tile::TileGeometry`] plus a [`TileStyle`] into
//! SVG markup:
//! - [`render_tile_svg`] draws the tile itself (one rotated line of text),
//! - [`render_overlay_svg`] draws the tuning layer from a
//!   [`watermark_tile::DiagnosticOverlay`], and
//! - [`svg_data_url`] wraps markup into a base64 `data:` URL suitable for a CSS
//!   `background-image`.
//!
//! Geometry is consumed as-is. The only numeric decision made here is rounding
//! the tile up to whole device pixels.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
mod float;
mod svg;

use peniko::Color;
use watermark_text::{TextBaseline, TextStyle};

pub use svg::{SVG_DATA_URL_PREFIX, render_overlay_svg, render_tile_svg, svg_data_url};

/// Style pass-through needed to draw the tile text.
#[derive(Clone, Debug, PartialEq)]
pub struct TileStyle {
    /// Font used to draw (and previously measure) the text.
    pub font: TextStyle,
    /// Text colour.
    pub fill: Color,
    /// Opacity of the whole tile, in `[0, 1]`.
    pub opacity: f64,
    /// Baseline the text anchor is relative to.
    pub baseline: TextBaseline,
}

impl TileStyle {
    /// Creates a style with the given font, opaque black text, and the
    /// alphabetic baseline.
    #[must_use]
    pub fn new(font: TextStyle) -> Self {
        Self {
            font,
            fill: Color::from_rgba8(0, 0, 0, 255),
            opacity: 1.0,
            baseline: TextBaseline::Alphabetic,
        }
    }

    /// Sets the text colour.
    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the baseline.
    #[must_use]
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }
}

impl Default for TileStyle {
    fn default() -> Self {
        Self::new(TextStyle::default())
    }
}
