// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout inputs for a single tile.

/// Rotation and spacing inputs for tile geometry.
///
/// `padding` and `margin` are expected to be finite and non-negative and
/// `rotation_degrees` finite. Callers validate; the calculator does not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Rotation of the text in degrees (clockwise in a y-down coordinate system).
    pub rotation_degrees: f64,
    /// Clearance between the content and the rotation/clip boundary.
    pub padding: f64,
    /// Extra spacing added to the final tile size, producing gaps between tiles.
    pub margin: f64,
    /// `true` crops the tile to the content's bounds at the configured angle;
    /// `false` keeps a square that contains the content at any angle.
    pub clip: bool,
}

impl LayoutParams {
    /// Unrotated, unpadded, clipped.
    pub const DEFAULT: Self = Self {
        rotation_degrees: 0.0,
        padding: 0.0,
        margin: 0.0,
        clip: true,
    };

    /// Sets the rotation angle in degrees.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    /// Sets the padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the clip policy.
    #[must_use]
    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    /// Returns the rotation angle in radians.
    #[must_use]
    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}
