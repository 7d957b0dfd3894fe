// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostic overlay geometry.
//!
//! The tuning layer visualizes how rotation, padding and clipping shaped a
//! tile. Every shape here is selected from an existing [`TileGeometry`] and
//! moved into tile space; nothing is recomputed and the geometry is only read.

use kurbo::{Affine, Circle, Line, Point, Rect};

use crate::TileGeometry;

/// Radius of the dot drawn at each rotated content corner.
pub const CORNER_MARKER_RADIUS: f64 = 1.5;

/// Shapes drawn by the tuning layer, in tile space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagnosticOverlay {
    /// The rotation centre.
    pub center: Point,
    /// The rotation axis: the text direction through the centre, spanning the
    /// padding boundary.
    pub axis: Line,
    /// Circle swept by the content corners (`max_radius - padding`).
    pub rotation_track: Circle,
    /// The padding boundary (`max_radius`).
    pub padding_boundary: Circle,
    /// Rotated content corners.
    pub corner_markers: [Point; 4],
    /// Outline of the clip rectangle.
    pub clip_outline: Rect,
    /// The tile without its margin.
    pub drawable: Rect,
}

impl DiagnosticOverlay {
    /// Selects the overlay shapes from `geometry`.
    #[must_use]
    pub fn from_geometry(geometry: &TileGeometry) -> Self {
        let offset = geometry.content_to_tile();
        let center = geometry.tile_center();
        let max_radius = geometry.max_radius;

        let rotation = Affine::rotate(geometry.params.rotation_radians());
        let axis = Line::new(
            rotation * Point::new(-max_radius, 0.0) + offset,
            rotation * Point::new(max_radius, 0.0) + offset,
        );

        Self {
            center,
            axis,
            rotation_track: Circle::new(center, max_radius - geometry.params.padding),
            padding_boundary: Circle::new(center, max_radius),
            corner_markers: geometry.rotated_corners.map(|p| p + offset),
            clip_outline: geometry.clip_rect() + offset,
            drawable: Rect::from_origin_size(Point::ORIGIN, geometry.drawable_size()),
        }
    }

    /// The rotated content box as a closed polygon (the corner markers in order).
    #[must_use]
    pub fn content_outline(&self) -> [Point; 4] {
        self.corner_markers
    }

    /// A dot for each corner marker.
    pub fn corner_dots(&self) -> impl Iterator<Item = Circle> + '_ {
        self.corner_markers
            .iter()
            .map(|&p| Circle::new(p, CORNER_MARKER_RADIUS))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use watermark_text::TextExtents;

    use super::*;
    use crate::{LayoutParams, compute};

    #[test]
    fn overlay_circles_follow_radius_and_padding() {
        let g = compute(
            TextExtents::from_box(40.0, 16.0),
            &LayoutParams::default().with_padding(4.0).with_clip(false),
        );
        let overlay = g.overlay();
        assert!((overlay.rotation_track.radius - g.radius).abs() < 1e-12);
        assert!((overlay.padding_boundary.radius - g.max_radius).abs() < 1e-12);
        assert_eq!(overlay.center, Point::new(g.max_radius, g.max_radius));
    }

    #[test]
    fn overlay_does_not_alter_geometry() {
        let g = compute(
            TextExtents::new(1.0, 30.0, 10.0, 3.0),
            &LayoutParams::default().with_rotation(33.0).with_padding(2.0),
        );
        let before = g;
        let _ = g.overlay();
        assert_eq!(g, before);
    }

    #[test]
    fn axis_is_horizontal_without_rotation_and_spans_the_boundary() {
        let g = compute(
            TextExtents::from_box(20.0, 10.0),
            &LayoutParams::default().with_padding(5.0).with_clip(false),
        );
        let overlay = g.overlay();
        assert!((overlay.axis.p0.y - overlay.center.y).abs() < 1e-12);
        assert!((overlay.axis.p1.y - overlay.center.y).abs() < 1e-12);
        assert!((overlay.axis.length() - 2.0 * g.max_radius).abs() < 1e-9);
    }

    #[test]
    fn clip_outline_contains_every_corner_marker() {
        let g = compute(
            TextExtents::from_box(40.0, 16.0),
            &LayoutParams::default().with_rotation(-20.0).with_padding(3.0),
        );
        let overlay = g.overlay();
        let outline = overlay.clip_outline.inflate(1e-9, 1e-9);
        for p in overlay.content_outline() {
            assert!(outline.contains(p), "corner {p:?} outside {outline:?}");
        }
        assert_eq!(overlay.corner_dots().count(), 4);
    }
}
