// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tile geometry calculator.
//!
//! Two coordinate spaces are in play:
//! - **content space**: the unrotated content box centred on the origin. The
//!   rotated corners and the clip rectangle are expressed here.
//! - **tile space**: the final tile canvas, origin at its top-left corner. The
//!   margin is appended on the right and bottom edges.
//!
//! [`TileGeometry::text_origin`] sits in between: it is relative to the
//! rotation-safe square of side `2 * max_radius`, before any clipping. Use
//! [`TileGeometry::text_origin_in_tile`] to draw into the final tile.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use watermark_text::TextExtents;

use crate::LayoutParams;
use crate::overlay::DiagnosticOverlay;

/// Derived geometry of one watermark tile.
///
/// Constructed by [`TileGeometry::compute`]; a plain value consumed by the
/// renderer and never updated in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGeometry {
    /// Width and height of the unrotated content (`left + right`, `ascent + descent`).
    pub content_size: Size,
    /// Distance from the content centre to its farthest corner.
    pub radius: f64,
    /// `radius + padding`.
    pub max_radius: f64,
    /// Final size of the tile canvas, margin included.
    pub tile_size: Size,
    /// Anchor for drawing the text inside the rotation-safe square.
    pub text_origin: Point,
    /// Offset of the text anchor from the content box's top-left corner
    /// (`left`, `ascent` of the measured extents).
    pub anchor_offset: Vec2,
    /// Corners of the content box after rotation, in content space.
    ///
    /// Ordered top-left, top-right, bottom-right, bottom-left (before rotation).
    pub rotated_corners: [Point; 4],
    /// Top-left of the padded bounding box of `rotated_corners`, in content space.
    pub clip_origin: Point,
    /// Size of the padded bounding box of `rotated_corners`.
    pub clip_size: Size,
    /// The inputs this geometry was derived from.
    pub params: LayoutParams,
}

/// Computes the geometry of a tile. See [`TileGeometry::compute`].
#[must_use]
pub fn compute(extents: TextExtents, params: &LayoutParams) -> TileGeometry {
    TileGeometry::compute(extents, params)
}

impl TileGeometry {
    /// Computes the geometry of a tile holding text with the given extents.
    ///
    /// Total over finite rotations and non-negative padding/margin. Zero-size
    /// content yields a tile of `2 * padding + margin` per side. Non-finite
    /// inputs propagate as non-finite outputs.
    #[must_use]
    pub fn compute(extents: TextExtents, params: &LayoutParams) -> Self {
        let content_size = Size::new(extents.width(), extents.height());
        let half = Vec2::new(0.5 * content_size.width, 0.5 * content_size.height);
        let radius = half.hypot();
        let max_radius = radius + params.padding;

        let rotation = Affine::rotate(params.rotation_radians());
        let rotated_corners = [
            Point::new(-half.x, -half.y),
            Point::new(half.x, -half.y),
            Point::new(half.x, half.y),
            Point::new(-half.x, half.y),
        ]
        .map(|corner| rotation * corner);

        let bounds = bounds_of(&rotated_corners);
        let padding = params.padding;
        let clip_origin = Point::new(bounds.x0 - padding, bounds.y0 - padding);
        let clip_size = Size::new(
            bounds.width() + 2.0 * padding,
            bounds.height() + 2.0 * padding,
        );

        let tile_size = if params.clip {
            // Near 90° the clip can be narrower than the unrotated content; the
            // tile never is.
            Size::new(
                clip_size.width.max(content_size.width) + params.margin,
                clip_size.height.max(content_size.height) + params.margin,
            )
        } else {
            let side = 2.0 * max_radius + params.margin;
            Size::new(side, side)
        };

        let anchor_offset = Vec2::new(extents.left, extents.ascent);
        let text_origin = Point::new(
            max_radius - half.x + anchor_offset.x,
            max_radius - half.y + anchor_offset.y,
        );

        Self {
            content_size,
            radius,
            max_radius,
            tile_size,
            text_origin,
            anchor_offset,
            rotated_corners,
            clip_origin,
            clip_size,
            params: *params,
        }
    }

    /// The unrotated content box, centred on the origin.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        Rect::from_center_size(Point::ORIGIN, self.content_size)
    }

    /// The clip rectangle in content space.
    #[must_use]
    pub fn clip_rect(&self) -> Rect {
        Rect::from_origin_size(self.clip_origin, self.clip_size)
    }

    /// The tile size without the trailing margin.
    #[must_use]
    pub fn drawable_size(&self) -> Size {
        Size::new(
            self.tile_size.width - self.params.margin,
            self.tile_size.height - self.params.margin,
        )
    }

    /// The rotation centre in tile space.
    ///
    /// This is the centre of the drawable area: `(max_radius, max_radius)` for a
    /// rotation-safe tile and `-clip_origin` for a clipped one whose clip is not
    /// narrower than the content.
    #[must_use]
    pub fn tile_center(&self) -> Point {
        let drawable = self.drawable_size();
        Point::new(0.5 * drawable.width, 0.5 * drawable.height)
    }

    /// Offset that maps content space into tile space.
    #[must_use]
    pub fn content_to_tile(&self) -> Vec2 {
        self.tile_center().to_vec2()
    }

    /// [`TileGeometry::text_origin`] moved into tile space.
    #[must_use]
    pub fn text_origin_in_tile(&self) -> Point {
        let center = self.tile_center();
        Point::new(
            center.x - 0.5 * self.content_size.width + self.anchor_offset.x,
            center.y - 0.5 * self.content_size.height + self.anchor_offset.y,
        )
    }

    /// The content rotation as a transform about [`TileGeometry::tile_center`].
    #[must_use]
    pub fn rotation(&self) -> Affine {
        Affine::rotate_about(self.params.rotation_radians(), self.tile_center())
    }

    /// Returns `true` if every derived value is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.tile_size.is_finite()
            && self.text_origin.is_finite()
            && self.clip_origin.is_finite()
            && self.clip_size.is_finite()
            && self.max_radius.is_finite()
            && self.rotated_corners.iter().all(|p| p.is_finite())
    }

    /// Derives the diagnostic overlay for this tile.
    #[must_use]
    pub fn overlay(&self) -> DiagnosticOverlay {
        DiagnosticOverlay::from_geometry(self)
    }
}

fn bounds_of(points: &[Point; 4]) -> Rect {
    let [first, rest @ ..] = points;
    let mut bounds = Rect::from_points(*first, *first);
    for p in rest {
        bounds = Rect::new(
            bounds.x0.min(p.x),
            bounds.y0.min(p.y),
            bounds.x1.max(p.x),
            bounds.y1.max(p.y),
        );
    }
    bounds
}
