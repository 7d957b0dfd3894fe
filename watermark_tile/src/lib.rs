// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile geometry for repeatable watermark imagery.
//!
//! A watermark tile holds one copy of (optionally rotated) text and is repeated
//! across a surface. This crate derives everything a renderer needs to draw that
//! tile from pre-measured [`TextExtents`]:
//! - the content box and the rotation-invariant radius around it,
//! - the final tile size, either a rotation-safe square or a tight clip at the
//!   configured angle,
//! - the text draw anchor, and
//! - the read-only [`DiagnosticOverlay`] used for tuning.
//!
//! Everything here is a pure function of its inputs. Text measurement, markup
//! emission and placement live in other crates.

#![no_std]

mod geometry;
mod layout;
mod overlay;

pub use geometry::{TileGeometry, compute};
pub use layout::LayoutParams;
pub use overlay::{CORNER_MARKER_RADIUS, DiagnosticOverlay};
pub use watermark_text::TextExtents;
