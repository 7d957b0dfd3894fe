// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web/WASM text measurement adapter.
//!
//! This crate provides the precise [`watermark_text::TextMeasurer`] for
//! `wasm32-*` targets using HTML Canvas `measureText` and its
//! `actualBoundingBox*` fields, which map one-to-one onto
//! [`watermark_text::TextExtents`].
//!
//! Notes:
//! - This uses `web-sys`/`wasm-bindgen` only on `wasm32` targets.
//! - Non-`wasm32` builds fall back to the heuristic measurer.

#![no_std]

extern crate alloc;

#[cfg(not(target_arch = "wasm32"))]
use watermark_text::HeuristicTextMeasurer;
use watermark_text::{TextBaseline, TextExtents, TextMeasurer, TextStyle};

/// A `wasm32` measurer backed by HTML Canvas 2D text metrics.
///
/// On non-`wasm32` targets, this type is still available but always falls back
/// to [`watermark_text::HeuristicTextMeasurer`].
#[derive(Clone, Debug)]
pub struct WebTextMeasurer {
    #[cfg(target_arch = "wasm32")]
    ctx: web_sys::CanvasRenderingContext2d,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for WebTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl WebTextMeasurer {
    /// Creates a web measurer using an offscreen canvas.
    ///
    /// This requires a browser-like environment with `window` and `document`.
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Result<Self, wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast as _;

        let window = web_sys::window()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("watermark_text_web: missing window"))?;
        let document = window.document().ok_or_else(|| {
            wasm_bindgen::JsValue::from_str("watermark_text_web: missing document")
        })?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| {
                wasm_bindgen::JsValue::from_str("watermark_text_web: missing 2d context")
            })?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Creates a web measurer that uses an existing canvas 2D context.
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn from_canvas_context(ctx: web_sys::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Creates a non-web measurer that always falls back to heuristics.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl TextMeasurer for WebTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtents {
        let text = watermark_text::first_line(text);
        if text.is_empty() {
            return TextExtents::ZERO;
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.ctx.set_font(&style.css_font());
            self.ctx.set_text_align("start");
            self.ctx.set_text_baseline("alphabetic");
            let Ok(metrics) = self.ctx.measure_text(text) else {
                return watermark_text::alphabetic_estimate(text, style);
            };

            // Older engines report 0 or omit the bounding box fields; clamp
            // rather than trust negative values.
            TextExtents {
                left: metrics.actual_bounding_box_left().max(0.0),
                right: metrics.actual_bounding_box_right().max(0.0),
                ascent: metrics.actual_bounding_box_ascent().max(0.0),
                descent: metrics.actual_bounding_box_descent().max(0.0),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            HeuristicTextMeasurer.measure(text, style)
        }
    }

    fn baseline(&self) -> TextBaseline {
        #[cfg(target_arch = "wasm32")]
        {
            TextBaseline::Alphabetic
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            HeuristicTextMeasurer.baseline()
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn native_fallback_matches_heuristic() {
        let style = TextStyle::new(20.0);
        let web = WebTextMeasurer::new();
        assert_eq!(
            web.measure("watermark", &style),
            HeuristicTextMeasurer.measure("watermark", &style)
        );
        assert_eq!(web.baseline(), TextBaseline::Hanging);
    }
}
