// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repeating rotated-text watermarks.
//!
//! This crate wires the pipeline together. Each stage consumes only the
//! previous stage's output:
//! 1. **measure**: a [`TextMeasurer`] turns the text into [`TextExtents`],
//! 2. **geometry**: [`watermark_tile::compute`] derives a [`TileGeometry`],
//! 3. **render**: `watermark_render` emits the tile (and tuning overlay) as SVG
//!    data URLs, and
//! 4. **place**: [`place`] turns an image URL into CSS for a [`Surface`].
//!
//! A pre-rendered image ([`ContentSource::Image`]) skips the first three stages.
//!
//! ```
//! use watermark::{StyleSheetSurface, Watermark, WatermarkOptions, WatermarkOverrides};
//!
//! let watermark = Watermark::new(WatermarkOptions::text("CONFIDENTIAL").with_rotation(-30.0));
//! let mut surface = StyleSheetSurface::new();
//! watermark.draw(&WatermarkOverrides::none(), &mut surface).unwrap();
//! assert!(surface.carrier_css().contains("background-image:url(data:image/svg+xml;base64,"));
//! ```

mod error;
mod options;
mod placement;

pub use error::{ConfigError, WatermarkError};
pub use options::{ContentSource, MeasureStrategy, WatermarkOptions, WatermarkOverrides};
pub use placement::{
    Layer, Placement, PlacementMode, PlacementTarget, StyleDeclaration, StyleSheetSurface,
    Surface, layer_id, place,
};
pub use watermark_render::TileStyle;
pub use watermark_text::{
    FontFamily, FontStyle, FontWeight, HeuristicTextMeasurer, TextBaseline, TextExtents,
    TextMeasurer, TextStyle,
};
pub use watermark_tile::{DiagnosticOverlay, LayoutParams, TileGeometry};

static DEGRADED: HeuristicTextMeasurer = HeuristicTextMeasurer;

/// The output of one render call.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedTile {
    /// URL of the tile image: an SVG data URL, or the supplied image URL.
    pub url: String,
    /// Tile geometry, absent for pre-rendered images.
    pub geometry: Option<TileGeometry>,
    /// URL of the tuning overlay, when tuning is enabled for text content.
    pub tuning_url: Option<String>,
}

/// A configured watermark.
///
/// Holds the base [`WatermarkOptions`] and the precise text measurer. Every
/// call takes [`WatermarkOverrides`] and works on a merged copy; no call
/// changes the stored options.
pub struct Watermark {
    options: WatermarkOptions,
    precise: Box<dyn TextMeasurer>,
}

impl core::fmt::Debug for Watermark {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Watermark")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Watermark {
    /// Creates a watermark using the platform's default precise measurer.
    ///
    /// With the `parley` feature this is Parley; on `wasm32` it is canvas
    /// `measureText`; otherwise precise requests fall back to heuristics.
    #[must_use]
    pub fn new(options: WatermarkOptions) -> Self {
        Self {
            options,
            precise: default_precise_measurer(),
        }
    }

    /// Creates a watermark with a specific precise measurer.
    #[must_use]
    pub fn with_measurer(options: WatermarkOptions, measurer: impl TextMeasurer + 'static) -> Self {
        Self {
            options,
            precise: Box::new(measurer),
        }
    }

    /// The stored options.
    #[must_use]
    pub fn options(&self) -> &WatermarkOptions {
        &self.options
    }

    /// Merges `overrides` into the stored options and validates the result.
    pub fn resolve(&self, overrides: &WatermarkOverrides) -> Result<WatermarkOptions, WatermarkError> {
        let options = overrides.apply(&self.options);
        options.validate()?;
        Ok(options)
    }

    /// The measurer selected by `strategy`.
    #[must_use]
    pub fn measurer(&self, strategy: MeasureStrategy) -> &dyn TextMeasurer {
        match strategy {
            MeasureStrategy::Precise => self.precise.as_ref(),
            MeasureStrategy::Degraded => &DEGRADED,
        }
    }

    /// Computes the geometry for `text` under `options`.
    pub fn geometry(&self, text: &str, options: &WatermarkOptions) -> Result<TileGeometry, WatermarkError> {
        let measurer = self.measurer(options.measure_strategy);
        let extents = measurer.measure(text, &options.font);
        if !extents.is_valid() {
            #[cfg(feature = "tracing")]
            tracing::warn!(?extents, "rejecting measured extents");
            return Err(WatermarkError::InvalidExtents);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?extents, strategy = ?options.measure_strategy, "measured text");

        let geometry = watermark_tile::compute(extents, &options.layout_params());
        #[cfg(feature = "tracing")]
        {
            if geometry.is_finite() {
                tracing::debug!(
                    width = geometry.tile_size.width,
                    height = geometry.tile_size.height,
                    clip = options.clip,
                    "computed tile geometry"
                );
            } else {
                tracing::warn!(?geometry, "tile geometry is not finite");
            }
        }
        Ok(geometry)
    }

    /// Renders the tile (and, when tuning, the overlay) without placing it.
    pub fn render(&self, overrides: &WatermarkOverrides) -> Result<RenderedTile, WatermarkError> {
        let options = self.resolve(overrides)?;
        self.render_resolved(&options)
    }

    /// Returns the tile image URL.
    pub fn data_url(&self, overrides: &WatermarkOverrides) -> Result<String, WatermarkError> {
        Ok(self.render(overrides)?.url)
    }

    /// Renders the tile and installs it on `surface`.
    ///
    /// The tuning layer, if any, is installed as its own cover layer.
    pub fn draw(
        &self,
        overrides: &WatermarkOverrides,
        surface: &mut dyn Surface,
    ) -> Result<RenderedTile, WatermarkError> {
        let options = self.resolve(overrides)?;
        let rendered = self.render_resolved(&options)?;

        if let Some(tuning_url) = &rendered.tuning_url {
            let placement = place(tuning_url, &options, Layer::Tuning);
            #[cfg(feature = "tracing")]
            tracing::trace!(css = %placement.css_text(), "installing tuning layer");
            surface.install(&placement);
        }
        let placement = place(&rendered.url, &options, Layer::Tile);
        #[cfg(feature = "tracing")]
        tracing::trace!(css = %placement.css_text(), "installing tile");
        surface.install(&placement);

        Ok(rendered)
    }

    fn render_resolved(&self, options: &WatermarkOptions) -> Result<RenderedTile, WatermarkError> {
        let text = match &options.source {
            ContentSource::Image(url) => {
                return Ok(RenderedTile {
                    url: url.clone(),
                    geometry: None,
                    tuning_url: None,
                });
            }
            ContentSource::Text(text) => text,
        };

        let geometry = self.geometry(text, options)?;
        let style = self.tile_style(options);
        let svg = watermark_render::render_tile_svg(text, &geometry, &style);
        let tuning_url = options.tuning.then(|| {
            let overlay = geometry.overlay();
            let svg = watermark_render::render_overlay_svg(text, &overlay, &geometry, &style);
            watermark_render::svg_data_url(&svg)
        });

        Ok(RenderedTile {
            url: watermark_render::svg_data_url(&svg),
            geometry: Some(geometry),
            tuning_url,
        })
    }

    fn tile_style(&self, options: &WatermarkOptions) -> TileStyle {
        let baseline = options
            .baseline
            .unwrap_or_else(|| self.measurer(options.measure_strategy).baseline());
        TileStyle::new(options.font.clone())
            .with_fill(options.fill)
            .with_opacity(options.opacity)
            .with_baseline(baseline)
    }
}

fn default_precise_measurer() -> Box<dyn TextMeasurer> {
    #[cfg(feature = "parley")]
    {
        Box::new(watermark_text_parley::ParleyTextMeasurer::new())
    }

    #[cfg(all(not(feature = "parley"), target_arch = "wasm32"))]
    {
        match watermark_text_web::WebTextMeasurer::new() {
            Ok(measurer) => Box::new(measurer),
            Err(_) => Box::new(HeuristicTextMeasurer),
        }
    }

    #[cfg(all(not(feature = "parley"), not(target_arch = "wasm32")))]
    {
        Box::new(watermark_text_web::WebTextMeasurer::new())
    }
}

#[cfg(test)]
mod tests {
    use watermark_render::SVG_DATA_URL_PREFIX;

    use super::*;

    /// Reports fixed precise-style extents relative to the alphabetic baseline.
    #[derive(Debug)]
    struct FixedMeasurer(TextExtents);

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, _text: &str, _style: &TextStyle) -> TextExtents {
            self.0
        }
    }

    fn fixed() -> FixedMeasurer {
        FixedMeasurer(TextExtents::new(0.0, 40.0, 12.0, 4.0))
    }

    #[test]
    fn renders_text_to_an_svg_data_url() {
        let watermark = Watermark::with_measurer(WatermarkOptions::text("hello"), fixed());
        let rendered = watermark.render(&WatermarkOverrides::none()).unwrap();
        assert!(rendered.url.starts_with(SVG_DATA_URL_PREFIX));
        let geometry = rendered.geometry.expect("text content has geometry");
        assert_eq!(geometry.content_size.width, 40.0);
        assert_eq!(geometry.content_size.height, 16.0);
        assert!(rendered.tuning_url.is_none());
    }

    #[test]
    fn image_sources_skip_geometry() {
        let watermark = Watermark::with_measurer(WatermarkOptions::image("logo.png"), fixed());
        let rendered = watermark.render(&WatermarkOverrides::none()).unwrap();
        assert_eq!(rendered.url, "logo.png");
        assert!(rendered.geometry.is_none());
        assert_eq!(
            watermark.data_url(&WatermarkOverrides::none()).unwrap(),
            "logo.png"
        );
    }

    #[test]
    fn overrides_apply_per_call_only() {
        let watermark = Watermark::with_measurer(WatermarkOptions::text("hello"), fixed());
        let overrides = WatermarkOverrides {
            clip: Some(false),
            padding: Some(4.0),
            ..WatermarkOverrides::none()
        };
        let rendered = watermark.render(&overrides).unwrap();
        let geometry = rendered.geometry.unwrap();
        assert_eq!(geometry.tile_size.width, geometry.tile_size.height);
        assert!(watermark.options().clip, "stored options unchanged");
        assert_eq!(watermark.options().padding, 0.0);
    }

    #[test]
    fn degraded_strategy_uses_box_measurement() {
        let options = WatermarkOptions::text("abcd")
            .with_font(TextStyle::new(10.0))
            .with_measure_strategy(MeasureStrategy::Degraded);
        let watermark = Watermark::with_measurer(options.clone(), fixed());
        let geometry = watermark.geometry("abcd", &options).unwrap();
        assert!((geometry.content_size.width - 24.0).abs() < 1e-9);
        assert_eq!(geometry.anchor_offset, kurbo::Vec2::ZERO);
        assert_eq!(
            watermark.tile_style(&options).baseline,
            TextBaseline::Hanging
        );
        let precise = options.with_measure_strategy(MeasureStrategy::Precise);
        assert_eq!(
            watermark.tile_style(&precise).baseline,
            TextBaseline::Alphabetic
        );
    }

    #[test]
    fn explicit_baseline_wins() {
        let options = WatermarkOptions::text("x").with_baseline(TextBaseline::Middle);
        let watermark = Watermark::with_measurer(options.clone(), fixed());
        assert_eq!(watermark.tile_style(&options).baseline, TextBaseline::Middle);
    }

    #[test]
    fn invalid_configuration_fails_before_drawing() {
        let watermark = Watermark::with_measurer(WatermarkOptions::text(""), fixed());
        let mut surface = StyleSheetSurface::new();
        assert_eq!(
            watermark.draw(&WatermarkOverrides::none(), &mut surface),
            Err(WatermarkError::MissingContent)
        );
        assert_eq!(surface, StyleSheetSurface::new(), "nothing installed");

        let overrides = WatermarkOverrides {
            source: Some(ContentSource::Text("ok".to_owned())),
            padding: Some(-1.0),
            ..WatermarkOverrides::none()
        };
        assert_eq!(
            watermark.render(&overrides),
            Err(WatermarkError::InvalidConfig(ConfigError::NegativePadding(-1.0)))
        );
    }

    #[test]
    fn invalid_extents_are_rejected() {
        let bad = FixedMeasurer(TextExtents::new(f64::NAN, 1.0, 1.0, 1.0));
        let watermark = Watermark::with_measurer(WatermarkOptions::text("x"), bad);
        assert_eq!(
            watermark.render(&WatermarkOverrides::none()),
            Err(WatermarkError::InvalidExtents)
        );
    }

    #[test]
    fn tuning_installs_both_layers_in_cover_mode() {
        let options = WatermarkOptions::text("tune")
            .with_mode(PlacementMode::Cover)
            .with_tuning(true)
            .with_rotation(30.0)
            .with_name("wm");
        let watermark = Watermark::with_measurer(options, fixed());
        let mut surface = StyleSheetSurface::new();
        let rendered = watermark
            .draw(&WatermarkOverrides::none(), &mut surface)
            .unwrap();
        assert!(rendered.tuning_url.is_some());
        let ids: Vec<_> = surface.overlay_ids().collect();
        assert_eq!(ids, ["wm-tuning", "wm"], "tile installed last, on top");
        assert_eq!(surface.carrier_property("position"), Some("relative"));
        assert_eq!(surface.carrier_property("background-image"), None);
    }

    #[test]
    fn mat_mode_draws_on_the_carrier() {
        let watermark = Watermark::with_measurer(WatermarkOptions::text("mat"), fixed());
        let mut surface = StyleSheetSurface::new();
        let rendered = watermark
            .draw(&WatermarkOverrides::none(), &mut surface)
            .unwrap();
        let expected = format!("url({})", rendered.url);
        assert_eq!(
            surface.carrier_property("background-image"),
            Some(expected.as_str())
        );
        assert_eq!(surface.overlay_ids().count(), 0);
    }
}
