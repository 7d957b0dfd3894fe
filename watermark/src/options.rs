// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Watermark configuration.
//!
//! A [`crate::Watermark`] owns one [`WatermarkOptions`] value. Each call may
//! pass [`WatermarkOverrides`]; they are merged into a fresh copy for that call
//! only and never written back.

use peniko::Color;
use watermark_text::{TextBaseline, TextStyle};
use watermark_tile::LayoutParams;

use crate::error::{ConfigError, WatermarkError};
use crate::placement::PlacementMode;

/// What the tile shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentSource {
    /// A single line of text, measured and rotated into a tile.
    Text(String),
    /// A pre-rendered image URL, placed as-is. No geometry is computed.
    Image(String),
}

impl ContentSource {
    /// Returns `true` if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Image(url) => url.trim().is_empty(),
        }
    }
}

/// Which text measurement strategy to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeasureStrategy {
    /// Shaping-aware or platform metrics (Parley natively, canvas on the web).
    #[default]
    Precise,
    /// Box-model heuristics; portable, anchored at the text box's top-left.
    Degraded,
}

/// Full watermark configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct WatermarkOptions {
    /// Element id of the cover layer; the tuning layer appends `-tuning`.
    pub name: String,
    /// How the rendered tile is attached to the target surface.
    pub mode: PlacementMode,
    /// Stacking order of cover layers.
    pub z_index: i32,
    /// Text or pre-rendered image.
    pub source: ContentSource,
    /// Font used to measure and draw text.
    pub font: TextStyle,
    /// Text colour.
    pub fill: Color,
    /// Baseline override; `None` uses the measurer's own convention.
    pub baseline: Option<TextBaseline>,
    /// Text rotation in degrees.
    pub rotation_degrees: f64,
    /// Gap between repeated tiles.
    pub margin: f64,
    /// Clearance around the text inside each tile.
    pub padding: f64,
    /// Crop the tile to the text at the configured angle.
    pub clip: bool,
    /// Opacity of the tile and the tuning layer, in `[0, 1]`.
    pub opacity: f64,
    /// Also render and place the diagnostic overlay (cover mode only).
    pub tuning: bool,
    /// Text measurement strategy.
    pub measure_strategy: MeasureStrategy,
    /// CSS `background-position`.
    pub position: String,
    /// CSS `background-repeat`.
    pub repeat: String,
    /// CSS `background-size`, if any.
    pub size: Option<String>,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            name: "watermark".to_owned(),
            mode: PlacementMode::Mat,
            z_index: 100_000,
            source: ContentSource::Text("watermark".to_owned()),
            font: TextStyle::new(16.0),
            fill: Color::from_rgba8(0, 0, 0, 255),
            baseline: None,
            rotation_degrees: 0.0,
            margin: 0.0,
            padding: 0.0,
            clip: true,
            opacity: 0.1,
            tuning: false,
            measure_strategy: MeasureStrategy::Precise,
            position: "center center".to_owned(),
            repeat: "repeat".to_owned(),
            size: None,
        }
    }
}

impl WatermarkOptions {
    /// Default options drawing `text`.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::default().with_source(ContentSource::Text(text.into()))
    }

    /// Default options placing the image at `url`.
    #[must_use]
    pub fn image(url: impl Into<String>) -> Self {
        Self::default().with_source(ContentSource::Image(url.into()))
    }

    /// Sets the layer name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the placement mode.
    #[must_use]
    pub fn with_mode(mut self, mode: PlacementMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the cover layer z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the content source.
    #[must_use]
    pub fn with_source(mut self, source: ContentSource) -> Self {
        self.source = source;
        self
    }

    /// Sets the font.
    #[must_use]
    pub fn with_font(mut self, font: TextStyle) -> Self {
        self.font = font;
        self
    }

    /// Sets the text colour.
    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Overrides the drawing baseline.
    #[must_use]
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Sets the rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    /// Sets the margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the clip policy.
    #[must_use]
    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Enables or disables the tuning layer.
    #[must_use]
    pub fn with_tuning(mut self, tuning: bool) -> Self {
        self.tuning = tuning;
        self
    }

    /// Sets the measurement strategy.
    #[must_use]
    pub fn with_measure_strategy(mut self, strategy: MeasureStrategy) -> Self {
        self.measure_strategy = strategy;
        self
    }

    /// Sets the CSS `background-position`.
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// Sets the CSS `background-repeat`.
    #[must_use]
    pub fn with_repeat(mut self, repeat: impl Into<String>) -> Self {
        self.repeat = repeat.into();
        self
    }

    /// Sets the CSS `background-size`.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// The geometry inputs carried by these options.
    #[must_use]
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            rotation_degrees: self.rotation_degrees,
            padding: self.padding,
            margin: self.margin,
            clip: self.clip,
        }
    }

    /// Checks these options before anything is measured or drawn.
    pub fn validate(&self) -> Result<(), WatermarkError> {
        if self.source.is_empty() {
            return Err(WatermarkError::MissingContent);
        }
        let config = |e: ConfigError| Err(WatermarkError::InvalidConfig(e));
        if self.name.trim().is_empty() {
            return config(ConfigError::EmptyName);
        }
        if !self.rotation_degrees.is_finite() {
            return config(ConfigError::NonFiniteRotation(self.rotation_degrees));
        }
        if !self.padding.is_finite() {
            return config(ConfigError::NonFinitePadding(self.padding));
        }
        if self.padding < 0.0 {
            return config(ConfigError::NegativePadding(self.padding));
        }
        if !self.margin.is_finite() {
            return config(ConfigError::NonFiniteMargin(self.margin));
        }
        if self.margin < 0.0 {
            return config(ConfigError::NegativeMargin(self.margin));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return config(ConfigError::OpacityOutOfRange(self.opacity));
        }
        if !self.font.font_size.is_finite() || self.font.font_size <= 0.0 {
            return config(ConfigError::InvalidFontSize(self.font.font_size));
        }
        if self.tuning && self.mode != PlacementMode::Cover {
            return config(ConfigError::TuningRequiresCover);
        }
        Ok(())
    }
}

/// Per-call changes to [`WatermarkOptions`]. `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WatermarkOverrides {
    /// See [`WatermarkOptions::name`].
    pub name: Option<String>,
    /// See [`WatermarkOptions::mode`].
    pub mode: Option<PlacementMode>,
    /// See [`WatermarkOptions::z_index`].
    pub z_index: Option<i32>,
    /// See [`WatermarkOptions::source`].
    pub source: Option<ContentSource>,
    /// See [`WatermarkOptions::font`].
    pub font: Option<TextStyle>,
    /// See [`WatermarkOptions::fill`].
    pub fill: Option<Color>,
    /// See [`WatermarkOptions::baseline`].
    pub baseline: Option<TextBaseline>,
    /// See [`WatermarkOptions::rotation_degrees`].
    pub rotation_degrees: Option<f64>,
    /// See [`WatermarkOptions::margin`].
    pub margin: Option<f64>,
    /// See [`WatermarkOptions::padding`].
    pub padding: Option<f64>,
    /// See [`WatermarkOptions::clip`].
    pub clip: Option<bool>,
    /// See [`WatermarkOptions::opacity`].
    pub opacity: Option<f64>,
    /// See [`WatermarkOptions::tuning`].
    pub tuning: Option<bool>,
    /// See [`WatermarkOptions::measure_strategy`].
    pub measure_strategy: Option<MeasureStrategy>,
    /// See [`WatermarkOptions::position`].
    pub position: Option<String>,
    /// See [`WatermarkOptions::repeat`].
    pub repeat: Option<String>,
    /// See [`WatermarkOptions::size`].
    pub size: Option<String>,
}

impl WatermarkOverrides {
    /// No overrides.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns `base` with every set field replaced.
    #[must_use]
    pub fn apply(&self, base: &WatermarkOptions) -> WatermarkOptions {
        let mut out = base.clone();
        if let Some(name) = &self.name {
            out.name.clone_from(name);
        }
        if let Some(mode) = self.mode {
            out.mode = mode;
        }
        if let Some(z_index) = self.z_index {
            out.z_index = z_index;
        }
        if let Some(source) = &self.source {
            out.source = source.clone();
        }
        if let Some(font) = &self.font {
            out.font = font.clone();
        }
        if let Some(fill) = self.fill {
            out.fill = fill;
        }
        if let Some(baseline) = self.baseline {
            out.baseline = Some(baseline);
        }
        if let Some(degrees) = self.rotation_degrees {
            out.rotation_degrees = degrees;
        }
        if let Some(margin) = self.margin {
            out.margin = margin;
        }
        if let Some(padding) = self.padding {
            out.padding = padding;
        }
        if let Some(clip) = self.clip {
            out.clip = clip;
        }
        if let Some(opacity) = self.opacity {
            out.opacity = opacity;
        }
        if let Some(tuning) = self.tuning {
            out.tuning = tuning;
        }
        if let Some(strategy) = self.measure_strategy {
            out.measure_strategy = strategy;
        }
        if let Some(position) = &self.position {
            out.position.clone_from(position);
        }
        if let Some(repeat) = &self.repeat {
            out.repeat.clone_from(repeat);
        }
        if let Some(size) = &self.size {
            out.size = Some(size.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(WatermarkOptions::default().validate(), Ok(()));
        let layout = WatermarkOptions::default().layout_params();
        assert_eq!(layout, LayoutParams::default());
    }

    #[test]
    fn empty_sources_are_missing_content() {
        for source in [
            ContentSource::Text(String::new()),
            ContentSource::Image("  ".to_owned()),
        ] {
            let options = WatermarkOptions::default().with_source(source);
            assert_eq!(options.validate(), Err(WatermarkError::MissingContent));
        }
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let cases = [
            (
                WatermarkOptions::default().with_padding(-1.0),
                ConfigError::NegativePadding(-1.0),
            ),
            (
                WatermarkOptions::default().with_margin(-0.5),
                ConfigError::NegativeMargin(-0.5),
            ),
            (
                WatermarkOptions::default().with_rotation(f64::INFINITY),
                ConfigError::NonFiniteRotation(f64::INFINITY),
            ),
            (
                WatermarkOptions::default().with_opacity(1.5),
                ConfigError::OpacityOutOfRange(1.5),
            ),
            (
                WatermarkOptions::default().with_font(TextStyle::new(0.0)),
                ConfigError::InvalidFontSize(0.0),
            ),
            (
                WatermarkOptions::default().with_name(""),
                ConfigError::EmptyName,
            ),
        ];
        for (options, expected) in cases {
            assert_eq!(
                options.validate(),
                Err(WatermarkError::InvalidConfig(expected))
            );
        }
    }

    #[test]
    fn nan_rotation_and_opacity_are_rejected() {
        let options = WatermarkOptions::default().with_rotation(f64::NAN);
        assert!(matches!(
            options.validate(),
            Err(WatermarkError::InvalidConfig(ConfigError::NonFiniteRotation(_)))
        ));
        let options = WatermarkOptions::default().with_opacity(f64::NAN);
        assert!(matches!(
            options.validate(),
            Err(WatermarkError::InvalidConfig(ConfigError::OpacityOutOfRange(_)))
        ));
    }

    #[test]
    fn tuning_needs_a_cover_layer() {
        let options = WatermarkOptions::default().with_tuning(true);
        assert_eq!(
            options.validate(),
            Err(WatermarkError::InvalidConfig(ConfigError::TuningRequiresCover))
        );
        let options = options.with_mode(PlacementMode::Cover);
        assert_eq!(options.validate(), Ok(()));
    }

    #[test]
    fn overrides_replace_only_set_fields() {
        let base = WatermarkOptions::text("base").with_padding(3.0);
        let overrides = WatermarkOverrides {
            rotation_degrees: Some(-30.0),
            size: Some("120px".to_owned()),
            ..WatermarkOverrides::none()
        };
        let merged = overrides.apply(&base);
        assert_eq!(merged.rotation_degrees, -30.0);
        assert_eq!(merged.size.as_deref(), Some("120px"));
        assert_eq!(merged.padding, 3.0);
        assert_eq!(merged.source, ContentSource::Text("base".to_owned()));
        assert_eq!(base.rotation_degrees, 0.0, "base is untouched");
        assert_eq!(WatermarkOverrides::none().apply(&base), base);
    }
}
