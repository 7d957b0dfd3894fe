// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Watermark demos: renders tiles in each layout mode to `watermark_demo.html`.
//!
//! Set `RUST_LOG=watermark=debug` to see the measured extents and tile sizes.
mod html;

use peniko::Color;
use tracing_subscriber::EnvFilter;
use watermark::{
    MeasureStrategy, PlacementMode, StyleSheetSurface, TextStyle, Watermark, WatermarkError,
    WatermarkOptions, WatermarkOverrides,
};

const DOT_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSI0MCIgaGVpZ2h0PSI0MCI+PGNpcmNsZSBjeD0iMjAiIGN5PSIyMCIgcj0iNiIgZmlsbD0iI2NjMDAwMCIgZmlsbC1vcGFjaXR5PSIwLjMiLz48L3N2Zz4=";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let sections = vec![
        unrotated_demo()?,
        rotated_clip_demo()?,
        rotation_safe_demo()?,
        tuning_demo()?,
        degraded_demo()?,
        image_demo()?,
    ];

    let html = html::render_report("Watermark demo", &sections);
    std::fs::write("watermark_demo.html", html)?;
    tracing::info!(sections = sections.len(), "wrote watermark_demo.html");
    Ok(())
}

fn section(
    title: &'static str,
    description: &'static str,
    watermark: &Watermark,
    overrides: &WatermarkOverrides,
) -> Result<html::HtmlSection, WatermarkError> {
    let mut surface = StyleSheetSurface::new();
    let rendered = watermark.draw(overrides, &mut surface)?;
    let overlays = surface
        .overlay_ids()
        .map(|id| {
            let css = surface.overlay_css(id).unwrap_or_default();
            (id.to_owned(), css)
        })
        .collect();
    Ok(html::HtmlSection {
        title,
        description,
        carrier_css: surface.carrier_css(),
        overlays,
        tile_url: rendered.geometry.is_some().then_some(rendered.url),
    })
}

fn base_options(text: &str) -> WatermarkOptions {
    WatermarkOptions::text(text)
        .with_font(TextStyle::new(18.0))
        .with_fill(Color::from_rgb8(0x20, 0x40, 0x80))
        .with_opacity(0.35)
}

fn unrotated_demo() -> Result<html::HtmlSection, WatermarkError> {
    let watermark = Watermark::new(base_options("CONFIDENTIAL").with_margin(24.0));
    section(
        "Unrotated",
        "The tile is the text box plus margin; the carrier repeats it as its own background.",
        &watermark,
        &WatermarkOverrides::none(),
    )
}

fn rotated_clip_demo() -> Result<html::HtmlSection, WatermarkError> {
    let watermark = Watermark::new(
        base_options("CONFIDENTIAL")
            .with_rotation(-30.0)
            .with_padding(6.0)
            .with_margin(16.0),
    );
    section(
        "Rotated, clipped",
        "The tile shrinks to the padded bounding box of the rotated text.",
        &watermark,
        &WatermarkOverrides::none(),
    )
}

fn rotation_safe_demo() -> Result<html::HtmlSection, WatermarkError> {
    let watermark = Watermark::new(base_options("draft").with_rotation(-30.0));
    // Same base options, drawn unclipped: the square tile holds any rotation.
    let overrides = WatermarkOverrides {
        clip: Some(false),
        rotation_degrees: Some(60.0),
        padding: Some(4.0),
        ..WatermarkOverrides::none()
    };
    section(
        "Rotation-safe",
        "Unclipped tiles are squares of side 2 * (radius + padding), independent of the angle.",
        &watermark,
        &overrides,
    )
}

fn tuning_demo() -> Result<html::HtmlSection, WatermarkError> {
    let watermark = Watermark::new(
        base_options("TUNE ME")
            .with_name("wm-tuning-demo")
            .with_mode(PlacementMode::Cover)
            .with_rotation(-20.0)
            .with_padding(8.0)
            .with_margin(12.0)
            .with_tuning(true),
    );
    section(
        "Tuning overlay",
        "A cover layer with the diagnostic overlay: rotation track, padding boundary, rotated corners and clip outline.",
        &watermark,
        &WatermarkOverrides::none(),
    )
}

fn degraded_demo() -> Result<html::HtmlSection, WatermarkError> {
    let watermark = Watermark::new(
        base_options("approximate")
            .with_measure_strategy(MeasureStrategy::Degraded)
            .with_rotation(-30.0),
    );
    section(
        "Degraded measurement",
        "Extents come from the 0.6em-per-glyph estimate and the text hangs from the top of its box.",
        &watermark,
        &WatermarkOverrides::none(),
    )
}

fn image_demo() -> Result<html::HtmlSection, WatermarkError> {
    let watermark = Watermark::new(WatermarkOptions::image(DOT_IMAGE).with_size("40px 40px"));
    section(
        "Pre-rendered image",
        "Image sources are placed as-is; no geometry is computed.",
        &watermark,
        &WatermarkOverrides::none(),
    )
}
