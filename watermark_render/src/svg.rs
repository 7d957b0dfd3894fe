// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG emission for tiles and tuning overlays.

use alloc::format;
use alloc::string::{String, ToString};

use base64::Engine as _;
use kurbo::{Point, Size};
use peniko::Color;
use watermark_tile::{DiagnosticOverlay, TileGeometry};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::TileStyle;

/// Prefix of every URL produced by [`svg_data_url`].
pub const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml;base64,";

/// Renders the tile as a standalone SVG document.
///
/// The text is anchored at [`TileGeometry::text_origin_in_tile`] and rotated
/// about [`TileGeometry::tile_center`].
#[must_use]
pub fn render_tile_svg(text: &str, geometry: &TileGeometry, style: &TileStyle) -> String {
    let mut out = String::new();
    open_svg(&mut out, geometry.tile_size);
    write_text(&mut out, geometry, style);
    out.push_str(&format!(r#" opacity="{}""#, style.opacity));
    out.push('>');
    out.push_str(&escape_xml(watermark_text::first_line(text)));
    out.push_str("</text>\n");
    out.push_str("</svg>\n");
    out
}

/// Renders the tuning layer: the tile text plus every overlay shape.
///
/// The whole layer is drawn at the style's opacity.
#[must_use]
pub fn render_overlay_svg(
    text: &str,
    overlay: &DiagnosticOverlay,
    geometry: &TileGeometry,
    style: &TileStyle,
) -> String {
    let mut out = String::new();
    open_svg(&mut out, geometry.tile_size);
    out.push_str(&format!(r#"<g opacity="{}">"#, style.opacity));
    out.push('\n');

    let d = overlay.drawable;
    out.push_str(&format!(
        r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#00ff00" fill-opacity="0.08"/>"##,
        d.x0,
        d.y0,
        d.width(),
        d.height()
    ));
    out.push('\n');

    write_text(&mut out, geometry, style);
    out.push('>');
    out.push_str(&escape_xml(watermark_text::first_line(text)));
    out.push_str("</text>\n");

    let outline = overlay.content_outline();
    out.push_str(r#"<polygon points=""#);
    for (i, p) in outline.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{},{}", p.x, p.y));
    }
    out.push('"');
    out.push_str(r##" fill="#ffff00" fill-opacity="0.2" stroke="#ff0000" stroke-opacity="0.25"/>"##);
    out.push('\n');

    let axis = overlay.axis;
    out.push_str(&format!(
        r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#000000" stroke-dasharray="5 15"/>"##,
        axis.p0.x, axis.p0.y, axis.p1.x, axis.p1.y
    ));
    out.push('\n');

    for circle in [overlay.rotation_track, overlay.padding_boundary] {
        write_circle(&mut out, circle.center, circle.radius);
        out.push_str(r##" fill="none" stroke="#000000"/>"##);
        out.push('\n');
    }

    for dot in overlay.corner_dots() {
        write_circle(&mut out, dot.center, dot.radius);
        out.push_str(r##" fill="#ff0000"/>"##);
        out.push('\n');
    }

    let clip = overlay.clip_outline;
    out.push_str(&format!(
        r##"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#000000"/>"##,
        clip.x0,
        clip.y0,
        clip.width(),
        clip.height()
    ));
    out.push('\n');

    out.push_str("</g>\n</svg>\n");
    out
}

/// Encodes SVG markup as a base64 `data:` URL.
#[must_use]
pub fn svg_data_url(svg: &str) -> String {
    let mut out = SVG_DATA_URL_PREFIX.to_string();
    base64::engine::general_purpose::STANDARD.encode_string(svg, &mut out);
    out
}

/// Opens an `<svg>` element sized to whole device pixels.
///
/// The view box matches the rounded size so the content is never rescaled.
fn open_svg(out: &mut String, size: Size) {
    let width = size.width.max(0.0).ceil();
    let height = size.height.max(0.0).ceil();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" "#);
    out.push_str(&format!(
        r#"width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    ));
    out.push('\n');
}

/// Writes an unterminated `<text` start tag.
fn write_text(out: &mut String, geometry: &TileGeometry, style: &TileStyle) {
    let origin = geometry.text_origin_in_tile();
    let baseline = style.baseline.as_svg();
    out.push_str(&format!(
        r#"<text x="{}" y="{}" style="font: {}; white-space: pre" text-anchor="start" dominant-baseline="{baseline}" alignment-baseline="{baseline}""#,
        origin.x,
        origin.y,
        escape_xml(&style.font.css_font()),
    ));
    let degrees = geometry.params.rotation_degrees;
    if degrees != 0.0 {
        let center = geometry.tile_center();
        out.push_str(&format!(
            r#" transform="rotate({} {} {})""#,
            degrees, center.x, center.y
        ));
    }
    write_paint_attr(out, "fill", style.fill);
}

fn write_circle(out: &mut String, center: Point, radius: f64) {
    out.push_str(&format!(
        r#"<circle cx="{}" cy="{}" r="{}""#,
        center.x, center.y, radius
    ));
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (fill, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use watermark_text::{TextBaseline, TextExtents, TextStyle};
    use watermark_tile::{LayoutParams, compute};

    use super::*;

    fn geometry(rotation: f64) -> TileGeometry {
        compute(
            TextExtents::from_box(40.0, 16.0),
            &LayoutParams::default()
                .with_rotation(rotation)
                .with_padding(4.0),
        )
    }

    #[test]
    fn tile_svg_is_sized_to_whole_pixels() {
        let g = compute(
            TextExtents::from_box(40.0, 16.0),
            &LayoutParams::default().with_padding(4.0).with_clip(false),
        );
        let svg = render_tile_svg("hi", &g, &TileStyle::default());
        // 2 * sqrt(464) + 8 = 51.08... rounds up to 52.
        assert!(svg.contains(r#"width="52" height="52" viewBox="0 0 52 52""#), "{svg}");
    }

    #[test]
    fn unrotated_tile_has_no_transform() {
        let svg = render_tile_svg("hi", &geometry(0.0), &TileStyle::default());
        assert!(!svg.contains("transform"), "{svg}");
        assert!(svg.contains(r#"x="4" y="4""#), "{svg}");
    }

    #[test]
    fn rotated_tile_rotates_about_the_tile_centre() {
        let g = geometry(-30.0);
        let svg = render_tile_svg("hi", &g, &TileStyle::default());
        let c = g.tile_center();
        let expected = format!(r#"transform="rotate(-30 {} {})""#, c.x, c.y);
        assert!(svg.contains(&expected), "{svg}");
    }

    #[test]
    fn text_is_escaped_and_styled() {
        let style = TileStyle::new(TextStyle::new(20.0))
            .with_fill(Color::from_rgba8(255, 0, 0, 128))
            .with_opacity(0.25)
            .with_baseline(TextBaseline::Hanging);
        let svg = render_tile_svg("a<b & \"c\"", &geometry(0.0), &style);
        assert!(svg.contains("a&lt;b &amp; &quot;c&quot;</text>"), "{svg}");
        assert!(svg.contains("font: normal 400 20px sans-serif"), "{svg}");
        assert!(svg.contains(r##"fill="#ff0000" fill-opacity="##), "{svg}");
        assert!(svg.contains(r#"opacity="0.25""#), "{svg}");
        assert!(svg.contains(r#"dominant-baseline="text-before-edge""#), "{svg}");
    }

    #[test]
    fn overlay_svg_draws_every_shape() {
        let g = geometry(45.0);
        let svg = render_overlay_svg("hi", &g.overlay(), &g, &TileStyle::default());
        assert_eq!(svg.matches("<circle").count(), 6, "two rings and four dots");
        assert_eq!(svg.matches("<rect").count(), 2, "drawable tint and clip outline");
        assert_eq!(svg.matches("<line").count(), 1);
        assert_eq!(svg.matches("<polygon").count(), 1);
        assert_eq!(svg.matches("<text").count(), 1);
    }

    #[test]
    fn data_url_round_trips_through_base64() {
        let svg = render_tile_svg("水印", &geometry(10.0), &TileStyle::default());
        let url = svg_data_url(&svg);
        let encoded = url.strip_prefix(SVG_DATA_URL_PREFIX).expect("data url prefix");
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .expect("valid base64");
        assert_eq!(decoded, svg.as_bytes());
    }
}
