// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::Write as _;

/// One demo on the report page.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    /// Inline style of the carrier element.
    pub(crate) carrier_css: String,
    /// `(id, inline style)` of each cover layer, in install order.
    pub(crate) overlays: Vec<(String, String)>,
    /// The tile image, shown next to the carrier.
    pub(crate) tile_url: Option<String>,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\">");
    let _ = write!(out, "<title>{}</title>", escape(title));
    out.push_str(
        "<style>\
         body{font-family:sans-serif;margin:24px;background:#fafafa}\
         section{margin-bottom:32px}\
         .row{display:flex;gap:24px;align-items:flex-start}\
         .carrier{width:480px;height:240px;border:1px solid #ccc;background-color:#fff}\
         .tile{border:1px dashed #999;background:#fff}\
         p{color:#555;max-width:720px}\
         </style></head><body>\n",
    );
    let _ = writeln!(out, "<h1>{}</h1>", escape(title));

    for section in sections {
        out.push_str("<section>\n");
        let _ = writeln!(out, "<h2>{}</h2>", escape(section.title));
        let _ = writeln!(out, "<p>{}</p>", escape(section.description));
        out.push_str("<div class=\"row\">\n");
        let _ = write!(
            out,
            "<div class=\"carrier\" style=\"{}\">",
            escape(&section.carrier_css)
        );
        for (id, css) in &section.overlays {
            let _ = write!(
                out,
                "<div id=\"{}\" style=\"{}\"></div>",
                escape(id),
                escape(css)
            );
        }
        out.push_str("</div>\n");
        if let Some(url) = &section.tile_url {
            let _ = writeln!(out, "<img class=\"tile\" src=\"{}\">", escape(url));
        }
        out.push_str("</div>\n</section>\n");
    }

    out.push_str("</body></html>\n");
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
