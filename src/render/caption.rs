//! Caption drawing.
//!
//! A laid-out caption is written as a small SVG document (panel, stroke and one `<text>` per
//! line) covering a horizontal band of the canvas, rasterized with resvg, then blended over the
//! canvas.

use std::fmt::Write as _;

use crate::{
    assets::color::{Color, color_or_default},
    assets::svg_raster::{FontSet, parse_svg, rasterize_svg},
    config::caption::{Align, CaptionConfig},
    foundation::error::FrameshotResult,
    layout::caption_box::CaptionLayout,
    render::surface::Surface,
};

/// Baseline offset below the middle of a line, as a fraction of the font size.
const BASELINE_BELOW_CENTER: f64 = 0.35;
/// Extra band height above and below the stroked box, as a fraction of the font size.
const BAND_SLACK: f64 = 0.25;

const GENERIC_FAMILIES: [&str; 5] = ["serif", "sans-serif", "monospace", "cursive", "fantasy"];

/// Caption SVG plus where its band sits on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionDocument {
    /// SVG source.
    pub svg: String,
    /// Band top on the canvas.
    pub top: i64,
    /// Band width (the canvas width).
    pub width: u32,
    /// Band height.
    pub height: u32,
}

/// Write the SVG for `layout` using `family` as the font family.
pub fn caption_document(
    layout: &CaptionLayout,
    config: &CaptionConfig,
    family: &str,
    canvas_width: u32,
) -> CaptionDocument {
    let outer = layout.outer_rect(config.stroke_width());
    let slack = (layout.font_size * BAND_SLACK).ceil();
    let top = (outer.y0 - slack).floor();
    let bottom = (outer.y1 + slack).ceil();
    let height = (bottom - top).max(1.0) as u32;
    let width = canvas_width.max(1);
    let rect = layout.rect;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    if config.background.is_some() || config.border.is_some() {
        let fill = match &config.background {
            Some(bg) => {
                let c = color_or_default(Some(&bg.color), Color::BLACK, "caption.background.color");
                format!(
                    r#"fill="{}" fill-opacity="{}""#,
                    c.to_hex_rgb(),
                    fmt_num(c.with_opacity(bg.opacity).alpha_f64())
                )
            }
            None => r#"fill="none""#.to_owned(),
        };
        let (stroke, radius) = match &config.border {
            Some(border) if border.width > 0.0 => {
                let c = color_or_default(Some(&border.color), Color::WHITE, "caption.border.color");
                (
                    format!(
                        r#" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
                        c.to_hex_rgb(),
                        fmt_num(c.alpha_f64()),
                        fmt_num(border.width)
                    ),
                    border.radius.max(0.0),
                )
            }
            Some(border) => (String::new(), border.radius.max(0.0)),
            None => (String::new(), 0.0),
        };
        let _ = write!(
            svg,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" {fill}{stroke}/>"#,
            fmt_num(rect.x0),
            fmt_num(rect.y0 - top),
            fmt_num(rect.width()),
            fmt_num(rect.height()),
            fmt_num(radius),
        );
    }

    let text_color = color_or_default(Some(&config.color), Color::BLACK, "caption.color");
    let (anchor, x) = match config.align {
        Align::Left => ("start", rect.x0 + layout.inner_padding),
        Align::Center => ("middle", (rect.x0 + rect.x1) / 2.0),
        Align::Right => ("end", rect.x1 - layout.inner_padding),
    };
    let family_attr = escape_xml(&font_family_list(family));
    for (i, line) in layout.lines.iter().enumerate() {
        let line_top = rect.y0 + layout.inner_padding + (i as f64) * layout.line_advance;
        let baseline = line_top + layout.line_advance / 2.0 + BASELINE_BELOW_CENTER * layout.font_size;
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" font-family="{family_attr}" font-size="{}" text-anchor="{anchor}" fill="{}" fill-opacity="{}">{}</text>"#,
            fmt_num(x),
            fmt_num(baseline - top),
            fmt_num(layout.font_size),
            text_color.to_hex_rgb(),
            fmt_num(text_color.alpha_f64()),
            escape_xml(line),
        );
    }
    svg.push_str("</svg>");

    CaptionDocument {
        svg,
        top: top as i64,
        width,
        height,
    }
}

/// Rasterize the caption and blend it over `canvas`.
#[tracing::instrument(skip_all, fields(lines = layout.lines.len()))]
pub fn draw_caption(
    canvas: &mut Surface,
    layout: &CaptionLayout,
    config: &CaptionConfig,
    fonts: &FontSet,
) -> FrameshotResult<()> {
    let family = fonts.resolve_family(&config.font);
    let doc = caption_document(layout, config, &family, canvas.width);
    let tree = parse_svg(&doc.svg, fonts)?;
    let band = rasterize_svg(&tree, doc.width, doc.height)?;
    canvas.draw_over(&band, 0, doc.top, 1.0)
}

fn font_family_list(family: &str) -> String {
    let family = family.trim().replace(['\'', '"'], "");
    if family.is_empty() {
        return "sans-serif".to_owned();
    }
    if GENERIC_FAMILIES.contains(&family.as_str()) {
        family
    } else {
        format!("'{family}', sans-serif")
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
            c => out.push(c),
        }
    }
    out
}

fn fmt_num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == r.trunc() {
        format!("{}", r as i64)
    } else {
        format!("{r}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/caption.rs"]
mod tests;
