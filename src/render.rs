use crate::config::RenderConfig;
#[cfg(feature = "png")]
use crate::error::RenderError;
use crate::figure::{Anchor, Element, Figure, Glyph, Hatch, TextStyle};
use crate::theme::Theme;
use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

pub fn render_svg(figure: &Figure, theme: &Theme) -> String {
    let frame = &figure.frame;
    let width = frame.canvas_width;
    let height = frame.canvas_height;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    ));

    let hatches = hatch_patterns(figure);
    if !hatches.is_empty() {
        svg.push_str("<defs>");
        for (color, id) in &hatches {
            svg.push_str(&format!(
                "<pattern id=\"{id}\" patternUnits=\"userSpaceOnUse\" width=\"8\" height=\"8\"><path d=\"M -2 2 L 2 -2 M 0 8 L 8 0 M 6 10 L 10 6\" stroke=\"{}\" stroke-width=\"1\"/></pattern>",
                escape_xml(color)
            ));
        }
        svg.push_str("</defs>");
    }

    if let Some((title, style)) = &figure.title {
        let x = width / 2.0;
        let y = frame.margin_top / 2.0;
        svg.push_str(&text_svg(x, y, title, style, "title", &theme.font_family));
    }

    for element in &figure.elements {
        let class = element.tag().class_name();
        match element {
            Element::Line { from, to, stroke, .. } => {
                let (x1, y1) = frame.to_px(*from);
                let (x2, y2) = frame.to_px(*to);
                svg.push_str(&format!(
                    "<line class=\"{class}\" x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                    escape_xml(&stroke.color),
                    stroke.width
                ));
            }
            Element::Rect { rect, paint, .. } => {
                let (x, y, w, h) = frame.rect_to_px(*rect);
                let hatch = paint
                    .hatch
                    .and_then(|hatch| hatch_id(&hatches, hatch, &paint.stroke));
                let class_attr = if hatch.is_some() {
                    String::new()
                } else {
                    format!(" class=\"{class}\"")
                };
                let body = format!(
                    "<rect{class_attr} x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
                    escape_xml(&paint.fill),
                    paint.opacity,
                    escape_xml(&paint.stroke)
                );
                match hatch {
                    // hatch lines overlay the fill, grouped so the box keeps one class
                    Some(id) => {
                        svg.push_str(&format!("<g class=\"{class}\">{body}"));
                        svg.push_str(&format!(
                            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" fill=\"url(#{id})\" fill-opacity=\"{}\" stroke=\"none\"/></g>",
                            paint.opacity
                        ));
                    }
                    None => svg.push_str(&body),
                }
            }
            Element::Marker {
                at,
                glyph,
                color,
                size,
                ..
            } => {
                svg.push_str(&marker_svg(frame.to_px(*at), *glyph, color, *size, class));
            }
            Element::Text { at, text, style, .. } => {
                let (x, y) = frame.to_px(*at);
                svg.push_str(&text_svg(x, y, text, style, class, &theme.font_family));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

/// One hatch pattern per distinct stroke colour, keyed by colour.
fn hatch_patterns(figure: &Figure) -> BTreeMap<String, String> {
    let mut patterns = BTreeMap::new();
    for element in &figure.elements {
        if let Element::Rect { paint, .. } = element
            && paint.hatch.is_some()
            && !patterns.contains_key(&paint.stroke)
        {
            let id = format!("hatch-{}", patterns.len());
            patterns.insert(paint.stroke.clone(), id);
        }
    }
    patterns
}

fn hatch_id<'a>(
    patterns: &'a BTreeMap<String, String>,
    hatch: Hatch,
    color: &str,
) -> Option<&'a String> {
    match hatch {
        Hatch::Diagonal => patterns.get(color),
    }
}

fn marker_svg((x, y): (f32, f32), glyph: Glyph, color: &str, size: f32, class: &str) -> String {
    let color = escape_xml(color);
    match glyph {
        Glyph::Circle => format!(
            "<circle class=\"{class}\" cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{:.2}\" fill=\"{color}\"/>",
            size / 2.0
        ),
        Glyph::Cross => {
            let half = size / 2.0;
            format!(
                "<path class=\"{class}\" d=\"M {:.2} {y:.2} L {:.2} {y:.2} M {x:.2} {:.2} L {x:.2} {:.2}\" stroke=\"{color}\" stroke-width=\"1.5\" fill=\"none\"/>",
                x - half,
                x + half,
                y - half,
                y + half
            )
        }
    }
}

fn text_svg(x: f32, y: f32, text: &str, style: &TextStyle, class: &str, font_family: &str) -> String {
    let anchor = match style.anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    };
    let mut out = String::new();
    let _ = write!(
        out,
        "<text class=\"{class}\" x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{anchor}\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\"",
        escape_xml(font_family),
        style.font_size,
        escape_xml(&style.color)
    );
    if style.bold {
        out.push_str(" font-weight=\"bold\"");
    }
    let _ = write!(out, ">{}</text>", escape_xml(text));
    out
}

pub fn write_output_svg(svg: &str, output: &Path) -> Result<()> {
    std::fs::write(output, svg)?;
    log::info!("SVG written to {}", output.display());
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "sans-serif".to_string());
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|err| RenderError::environment(format!("SVG re-parse failed: {err}")))?;
    let scale = effective_scale(render_cfg.scale);
    let size = tree.size().to_int_size().scale_by(scale).ok_or_else(|| {
        RenderError::environment(format!("cannot scale canvas by {scale}"))
    })?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| RenderError::environment("failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    log::info!("PNG written to {}", output.display());
    Ok(())
}

/// Raster scale factor; non-finite or non-positive values render at 1x.
#[cfg_attr(not(feature = "png"), allow(dead_code))]
fn effective_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(
    _svg: &str,
    _output: &Path,
    _render_cfg: &RenderConfig,
    _theme: &Theme,
) -> Result<()> {
    anyhow::bail!("PNG output requires the `png` feature")
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
