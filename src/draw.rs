use crate::config::LayoutConfig;
use crate::error::RenderError;
use crate::figure::{Anchor, Figure, Glyph, Hatch, Paint, Point, Stroke, Surface, Tag, TextStyle};
use crate::ir::{DiagramSpec, RegionTone};
use crate::layout::{CaptionKind, CircuitLayout, ConnectorLayout, GateBox, compute_layout};
use crate::theme::Theme;

/// Lays out `spec` and paints it into a fresh [`Figure`].
///
/// Fails only on structurally invalid input, before anything is drawn.
pub fn render_circuit(
    spec: &DiagramSpec,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<Figure, RenderError> {
    let layout = compute_layout(spec, theme, config)?;
    let mut figure = Figure::new(layout.frame);
    draw_circuit(&layout, theme, config, &mut figure);
    log::debug!("circuit drawn with {} elements", figure.elements.len());
    Ok(figure)
}

pub fn draw_circuit<S: Surface>(
    layout: &CircuitLayout,
    theme: &Theme,
    config: &LayoutConfig,
    surface: &mut S,
) {
    let config = &config.sanitized();
    surface.set_title(
        &layout.title,
        text_style(theme.title_font_size, &theme.text_color),
    );
    surface.set_limits((0.0, layout.x_extent), (0.0, layout.y_extent));

    for wire in &layout.wires {
        surface.line(
            Point::new(wire.x_start, wire.y),
            Point::new(wire.x_end, wire.y),
            Stroke {
                color: theme.wire_color.clone(),
                width: config.wire_width,
            },
            Tag::QubitLine,
        );
        surface.text(
            Point::new(0.0, wire.y),
            &wire.label,
            TextStyle {
                anchor: Anchor::End,
                ..text_style(theme.label_font_size, &theme.qubit_label_color)
            },
            Tag::QubitLabel,
        );
    }

    for caption in layout
        .captions
        .iter()
        .filter(|c| c.kind != CaptionKind::Summary)
    {
        let (color, tag) = match caption.kind {
            CaptionKind::Banner => (&theme.banner_color, Tag::Banner),
            CaptionKind::Region(RegionTone::Preparation) => {
                (&theme.preparation_color, Tag::RegionLabel)
            }
            CaptionKind::Region(RegionTone::Measurement) => {
                (&theme.measurement_color, Tag::RegionLabel)
            }
            CaptionKind::Region(RegionTone::Neutral) => (&theme.text_color, Tag::RegionLabel),
            CaptionKind::Summary => continue,
        };
        let size = match caption.kind {
            CaptionKind::Banner => theme.label_font_size,
            _ => theme.caption_font_size,
        };
        surface.text(
            Point::new(caption.x, caption.y),
            &caption.text,
            text_style(size, color),
            tag,
        );
    }

    for layer in &layout.layers {
        for gate in &layer.rotations {
            draw_gate_box(
                surface,
                gate,
                Paint {
                    fill: theme.rotation_fill.clone(),
                    stroke: theme.rotation_stroke.clone(),
                    opacity: theme.rotation_opacity,
                    hatch: None,
                },
                &theme.text_color,
                Tag::RotationBox,
                Tag::RotationLabel,
            );
        }
        for connector in &layer.connectors {
            let color = match connector.pass {
                1 => &theme.pass_one_color,
                _ => &theme.pass_two_color,
            };
            draw_connector(surface, connector, color, config);
        }
    }

    for gate in &layout.measurements {
        draw_gate_box(
            surface,
            gate,
            Paint {
                fill: theme.measurement_fill.clone(),
                stroke: theme.measurement_stroke.clone(),
                opacity: theme.measurement_opacity,
                hatch: Some(Hatch::Diagonal),
            },
            &theme.text_color,
            Tag::MeasurementBox,
            Tag::MeasurementLabel,
        );
    }

    for caption in layout
        .captions
        .iter()
        .filter(|c| c.kind == CaptionKind::Summary)
    {
        surface.text(
            Point::new(caption.x, caption.y),
            &caption.text,
            TextStyle {
                bold: true,
                ..text_style(theme.caption_font_size, &theme.measurement_color)
            },
            Tag::SummaryLabel,
        );
    }
}

fn draw_gate_box<S: Surface>(
    surface: &mut S,
    gate: &GateBox,
    paint: Paint,
    text_color: &str,
    box_tag: Tag,
    label_tag: Tag,
) {
    surface.rect(gate.rect, paint, box_tag);
    surface.text(
        gate.rect.center(),
        &gate.label,
        text_style(gate.font_size, text_color),
        label_tag,
    );
}

fn draw_connector<S: Surface>(
    surface: &mut S,
    connector: &ConnectorLayout,
    color: &str,
    config: &LayoutConfig,
) {
    surface.line(
        Point::new(connector.x, connector.y_start),
        Point::new(connector.x, connector.y_end),
        Stroke {
            color: color.to_string(),
            width: config.connector_width,
        },
        Tag::Connector,
    );
    surface.marker(
        Point::new(connector.x, connector.control_y),
        Glyph::Circle,
        color,
        config.control_dot_size,
        Tag::ControlDot,
    );
    surface.marker(
        Point::new(connector.x, connector.target_y),
        Glyph::Cross,
        color,
        config.target_cross_size,
        Tag::TargetCross,
    );
}

fn text_style(font_size: f32, color: &str) -> TextStyle {
    TextStyle {
        font_size,
        color: color.to_string(),
        anchor: Anchor::Middle,
        bold: false,
    }
}
