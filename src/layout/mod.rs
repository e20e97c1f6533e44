mod text;
mod types;

pub use types::*;

use crate::config::{EntanglementPattern, LayoutConfig};
use crate::error::RenderError;
use crate::figure::{Frame, Rect, sanitize_canvas};
use crate::ir::{DiagramSpec, RegionTone};
use crate::theme::Theme;

use text::{fit_font_size, subscript};

/// Padding kept between a gate label and its box edges, in pixels.
const GATE_LABEL_PADDING: f32 = 2.0;

/// The banner sits half a unit left of the horizontal centre.
const BANNER_LEFT_SHIFT: f32 = 0.5;

pub fn compute_layout(
    spec: &DiagramSpec,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<CircuitLayout, RenderError> {
    spec.validate()?;
    let config = &config.sanitized();
    check_element_budget(spec, config)?;

    let qubits = spec.qubit_count;
    let offsets = layer_offsets(spec.repetition_layers, config);
    let reach = layer_reach(config);
    let measurement_x = match offsets.last() {
        Some(last) => config
            .measurement_x
            .max(last + reach + config.measurement_gap.max(0.0)),
        None => config.measurement_x,
    };
    let x_extent =
        measurement_x + config.measurement_width.max(0.0) + config.right_margin.max(0.0);
    let y_extent = qubits as f32 + 1.0;

    let frame = Frame {
        canvas_width: sanitize_canvas(spec.canvas_width),
        canvas_height: sanitize_canvas(spec.canvas_height),
        margin_left: config.frame_margin_left.max(0.0),
        margin_right: config.frame_margin_right.max(0.0),
        margin_top: config.frame_margin_top.max(0.0),
        margin_bottom: config.frame_margin_bottom.max(0.0),
        x_limits: (0.0, x_extent),
        y_limits: (0.0, y_extent),
    };

    let wires = (0..qubits)
        .map(|index| WireLayout {
            index,
            y: wire_y(index),
            x_start: config.wire_inset,
            x_end: x_extent - config.wire_inset,
            label: format!("q{}", subscript(index)),
        })
        .collect();

    let fitter = LabelFitter {
        theme,
        config,
        scale_x: frame.scale_x(),
    };

    let layers = offsets
        .iter()
        .enumerate()
        .map(|(k, &x)| layout_layer(k, x, qubits, config, &fitter))
        .collect();

    let observable = config.observable_label.as_str();
    let measurement_font = fitter.fit(observable, config.measurement_width);
    let measurements = (0..qubits)
        .map(|qubit| GateBox {
            qubit,
            layer: None,
            rect: centered_box(
                measurement_x,
                wire_y(qubit),
                config.measurement_width,
                config.measurement_height,
            ),
            label: observable.to_string(),
            font_size: measurement_font,
        })
        .collect();

    let captions = layout_captions(spec, config, measurement_x, x_extent);

    log::debug!(
        "circuit layout: {qubits} qubits, {} layers, x extent {x_extent:.2}",
        offsets.len()
    );

    Ok(CircuitLayout {
        qubit_count: qubits,
        repetition_layers: spec.repetition_layers,
        title: format!(
            "{} ({} Qubits, {} Repetitions)",
            config.title_prefix, qubits, spec.repetition_layers
        ),
        x_extent,
        y_extent,
        measurement_x,
        frame,
        wires,
        layers,
        measurements,
        captions,
    })
}

/// Rejects counts whose glyph grid would exceed `max_layout_elements`.
fn check_element_budget(spec: &DiagramSpec, config: &LayoutConfig) -> Result<(), RenderError> {
    let columns = spec.repetition_layers.checked_add(1);
    let elements = columns.and_then(|columns| spec.qubit_count.checked_mul(columns));
    match elements {
        Some(elements) if elements <= config.max_layout_elements => Ok(()),
        _ => Err(RenderError::environment(format!(
            "{} qubits x {} layers exceeds the layout budget of {} elements",
            spec.qubit_count, spec.repetition_layers, config.max_layout_elements
        ))),
    }
}

/// Qubit `i` sits at `y = i + 1`.
pub fn wire_y(index: usize) -> f32 {
    index as f32 + 1.0
}

/// X offset of every layer.
///
/// Configured offsets are used as given while they last; further layers
/// continue at `layer_pitch`. Each offset is then pushed right until it
/// clears the previous layer's footprint.
pub fn layer_offsets(layers: usize, config: &LayoutConfig) -> Vec<f32> {
    let footprint = layer_reach(config) + config.connector_clearance.max(0.0);
    let pitch = config.layer_pitch.max(footprint);
    let mut offsets: Vec<f32> = Vec::new();
    for k in 0..layers {
        let requested = match config.layer_offsets.get(k) {
            Some(x) if x.is_finite() => *x,
            _ => match offsets.last() {
                Some(prev) => prev + pitch,
                None => config.wire_inset + config.connector_clearance.max(0.0),
            },
        };
        let x = match offsets.last() {
            Some(prev) => requested.max(prev + footprint),
            None => requested,
        };
        offsets.push(x);
    }
    offsets
}

/// Horizontal distance from a layer's offset to its rightmost glyph.
pub fn layer_reach(config: &LayoutConfig) -> f32 {
    let last_pass = match config.entanglement {
        EntanglementPattern::Brickwork => config.pass_one_offset + config.pass_two_offset,
        EntanglementPattern::Ladder => config.pass_one_offset,
    };
    config.rotation_width.max(last_pass).max(0.0)
}

/// Adjacent qubit pairs linked by one entanglement pass.
///
/// Brickwork pass 1 yields `(0,1),(2,3),...` and pass 2 `(1,2),(3,4),...`.
/// Ladder mode has a single pass over every adjacent pair.
pub fn entangling_pairs(
    qubits: usize,
    pattern: EntanglementPattern,
    pass: u8,
) -> Vec<(usize, usize)> {
    let last = qubits.saturating_sub(1);
    match (pattern, pass) {
        (EntanglementPattern::Brickwork, 1) => (0..last).step_by(2).map(|i| (i, i + 1)).collect(),
        (EntanglementPattern::Brickwork, 2) => (1..last).step_by(2).map(|i| (i, i + 1)).collect(),
        (EntanglementPattern::Ladder, 1) => (0..last).map(|i| (i, i + 1)).collect(),
        _ => Vec::new(),
    }
}

fn passes(pattern: EntanglementPattern) -> &'static [u8] {
    match pattern {
        EntanglementPattern::Brickwork => &[1, 2],
        EntanglementPattern::Ladder => &[1],
    }
}

fn layout_layer(
    index: usize,
    x: f32,
    qubits: usize,
    config: &LayoutConfig,
    fitter: &LabelFitter<'_>,
) -> LayerLayout {
    let label = format!("{}(θ{})", config.rotation_label, subscript(index));
    let font_size = fitter.fit(&label, config.rotation_width);
    let rotations = (0..qubits)
        .map(|qubit| GateBox {
            qubit,
            layer: Some(index),
            rect: Rect::new(
                x,
                wire_y(qubit) - config.rotation_height / 2.0,
                config.rotation_width,
                config.rotation_height,
            ),
            label: label.clone(),
            font_size,
        })
        .collect();

    let mut connectors = Vec::new();
    for &pass in passes(config.entanglement) {
        let pass_x = match pass {
            1 => x + config.pass_one_offset,
            _ => x + config.pass_one_offset + config.pass_two_offset,
        };
        for (control, target) in entangling_pairs(qubits, config.entanglement, pass) {
            let control_y = wire_y(control);
            let target_y = wire_y(target);
            connectors.push(ConnectorLayout {
                layer: index,
                pass,
                control,
                target,
                x: pass_x,
                control_y,
                target_y,
                y_start: control_y + config.connector_inset,
                y_end: target_y - config.connector_inset,
            });
        }
    }

    LayerLayout {
        index,
        x,
        rotations,
        connectors,
    }
}

fn layout_captions(
    spec: &DiagramSpec,
    config: &LayoutConfig,
    measurement_x: f32,
    x_extent: f32,
) -> Vec<CaptionLayout> {
    let mut captions = vec![CaptionLayout {
        kind: CaptionKind::Banner,
        text: config.banner_text.clone(),
        x: x_extent / 2.0 - BANNER_LEFT_SHIFT,
        y: spec.qubit_count as f32 + config.banner_offset,
    }];

    // Measurement captions follow the block when crowded layers push it right.
    let measurement_shift = measurement_x - config.measurement_x;
    captions.extend(spec.labeled_regions.iter().map(|region| {
        let x = match region.tone {
            RegionTone::Measurement => region.x + measurement_shift,
            _ => region.x,
        };
        CaptionLayout {
            kind: CaptionKind::Region(region.tone),
            text: region.text.clone(),
            x,
            y: region.y,
        }
    }));

    captions.push(CaptionLayout {
        kind: CaptionKind::Summary,
        text: config.summary_text.clone(),
        x: measurement_x + config.measurement_width / 2.0,
        y: wire_y(0) + config.summary_offset,
    });
    captions
}

fn centered_box(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::new(x, y - height / 2.0, width, height)
}

struct LabelFitter<'a> {
    theme: &'a Theme,
    config: &'a LayoutConfig,
    scale_x: f32,
}

impl LabelFitter<'_> {
    fn fit(&self, label: &str, box_width: f32) -> f32 {
        let available = box_width * self.scale_x - 2.0 * GATE_LABEL_PADDING;
        fit_font_size(
            label,
            self.theme.gate_font_size,
            self.config.min_gate_font_size,
            available,
            &self.theme.font_family,
            self.config.fast_text_metrics,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::ir::RegionLabel;
    use float_cmp::approx_eq;

    fn fast_config() -> LayoutConfig {
        LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        }
    }

    fn layout(qubits: usize, layers: usize) -> CircuitLayout {
        compute_layout(
            &DiagramSpec::new(qubits, layers),
            &Theme::classic(),
            &fast_config(),
        )
        .unwrap()
    }

    #[test]
    fn canonical_layout_reproduces_presentation_geometry() {
        let layout = layout(8, 3);
        assert_eq!(layout.layer_offsets(), vec![1.0, 4.5, 9.0]);
        assert!(approx_eq!(f32, layout.measurement_x, 17.5));
        assert!(approx_eq!(f32, layout.x_extent, 20.0));
        assert!(approx_eq!(f32, layout.y_extent, 9.0));
        assert!(approx_eq!(f32, layout.wires[0].x_start, 0.5));
        assert!(approx_eq!(f32, layout.wires[0].x_end, 19.5));
        assert_eq!(
            layout.title,
            "VQE UCCSD Ansatz Architecture (8 Qubits, 3 Repetitions)"
        );
    }

    #[test]
    fn canonical_layout_counts() {
        let layout = layout(8, 3);
        assert_eq!(layout.wires.len(), 8);
        assert_eq!(layout.rotation_count(), 24);
        assert_eq!(layout.connectors_in_pass(1).len(), 12);
        assert_eq!(layout.connectors_in_pass(2).len(), 9);
        assert_eq!(layout.measurements.len(), 8);
    }

    #[test]
    fn connector_positions_follow_layer_offset() {
        let layout = layout(8, 3);
        let layer = &layout.layers[1];
        assert!(layer.connectors.iter().filter(|c| c.pass == 1).all(|c| c.x == 6.0));
        assert!(layer.connectors.iter().filter(|c| c.pass == 2).all(|c| c.x == 7.0));
    }

    #[test]
    fn connector_endpoints_are_inset_from_markers() {
        let layout = layout(4, 1);
        for connector in layout.connectors() {
            assert!(approx_eq!(f32, connector.y_start, connector.control_y + 0.25));
            assert!(approx_eq!(f32, connector.y_end, connector.target_y - 0.25));
            assert_eq!(connector.target, connector.control + 1);
        }
    }

    #[test]
    fn brickwork_pairs_stay_in_range() {
        let pass_one = entangling_pairs(5, EntanglementPattern::Brickwork, 1);
        let pass_two = entangling_pairs(5, EntanglementPattern::Brickwork, 2);
        assert_eq!(pass_one, vec![(0, 1), (2, 3)]);
        assert_eq!(pass_two, vec![(1, 2), (3, 4)]);
        assert!(entangling_pairs(1, EntanglementPattern::Brickwork, 1).is_empty());
        assert!(entangling_pairs(2, EntanglementPattern::Brickwork, 2).is_empty());
    }

    #[test]
    fn ladder_links_every_adjacent_pair() {
        let pairs = entangling_pairs(4, EntanglementPattern::Ladder, 1);
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
        assert!(entangling_pairs(4, EntanglementPattern::Ladder, 2).is_empty());

        let config = LayoutConfig {
            entanglement: EntanglementPattern::Ladder,
            ..fast_config()
        };
        let layout =
            compute_layout(&DiagramSpec::new(6, 2), &Theme::classic(), &config).unwrap();
        assert_eq!(layout.connectors().count(), 5 * 2);
        assert!(layout.connectors().all(|c| c.pass == 1));
    }

    #[test]
    fn single_qubit_has_no_connectors() {
        for layers in [0, 1, 3, 7] {
            let layout = layout(1, layers);
            assert_eq!(layout.connectors().count(), 0);
            assert_eq!(layout.rotation_count(), layers);
        }
    }

    #[test]
    fn zero_layers_keeps_wires_and_measurements() {
        let layout = layout(3, 0);
        assert!(layout.layers.is_empty());
        assert_eq!(layout.wires.len(), 3);
        assert_eq!(layout.measurements.len(), 3);
        assert!(approx_eq!(f32, layout.measurement_x, 17.5));
    }

    #[test]
    fn extra_layers_continue_at_fixed_pitch() {
        let offsets = layer_offsets(6, &LayoutConfig::default());
        assert_eq!(offsets, vec![1.0, 4.5, 9.0, 13.5, 18.0, 22.5]);
    }

    #[test]
    fn offsets_never_overlap_even_when_configured_badly() {
        let config = LayoutConfig {
            layer_offsets: vec![5.0, 5.0, 2.0, f32::NAN],
            ..LayoutConfig::default()
        };
        let offsets = layer_offsets(5, &config);
        let footprint = layer_reach(&config) + config.connector_clearance;
        for pair in offsets.windows(2) {
            assert!(pair[1] >= pair[0] + footprint - 1e-4, "{offsets:?}");
        }
    }

    #[test]
    fn crowded_layers_push_measurement_block_right() {
        let layout = layout(4, 6);
        let last_layer = *layout.layer_offsets().last().unwrap();
        assert!(layout.measurement_x >= last_layer + 2.5 + 1.0);
        assert!(layout.x_extent > 20.0);
        let measurement_caption = layout
            .captions
            .iter()
            .find(|c| c.kind == CaptionKind::Region(RegionTone::Measurement))
            .unwrap();
        assert!(approx_eq!(
            f32,
            measurement_caption.x,
            17.0 + (layout.measurement_x - 17.5)
        ));
    }

    #[test]
    fn captions_include_banner_regions_and_summary() {
        let spec = DiagramSpec::new(2, 1).with_regions(vec![RegionLabel::new(
            "custom",
            3.0,
            0.25,
            RegionTone::Neutral,
        )]);
        let layout = compute_layout(&spec, &Theme::classic(), &fast_config()).unwrap();
        let kinds: Vec<CaptionKind> = layout.captions.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CaptionKind::Banner,
                CaptionKind::Region(RegionTone::Neutral),
                CaptionKind::Summary
            ]
        );
        let banner = &layout.captions[0];
        assert!(approx_eq!(f32, banner.x, 9.5));
        assert!(approx_eq!(f32, banner.y, 2.7));
        let summary = &layout.captions[2];
        assert!(approx_eq!(f32, summary.x, 18.25));
        assert!(approx_eq!(f32, summary.y, 1.5));
    }

    #[test]
    fn extreme_counts_fail_without_allocating() {
        let theme = Theme::classic();
        let config = fast_config();
        for (qubits, layers) in [(4, i64::MAX), (i64::MAX, 0), (i64::MAX, i64::MAX)] {
            let spec = DiagramSpec::from_counts(qubits, layers).unwrap();
            let err = compute_layout(&spec, &theme, &config).unwrap_err();
            assert!(matches!(err, RenderError::EnvironmentFailure(_)), "{qubits} x {layers}");
        }
    }

    #[test]
    fn element_budget_is_configurable() {
        let config = LayoutConfig {
            max_layout_elements: 12,
            ..fast_config()
        };
        let theme = Theme::classic();
        assert!(compute_layout(&DiagramSpec::new(4, 2), &theme, &config).is_ok());
        assert!(compute_layout(&DiagramSpec::new(4, 3), &theme, &config).is_err());
    }

    #[test]
    fn non_finite_knobs_fall_back_to_defaults() {
        let config = LayoutConfig {
            measurement_x: f32::NAN,
            measurement_width: f32::INFINITY,
            right_margin: f32::NAN,
            ..fast_config()
        };
        let layout = compute_layout(&DiagramSpec::new(3, 0), &Theme::classic(), &config).unwrap();
        assert!(approx_eq!(f32, layout.measurement_x, 17.5));
        assert!(approx_eq!(f32, layout.x_extent, 20.0));
        let (x, y) = layout.frame.to_px(crate::figure::Point::new(layout.measurement_x, 1.0));
        assert!(x.is_finite() && y.is_finite());
    }

    #[test]
    fn labels_use_subscript_indices() {
        let layout = layout(11, 2);
        assert_eq!(layout.wires[10].label, "q₁₀");
        assert_eq!(layout.layers[1].rotations[0].label, "RY(θ₁)");
        assert_eq!(layout.measurements[0].label, "Obs (Ô)");
    }

    #[test]
    fn zero_qubits_is_rejected() {
        let spec = DiagramSpec {
            qubit_count: 0,
            ..DiagramSpec::canonical()
        };
        let err = compute_layout(&spec, &Theme::classic(), &fast_config()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidLayoutInput(InputError::QubitCountBelowOne(0))
        ));
    }

    #[test]
    fn degenerate_canvas_is_clamped() {
        let spec = DiagramSpec::new(2, 1).with_canvas(f32::INFINITY, -10.0);
        let layout = compute_layout(&spec, &Theme::classic(), &fast_config()).unwrap();
        assert_eq!(layout.frame.canvas_width, 200.0);
        assert_eq!(layout.frame.canvas_height, 200.0);
    }

    #[test]
    fn markers_flatten_in_drawing_order() {
        let layout = layout(2, 1);
        let markers = layout.markers();
        // 2 rotations, 1 connector (dot + cross), 2 measurements
        assert_eq!(markers.len(), 6);
        assert_eq!(markers[0].kind, crate::ir::GateKind::RotationBox);
        assert_eq!(markers[5].kind, crate::ir::GateKind::MeasurementBox);
        assert_eq!(markers[5].layer, None);
    }
}
