use serde::Serialize;

use crate::figure::{Frame, Rect};
use crate::ir::{GateKind, GateMarker, RegionTone};

#[derive(Debug, Clone, Serialize)]
pub struct WireLayout {
    pub index: usize,
    pub y: f32,
    pub x_start: f32,
    pub x_end: f32,
    pub label: String,
}

/// A labeled box sitting on one qubit line.
#[derive(Debug, Clone, Serialize)]
pub struct GateBox {
    pub qubit: usize,
    pub layer: Option<usize>,
    pub rect: Rect,
    pub label: String,
    pub font_size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectorLayout {
    pub layer: usize,
    /// 1 for the even-aligned pass, 2 for the odd-aligned one.
    pub pass: u8,
    pub control: usize,
    pub target: usize,
    pub x: f32,
    pub control_y: f32,
    pub target_y: f32,
    pub y_start: f32,
    pub y_end: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayerLayout {
    pub index: usize,
    pub x: f32,
    pub rotations: Vec<GateBox>,
    pub connectors: Vec<ConnectorLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionKind {
    Banner,
    Region(RegionTone),
    Summary,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptionLayout {
    pub kind: CaptionKind,
    pub text: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CircuitLayout {
    pub qubit_count: usize,
    pub repetition_layers: usize,
    pub title: String,
    pub x_extent: f32,
    pub y_extent: f32,
    pub measurement_x: f32,
    pub frame: Frame,
    pub wires: Vec<WireLayout>,
    pub layers: Vec<LayerLayout>,
    pub measurements: Vec<GateBox>,
    pub captions: Vec<CaptionLayout>,
}

impl CircuitLayout {
    pub fn layer_offsets(&self) -> Vec<f32> {
        self.layers.iter().map(|layer| layer.x).collect()
    }

    pub fn connectors(&self) -> impl Iterator<Item = &ConnectorLayout> {
        self.layers.iter().flat_map(|layer| layer.connectors.iter())
    }

    pub fn connectors_in_pass(&self, pass: u8) -> Vec<&ConnectorLayout> {
        self.connectors().filter(|c| c.pass == pass).collect()
    }

    pub fn rotation_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.rotations.len()).sum()
    }

    /// Every glyph placed on a qubit line, in drawing order.
    pub fn markers(&self) -> Vec<GateMarker> {
        let mut markers = Vec::new();
        for layer in &self.layers {
            for gate in &layer.rotations {
                markers.push(GateMarker {
                    qubit: gate.qubit,
                    x: gate.rect.x,
                    kind: GateKind::RotationBox,
                    layer: Some(layer.index),
                });
            }
            for connector in &layer.connectors {
                markers.push(GateMarker {
                    qubit: connector.control,
                    x: connector.x,
                    kind: GateKind::ControlDot,
                    layer: Some(layer.index),
                });
                markers.push(GateMarker {
                    qubit: connector.target,
                    x: connector.x,
                    kind: GateKind::TargetCross,
                    layer: Some(layer.index),
                });
            }
        }
        for gate in &self.measurements {
            markers.push(GateMarker {
                qubit: gate.qubit,
                x: gate.rect.x,
                kind: GateKind::MeasurementBox,
                layer: None,
            });
        }
        markers
    }
}
