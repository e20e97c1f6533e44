use serde::{Deserialize, Serialize};

use crate::error::{InputError, RenderError};

pub const CANONICAL_QUBITS: usize = 8;
pub const CANONICAL_LAYERS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum RegionTone {
    Preparation,
    Measurement,
    #[default]
    Neutral,
}

/// A caption placed at a fixed position in diagram units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub tone: RegionTone,
}

impl RegionLabel {
    pub fn new(text: impl Into<String>, x: f32, y: f32, tone: RegionTone) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramSpec {
    pub qubit_count: usize,
    pub repetition_layers: usize,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub labeled_regions: Vec<RegionLabel>,
}

impl DiagramSpec {
    pub fn new(qubit_count: usize, repetition_layers: usize) -> Self {
        Self {
            qubit_count,
            repetition_layers,
            ..Self::canonical()
        }
    }

    /// The 8-qubit, 3-layer presentation layout.
    pub fn canonical() -> Self {
        Self {
            qubit_count: CANONICAL_QUBITS,
            repetition_layers: CANONICAL_LAYERS,
            canvas_width: 1200.0,
            canvas_height: 800.0,
            labeled_regions: default_regions(),
        }
    }

    /// Builds a spec from signed counts, rejecting values no layout can use.
    pub fn from_counts(qubit_count: i64, repetition_layers: i64) -> Result<Self, RenderError> {
        let qubits = checked_qubits(qubit_count)?;
        let layers = checked_layers(repetition_layers)?;
        Ok(Self::new(qubits, layers))
    }

    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn with_regions(mut self, regions: Vec<RegionLabel>) -> Self {
        self.labeled_regions = regions;
        self
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.qubit_count < 1 {
            return Err(InputError::QubitCountBelowOne(self.qubit_count as i64).into());
        }
        Ok(())
    }

    pub fn from_json5(input: &str) -> anyhow::Result<Self> {
        let parsed: DiagramSpecFile = json5::from_str(input)?;
        Ok(parsed.into_spec()?)
    }
}

impl Default for DiagramSpec {
    fn default() -> Self {
        Self::canonical()
    }
}

fn default_regions() -> Vec<RegionLabel> {
    vec![
        RegionLabel::new("VQE STATE PREPARATION", 2.0, 0.5, RegionTone::Preparation),
        RegionLabel::new(
            "QSE MEASUREMENT & DIAGONALIZATION",
            17.0,
            0.5,
            RegionTone::Measurement,
        ),
    ]
}

fn checked_qubits(value: i64) -> Result<usize, InputError> {
    if value < 1 {
        return Err(InputError::QubitCountBelowOne(value));
    }
    Ok(value as usize)
}

fn checked_layers(value: i64) -> Result<usize, InputError> {
    if value < 0 {
        return Err(InputError::NegativeRepetitionLayers(value));
    }
    Ok(value as usize)
}

/// On-disk form of a [`DiagramSpec`]. Counts stay signed until validated.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiagramSpecFile {
    qubit_count: Option<i64>,
    repetition_layers: Option<i64>,
    canvas_width: Option<f32>,
    canvas_height: Option<f32>,
    labeled_regions: Option<Vec<RegionLabel>>,
}

impl DiagramSpecFile {
    pub fn into_spec(self) -> Result<DiagramSpec, RenderError> {
        let base = DiagramSpec::canonical();
        let qubits = self
            .qubit_count
            .unwrap_or(base.qubit_count as i64);
        let layers = self
            .repetition_layers
            .unwrap_or(base.repetition_layers as i64);
        let mut spec = DiagramSpec::from_counts(qubits, layers)?;
        if let Some(width) = self.canvas_width {
            spec.canvas_width = width;
        }
        if let Some(height) = self.canvas_height {
            spec.canvas_height = height;
        }
        if let Some(regions) = self.labeled_regions {
            spec.labeled_regions = regions;
        }
        Ok(spec)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GateKind {
    RotationBox,
    ControlDot,
    TargetCross,
    MeasurementBox,
}

/// One glyph on a qubit line. `layer` is `None` for the terminal block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GateMarker {
    pub qubit: usize,
    pub x: f32,
    pub kind: GateKind,
    pub layer: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_spec_matches_presentation_layout() {
        let spec = DiagramSpec::canonical();
        assert_eq!(spec.qubit_count, 8);
        assert_eq!(spec.repetition_layers, 3);
        assert_eq!(spec.labeled_regions.len(), 2);
        assert_eq!(spec.labeled_regions[0].tone, RegionTone::Preparation);
        assert_eq!(spec.labeled_regions[1].tone, RegionTone::Measurement);
    }

    #[test]
    fn from_counts_rejects_zero_qubits() {
        let err = DiagramSpec::from_counts(0, 3).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidLayoutInput(InputError::QubitCountBelowOne(0))
        ));
    }

    #[test]
    fn from_counts_rejects_negative_layers() {
        let err = DiagramSpec::from_counts(4, -1).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidLayoutInput(InputError::NegativeRepetitionLayers(-1))
        ));
    }

    #[test]
    fn validate_rejects_hand_built_empty_spec() {
        let spec = DiagramSpec {
            qubit_count: 0,
            ..DiagramSpec::canonical()
        };
        assert!(spec.validate().unwrap_err().is_invalid_input());
    }

    #[test]
    fn json5_spec_fills_missing_fields_from_canonical() {
        let spec = DiagramSpec::from_json5(
            r#"{
                // trailing commas and comments are fine
                qubitCount: 4,
                labeledRegions: [{ text: "prep", x: 1.5, y: 0.5, tone: "preparation" }],
            }"#,
        )
        .unwrap();
        assert_eq!(spec.qubit_count, 4);
        assert_eq!(spec.repetition_layers, 3);
        assert_eq!(spec.canvas_width, 1200.0);
        assert_eq!(spec.labeled_regions.len(), 1);
        assert_eq!(spec.labeled_regions[0].tone, RegionTone::Preparation);
    }

    #[test]
    fn json5_spec_reports_negative_layers_as_invalid_input() {
        let err = DiagramSpec::from_json5("{ repetitionLayers: -2 }").unwrap_err();
        let render_err = err.downcast_ref::<RenderError>().unwrap();
        assert!(render_err.is_invalid_input());
    }
}
