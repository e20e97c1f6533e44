use crate::ir::GateMarker;
use crate::layout::{CaptionLayout, CircuitLayout, ConnectorLayout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub title: String,
    pub qubit_count: usize,
    pub repetition_layers: usize,
    pub x_extent: f32,
    pub y_extent: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub layer_offsets: Vec<f32>,
    pub measurement_x: f32,
    pub wires: Vec<WireDump>,
    pub markers: Vec<GateMarker>,
    pub connectors: Vec<ConnectorLayout>,
    pub captions: Vec<CaptionLayout>,
}

#[derive(Debug, Serialize)]
pub struct WireDump {
    pub index: usize,
    pub label: String,
    pub y: f32,
    pub points: [[f32; 2]; 2],
}

impl LayoutDump {
    pub fn from_layout(layout: &CircuitLayout) -> Self {
        let wires = layout
            .wires
            .iter()
            .map(|wire| WireDump {
                index: wire.index,
                label: wire.label.clone(),
                y: wire.y,
                points: [[wire.x_start, wire.y], [wire.x_end, wire.y]],
            })
            .collect();

        LayoutDump {
            title: layout.title.clone(),
            qubit_count: layout.qubit_count,
            repetition_layers: layout.repetition_layers,
            x_extent: layout.x_extent,
            y_extent: layout.y_extent,
            canvas_width: layout.frame.canvas_width,
            canvas_height: layout.frame.canvas_height,
            layer_offsets: layout.layer_offsets(),
            measurement_x: layout.measurement_x,
            wires,
            markers: layout.markers(),
            connectors: layout.connectors().copied().collect(),
            captions: layout.captions.clone(),
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &CircuitLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    log::info!("layout dump written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::DiagramSpec;
    use crate::layout::compute_layout;
    use crate::theme::Theme;

    #[test]
    fn dump_serializes_canonical_layout() {
        let config = LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        };
        let layout =
            compute_layout(&DiagramSpec::canonical(), &Theme::classic(), &config).unwrap();
        let value = serde_json::to_value(LayoutDump::from_layout(&layout)).unwrap();

        assert_eq!(value["qubit_count"], 8);
        assert_eq!(value["wires"].as_array().unwrap().len(), 8);
        assert_eq!(value["connectors"].as_array().unwrap().len(), 21);
        assert_eq!(value["layer_offsets"], serde_json::json!([1.0, 4.5, 9.0]));
        let markers = value["markers"].as_array().unwrap();
        let boxes = markers
            .iter()
            .filter(|m| m["kind"] == "rotation-box")
            .count();
        assert_eq!(boxes, 24);
        assert_eq!(value["captions"][0]["kind"], "banner");
    }
}
