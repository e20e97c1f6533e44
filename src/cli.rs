use crate::config::{EntanglementPattern, load_config};
use crate::draw::draw_circuit;
use crate::figure::Figure;
use crate::ir::DiagramSpec;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::report::EnergyReport;
use crate::theme::Theme;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "ansatz",
    version,
    about = "Prints the VQE/QSE energy narrative and renders the ansatz circuit layout"
)]
pub struct Args {
    /// Config file (JSON or JSON5) with theme, layout and energy overrides
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Diagram spec file (JSON5): qubitCount, repetitionLayers, canvas, regions
    #[arg(short = 's', long = "spec")]
    pub spec: Option<PathBuf>,

    /// Number of qubit lines
    #[arg(short = 'q', long = "qubits", allow_negative_numbers = true)]
    pub qubits: Option<i64>,

    /// Number of repetition layers
    #[arg(short = 'l', long = "layers", allow_negative_numbers = true)]
    pub layers: Option<i64>,

    /// Output file. Defaults to ansatz-circuit.<format> in the working directory.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Canvas width in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height in pixels
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Theme preset (classic, modern)
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Entanglement pattern drawn in each layer
    #[arg(long = "entanglement", value_enum)]
    pub entanglement: Option<Entanglement>,

    /// Write the computed layout geometry as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Skip the energy report
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entanglement {
    Brickwork,
    Ladder,
}

impl From<Entanglement> for EntanglementPattern {
    fn from(value: Entanglement) -> Self {
        match value {
            Entanglement::Brickwork => EntanglementPattern::Brickwork,
            Entanglement::Ladder => EntanglementPattern::Ladder,
        }
    }
}

pub fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(name) = args.theme.as_deref() {
        config.theme =
            Theme::by_name(name).ok_or_else(|| anyhow::anyhow!("Unknown theme: {name}"))?;
    }
    if let Some(pattern) = args.entanglement {
        config.layout.entanglement = pattern.into();
    }

    let spec = build_spec(args)?;
    log::info!(
        "rendering {} qubits x {} layers",
        spec.qubit_count,
        spec.repetition_layers
    );

    if !args.no_report {
        let report = EnergyReport::compute(spec.qubit_count, &config.energies);
        println!("{report}");
    }

    let layout = compute_layout(&spec, &config.theme, &config.layout)?;
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
    }
    let mut figure = Figure::new(layout.frame);
    draw_circuit(&layout, &config.theme, &config.layout, &mut figure);
    let svg = render_svg(&figure, &config.theme);

    let output = resolve_output(args.output.as_deref(), args.output_format);
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, &output)?,
        OutputFormat::Png => write_output_png(&svg, &output, &config.render, &config.theme)?,
    }
    println!(
        "  > Circuit drawing generated and written to {} with symbolic gates.",
        output.display()
    );
    Ok(())
}

fn build_spec(args: &Args) -> Result<DiagramSpec> {
    let mut spec = match args.spec.as_deref() {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading spec file {}", path.display()))?;
            DiagramSpec::from_json5(&contents)?
        }
        None => DiagramSpec::canonical(),
    };

    if args.qubits.is_some() || args.layers.is_some() {
        let qubits = args.qubits.unwrap_or(spec.qubit_count as i64);
        let layers = args.layers.unwrap_or(spec.repetition_layers as i64);
        let counted = DiagramSpec::from_counts(qubits, layers)?;
        spec.qubit_count = counted.qubit_count;
        spec.repetition_layers = counted.repetition_layers;
    }
    if let Some(width) = args.width {
        spec.canvas_width = width;
    }
    if let Some(height) = args.height {
        spec.canvas_height = height;
    }
    Ok(spec)
}

fn resolve_output(output: Option<&Path>, format: OutputFormat) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!("ansatz-circuit.{}", format.extension())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["ansatz"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_build_canonical_spec() {
        let spec = build_spec(&args(&[])).unwrap();
        assert_eq!(spec, DiagramSpec::canonical());
    }

    #[test]
    fn count_flags_override_canonical_values() {
        let spec = build_spec(&args(&["-q", "3", "-l", "0", "-w", "900"])).unwrap();
        assert_eq!(spec.qubit_count, 3);
        assert_eq!(spec.repetition_layers, 0);
        assert_eq!(spec.canvas_width, 900.0);
        assert_eq!(spec.canvas_height, 800.0);
    }

    #[test]
    fn negative_layers_are_invalid_input() {
        let err = build_spec(&args(&["--layers", "-1"])).unwrap_err();
        let render_err = err.downcast_ref::<RenderError>().unwrap();
        assert!(render_err.is_invalid_input());
    }

    #[test]
    fn zero_qubits_are_invalid_input() {
        let err = build_spec(&args(&["--qubits", "0"])).unwrap_err();
        assert!(err.downcast_ref::<RenderError>().unwrap().is_invalid_input());
    }

    #[test]
    fn output_defaults_follow_format() {
        assert_eq!(
            resolve_output(None, OutputFormat::Png),
            PathBuf::from("ansatz-circuit.png")
        );
        assert_eq!(
            resolve_output(Some(Path::new("out/c.svg")), OutputFormat::Svg),
            PathBuf::from("out/c.svg")
        );
    }

    #[test]
    fn entanglement_flag_maps_to_pattern() {
        let parsed = args(&["--entanglement", "ladder"]);
        assert_eq!(
            parsed.entanglement.map(EntanglementPattern::from),
            Some(EntanglementPattern::Ladder)
        );
    }

    #[test]
    fn oversized_counts_return_an_error() {
        let parsed = args(&["-l", "9223372036854775807", "--no-report"]);
        let err = run(&parsed).unwrap_err();
        let render_err = err.downcast_ref::<RenderError>().unwrap();
        assert!(matches!(render_err, RenderError::EnvironmentFailure(_)));
    }

    #[test]
    fn run_writes_svg_and_layout_dump() {
        let dir = std::env::temp_dir().join(format!("ansatz-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let svg_path = dir.join("circuit.svg");
        let dump_path = dir.join("layout.json");
        let parsed = args(&[
            "-q",
            "4",
            "-l",
            "2",
            "--no-report",
            "-o",
            svg_path.to_str().unwrap(),
            "--dumpLayout",
            dump_path.to_str().unwrap(),
        ]);
        run(&parsed).unwrap();

        let svg = std::fs::read_to_string(&svg_path).unwrap();
        assert_eq!(svg.matches("class=\"rotation-box\"").count(), 8);
        let dump: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&dump_path).unwrap()).unwrap();
        assert_eq!(dump["qubit_count"], 4);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
