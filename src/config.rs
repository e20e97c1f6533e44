use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_LAYER_OFFSETS: [f32; 4] = [1.0, 4.5, 9.0, 13.5];

const DEFAULT_MAX_LAYOUT_ELEMENTS: usize = 1_000_000;

const DEFAULT_SAMPLE_TERMS: [&str; 4] = ["IZ", "ZI", "XX", "YY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum EntanglementPattern {
    /// Two staggered passes per layer: even pairs, then odd pairs.
    #[default]
    Brickwork,
    /// One pass per layer linking every adjacent pair.
    Ladder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub layer_offsets: Vec<f32>,
    pub layer_pitch: f32,
    pub rotation_width: f32,
    pub rotation_height: f32,
    pub pass_one_offset: f32,
    pub pass_two_offset: f32,
    pub connector_inset: f32,
    pub connector_clearance: f32,
    pub measurement_x: f32,
    pub measurement_width: f32,
    pub measurement_height: f32,
    pub measurement_gap: f32,
    pub wire_inset: f32,
    pub right_margin: f32,
    pub banner_offset: f32,
    pub summary_offset: f32,
    pub entanglement: EntanglementPattern,
    pub wire_width: f32,
    pub connector_width: f32,
    pub control_dot_size: f32,
    pub target_cross_size: f32,
    pub min_gate_font_size: f32,
    pub fast_text_metrics: bool,
    /// Upper bound on `qubits * (layers + 1)` placed glyph columns.
    pub max_layout_elements: usize,
    pub frame_margin_left: f32,
    pub frame_margin_right: f32,
    pub frame_margin_top: f32,
    pub frame_margin_bottom: f32,
    pub title_prefix: String,
    pub banner_text: String,
    pub summary_text: String,
    pub rotation_label: String,
    pub observable_label: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layer_offsets: DEFAULT_LAYER_OFFSETS.to_vec(),
            layer_pitch: 4.5,
            rotation_width: 1.0,
            rotation_height: 0.5,
            pass_one_offset: 1.5,
            pass_two_offset: 1.0,
            connector_inset: 0.25,
            connector_clearance: 0.5,
            measurement_x: 17.5,
            measurement_width: 1.5,
            measurement_height: 0.5,
            measurement_gap: 1.0,
            wire_inset: 0.5,
            right_margin: 1.0,
            banner_offset: 0.7,
            summary_offset: 0.5,
            entanglement: EntanglementPattern::Brickwork,
            wire_width: 1.0,
            connector_width: 1.5,
            control_dot_size: 4.0,
            target_cross_size: 8.0,
            min_gate_font_size: 4.0,
            fast_text_metrics: false,
            max_layout_elements: DEFAULT_MAX_LAYOUT_ELEMENTS,
            frame_margin_left: 60.0,
            frame_margin_right: 24.0,
            frame_margin_top: 56.0,
            frame_margin_bottom: 24.0,
            title_prefix: "VQE UCCSD Ansatz Architecture".to_string(),
            banner_text: "PHASE 2: HYBRID QUANTUM COMPUTATION (VQE → QSE)".to_string(),
            summary_text: "QSE → H_eff".to_string(),
            rotation_label: "RY".to_string(),
            observable_label: "Obs (Ô)".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Copy with every non-finite geometry knob replaced by its default.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |value: f32, fallback: f32| {
            if value.is_finite() { value } else { fallback }
        };
        Self {
            layer_offsets: self.layer_offsets.clone(),
            layer_pitch: finite_or(self.layer_pitch, defaults.layer_pitch),
            rotation_width: finite_or(self.rotation_width, defaults.rotation_width),
            rotation_height: finite_or(self.rotation_height, defaults.rotation_height),
            pass_one_offset: finite_or(self.pass_one_offset, defaults.pass_one_offset),
            pass_two_offset: finite_or(self.pass_two_offset, defaults.pass_two_offset),
            connector_inset: finite_or(self.connector_inset, defaults.connector_inset),
            connector_clearance: finite_or(self.connector_clearance, defaults.connector_clearance),
            measurement_x: finite_or(self.measurement_x, defaults.measurement_x),
            measurement_width: finite_or(self.measurement_width, defaults.measurement_width),
            measurement_height: finite_or(self.measurement_height, defaults.measurement_height),
            measurement_gap: finite_or(self.measurement_gap, defaults.measurement_gap),
            wire_inset: finite_or(self.wire_inset, defaults.wire_inset),
            right_margin: finite_or(self.right_margin, defaults.right_margin),
            banner_offset: finite_or(self.banner_offset, defaults.banner_offset),
            summary_offset: finite_or(self.summary_offset, defaults.summary_offset),
            entanglement: self.entanglement,
            wire_width: finite_or(self.wire_width, defaults.wire_width),
            connector_width: finite_or(self.connector_width, defaults.connector_width),
            control_dot_size: finite_or(self.control_dot_size, defaults.control_dot_size),
            target_cross_size: finite_or(self.target_cross_size, defaults.target_cross_size),
            min_gate_font_size: finite_or(self.min_gate_font_size, defaults.min_gate_font_size),
            fast_text_metrics: self.fast_text_metrics,
            max_layout_elements: self.max_layout_elements,
            frame_margin_left: finite_or(self.frame_margin_left, defaults.frame_margin_left),
            frame_margin_right: finite_or(self.frame_margin_right, defaults.frame_margin_right),
            frame_margin_top: finite_or(self.frame_margin_top, defaults.frame_margin_top),
            frame_margin_bottom: finite_or(self.frame_margin_bottom, defaults.frame_margin_bottom),
            title_prefix: self.title_prefix.clone(),
            banner_text: self.banner_text.clone(),
            summary_text: self.summary_text.clone(),
            rotation_label: self.rotation_label.clone(),
            observable_label: self.observable_label.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Every number the energy narrative prints, surfaced as a named input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyConfig {
    pub num_particles: (u32, u32),
    pub nuclear_repulsion_energy: f64,
    pub exact_energy: f64,
    pub vqe_offset: f64,
    pub qse_offset: f64,
    pub pem_correction: f64,
    pub hamiltonian_terms: usize,
    pub hamiltonian_sample_terms: Vec<String>,
    pub ansatz_parameters: usize,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            num_particles: (4, 4),
            nuclear_repulsion_energy: 5.922055,
            exact_energy: -40.176466,
            vqe_offset: 0.045,
            qse_offset: 0.002,
            pem_correction: -0.0019,
            hamiltonian_terms: 150,
            hamiltonian_sample_terms: DEFAULT_SAMPLE_TERMS
                .iter()
                .map(|term| term.to_string())
                .collect(),
            ansatz_parameters: 16,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub energies: EnergyConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
    energies: Option<EnergyConfigFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    title_font_size: Option<f32>,
    label_font_size: Option<f32>,
    caption_font_size: Option<f32>,
    gate_font_size: Option<f32>,
    background: Option<String>,
    text_color: Option<String>,
    wire_color: Option<String>,
    qubit_label_color: Option<String>,
    banner_color: Option<String>,
    preparation_color: Option<String>,
    measurement_color: Option<String>,
    rotation_fill: Option<String>,
    rotation_stroke: Option<String>,
    rotation_opacity: Option<f32>,
    pass_one_color: Option<String>,
    pass_two_color: Option<String>,
    measurement_fill: Option<String>,
    measurement_stroke: Option<String>,
    measurement_opacity: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    layer_offsets: Option<Vec<f32>>,
    layer_pitch: Option<f32>,
    rotation_width: Option<f32>,
    rotation_height: Option<f32>,
    pass_one_offset: Option<f32>,
    pass_two_offset: Option<f32>,
    connector_inset: Option<f32>,
    connector_clearance: Option<f32>,
    measurement_x: Option<f32>,
    measurement_width: Option<f32>,
    measurement_height: Option<f32>,
    measurement_gap: Option<f32>,
    wire_inset: Option<f32>,
    right_margin: Option<f32>,
    banner_offset: Option<f32>,
    summary_offset: Option<f32>,
    entanglement: Option<EntanglementPattern>,
    wire_width: Option<f32>,
    connector_width: Option<f32>,
    control_dot_size: Option<f32>,
    target_cross_size: Option<f32>,
    min_gate_font_size: Option<f32>,
    fast_text_metrics: Option<bool>,
    max_layout_elements: Option<usize>,
    frame_margin_left: Option<f32>,
    frame_margin_right: Option<f32>,
    frame_margin_top: Option<f32>,
    frame_margin_bottom: Option<f32>,
    title_prefix: Option<String>,
    banner_text: Option<String>,
    summary_text: Option<String>,
    rotation_label: Option<String>,
    observable_label: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    scale: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct EnergyConfigFile {
    num_particles: Option<(u32, u32)>,
    nuclear_repulsion_energy: Option<f64>,
    exact_energy: Option<f64>,
    vqe_offset: Option<f64>,
    qse_offset: Option<f64>,
    pem_correction: Option<f64>,
    hamiltonian_terms: Option<usize>,
    hamiltonian_sample_terms: Option<Vec<String>>,
    ansatz_parameters: Option<usize>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let is_json5 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);
    let parsed: ConfigFile = if is_json5 {
        json5::from_str(&contents)?
    } else {
        serde_json::from_str(&contents)?
    };
    log::debug!("loaded config from {}", path.display());
    apply_config_file(Config::default(), parsed)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    apply_config_file(Config::default(), parsed)
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> anyhow::Result<Config> {
    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => log::warn!("unknown theme {theme_name:?}, keeping the default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.title_font_size {
            config.theme.title_font_size = v;
        }
        if let Some(v) = vars.label_font_size {
            config.theme.label_font_size = v;
        }
        if let Some(v) = vars.caption_font_size {
            config.theme.caption_font_size = v;
        }
        if let Some(v) = vars.gate_font_size {
            config.theme.gate_font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.wire_color {
            config.theme.wire_color = v;
        }
        if let Some(v) = vars.qubit_label_color {
            config.theme.qubit_label_color = v;
        }
        if let Some(v) = vars.banner_color {
            config.theme.banner_color = v;
        }
        if let Some(v) = vars.preparation_color {
            config.theme.preparation_color = v;
        }
        if let Some(v) = vars.measurement_color {
            config.theme.measurement_color = v;
        }
        if let Some(v) = vars.rotation_fill {
            config.theme.rotation_fill = v;
        }
        if let Some(v) = vars.rotation_stroke {
            config.theme.rotation_stroke = v;
        }
        if let Some(v) = vars.rotation_opacity {
            config.theme.rotation_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = vars.pass_one_color {
            config.theme.pass_one_color = v;
        }
        if let Some(v) = vars.pass_two_color {
            config.theme.pass_two_color = v;
        }
        if let Some(v) = vars.measurement_fill {
            config.theme.measurement_fill = v;
        }
        if let Some(v) = vars.measurement_stroke {
            config.theme.measurement_stroke = v;
        }
        if let Some(v) = vars.measurement_opacity {
            config.theme.measurement_opacity = v.clamp(0.0, 1.0);
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.layer_offsets {
            config.layout.layer_offsets = v;
        }
        if let Some(v) = layout.layer_pitch {
            config.layout.layer_pitch = v;
        }
        if let Some(v) = layout.rotation_width {
            config.layout.rotation_width = v;
        }
        if let Some(v) = layout.rotation_height {
            config.layout.rotation_height = v;
        }
        if let Some(v) = layout.pass_one_offset {
            config.layout.pass_one_offset = v;
        }
        if let Some(v) = layout.pass_two_offset {
            config.layout.pass_two_offset = v;
        }
        if let Some(v) = layout.connector_inset {
            config.layout.connector_inset = v;
        }
        if let Some(v) = layout.connector_clearance {
            config.layout.connector_clearance = v;
        }
        if let Some(v) = layout.measurement_x {
            config.layout.measurement_x = v;
        }
        if let Some(v) = layout.measurement_width {
            config.layout.measurement_width = v;
        }
        if let Some(v) = layout.measurement_height {
            config.layout.measurement_height = v;
        }
        if let Some(v) = layout.measurement_gap {
            config.layout.measurement_gap = v;
        }
        if let Some(v) = layout.wire_inset {
            config.layout.wire_inset = v;
        }
        if let Some(v) = layout.right_margin {
            config.layout.right_margin = v;
        }
        if let Some(v) = layout.banner_offset {
            config.layout.banner_offset = v;
        }
        if let Some(v) = layout.summary_offset {
            config.layout.summary_offset = v;
        }
        if let Some(v) = layout.entanglement {
            config.layout.entanglement = v;
        }
        if let Some(v) = layout.wire_width {
            config.layout.wire_width = v;
        }
        if let Some(v) = layout.connector_width {
            config.layout.connector_width = v;
        }
        if let Some(v) = layout.control_dot_size {
            config.layout.control_dot_size = v;
        }
        if let Some(v) = layout.target_cross_size {
            config.layout.target_cross_size = v;
        }
        if let Some(v) = layout.min_gate_font_size {
            config.layout.min_gate_font_size = v;
        }
        if let Some(v) = layout.fast_text_metrics {
            config.layout.fast_text_metrics = v;
        }
        if let Some(v) = layout.max_layout_elements {
            config.layout.max_layout_elements = v;
        }
        if let Some(v) = layout.frame_margin_left {
            config.layout.frame_margin_left = v;
        }
        if let Some(v) = layout.frame_margin_right {
            config.layout.frame_margin_right = v;
        }
        if let Some(v) = layout.frame_margin_top {
            config.layout.frame_margin_top = v;
        }
        if let Some(v) = layout.frame_margin_bottom {
            config.layout.frame_margin_bottom = v;
        }
        if let Some(v) = layout.title_prefix {
            config.layout.title_prefix = v;
        }
        if let Some(v) = layout.banner_text {
            config.layout.banner_text = v;
        }
        if let Some(v) = layout.summary_text {
            config.layout.summary_text = v;
        }
        if let Some(v) = layout.rotation_label {
            config.layout.rotation_label = v;
        }
        if let Some(v) = layout.observable_label {
            config.layout.observable_label = v;
        }
    }

    if let Some(render) = parsed.render
        && let Some(v) = render.scale
    {
        config.render.scale = v;
    }

    if let Some(energies) = parsed.energies {
        if let Some(v) = energies.num_particles {
            config.energies.num_particles = v;
        }
        if let Some(v) = energies.nuclear_repulsion_energy {
            config.energies.nuclear_repulsion_energy = v;
        }
        if let Some(v) = energies.exact_energy {
            config.energies.exact_energy = v;
        }
        if let Some(v) = energies.vqe_offset {
            config.energies.vqe_offset = v;
        }
        if let Some(v) = energies.qse_offset {
            config.energies.qse_offset = v;
        }
        if let Some(v) = energies.pem_correction {
            config.energies.pem_correction = v;
        }
        if let Some(v) = energies.hamiltonian_terms {
            config.energies.hamiltonian_terms = v;
        }
        if let Some(v) = energies.hamiltonian_sample_terms {
            config.energies.hamiltonian_sample_terms = v;
        }
        if let Some(v) = energies.ansatz_parameters {
            config.energies.ansatz_parameters = v;
        }
    }

    Ok(config)
}
