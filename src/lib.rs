#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod draw;
pub mod error;
pub mod figure;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod report;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, EntanglementPattern, LayoutConfig, load_config};
pub use draw::render_circuit;
pub use error::{InputError, RenderError};
pub use figure::{Figure, Surface, Tag};
pub use ir::{DiagramSpec, RegionLabel, RegionTone};
pub use layout::compute_layout;
pub use render::render_svg;
pub use report::EnergyReport;
pub use theme::Theme;

/// Renders `spec` straight to SVG text.
pub fn render_to_svg(spec: &DiagramSpec, config: &Config) -> Result<String, RenderError> {
    let figure = render_circuit(spec, &config.theme, &config.layout)?;
    Ok(render_svg(&figure, &config.theme))
}
