use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub title_font_size: f32,
    pub label_font_size: f32,
    pub caption_font_size: f32,
    pub gate_font_size: f32,
    pub background: String,
    pub text_color: String,
    pub wire_color: String,
    pub qubit_label_color: String,
    pub banner_color: String,
    pub preparation_color: String,
    pub measurement_color: String,
    pub rotation_fill: String,
    pub rotation_stroke: String,
    pub rotation_opacity: f32,
    pub pass_one_color: String,
    pub pass_two_color: String,
    pub measurement_fill: String,
    pub measurement_stroke: String,
    pub measurement_opacity: f32,
}

impl Theme {
    /// Presentation palette built from matplotlib named colours.
    pub fn classic() -> Self {
        Self {
            font_family: "DejaVu Sans, Verdana, Arial, sans-serif".to_string(),
            title_font_size: 14.0,
            label_font_size: 12.0,
            caption_font_size: 10.0,
            gate_font_size: 7.0,
            background: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            wire_color: "#000000".to_string(),
            qubit_label_color: "darkcyan".to_string(),
            banner_color: "darkgreen".to_string(),
            preparation_color: "blue".to_string(),
            measurement_color: "red".to_string(),
            rotation_fill: "lightblue".to_string(),
            rotation_stroke: "blue".to_string(),
            rotation_opacity: 0.7,
            pass_one_color: "red".to_string(),
            pass_two_color: "orange".to_string(),
            measurement_fill: "lightcoral".to_string(),
            measurement_stroke: "red".to_string(),
            measurement_opacity: 0.9,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            title_font_size: 15.0,
            label_font_size: 12.0,
            caption_font_size: 10.0,
            gate_font_size: 7.5,
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            wire_color: "#7A8AA6".to_string(),
            qubit_label_color: "#0F766E".to_string(),
            banner_color: "#166534".to_string(),
            preparation_color: "#1D4ED8".to_string(),
            measurement_color: "#B91C1C".to_string(),
            rotation_fill: "#DBEAFE".to_string(),
            rotation_stroke: "#3B82F6".to_string(),
            rotation_opacity: 0.85,
            pass_one_color: "#DC2626".to_string(),
            pass_two_color: "#EA580C".to_string(),
            measurement_fill: "#FECACA".to_string(),
            measurement_stroke: "#DC2626".to_string(),
            measurement_opacity: 0.9,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" | "matplotlib" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_resolves_presets_and_aliases() {
        assert_eq!(Theme::by_name("modern").unwrap().wire_color, Theme::modern().wire_color);
        assert_eq!(Theme::by_name("default").unwrap().pass_one_color, "red");
        assert!(Theme::by_name("neon").is_none());
    }

    #[test]
    fn classic_matches_presentation_palette() {
        let theme = Theme::default();
        assert_eq!(theme.pass_one_color, "red");
        assert_eq!(theme.pass_two_color, "orange");
        assert_eq!(theme.measurement_fill, "lightcoral");
        assert_eq!(theme.rotation_opacity, 0.7);
    }
}
