use crate::text_metrics;

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Renders `value` with Unicode subscript digits, e.g. `12` -> `₁₂`.
pub(super) fn subscript(value: usize) -> String {
    value
        .to_string()
        .chars()
        .filter_map(|ch| ch.to_digit(10))
        .map(|digit| SUBSCRIPT_DIGITS[digit as usize])
        .collect()
}

pub(super) fn text_width(text: &str, font_size: f32, font_family: &str, fast_metrics: bool) -> f32 {
    if fast_metrics {
        return text_metrics::fallback_text_width(text, font_size);
    }
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| text_metrics::fallback_text_width(text, font_size))
}

/// Largest font size no bigger than `preferred` whose rendering of `text`
/// fits in `max_width` pixels, floored at `min_size`.
pub(super) fn fit_font_size(
    text: &str,
    preferred: f32,
    min_size: f32,
    max_width: f32,
    font_family: &str,
    fast_metrics: bool,
) -> f32 {
    let floor = min_size.min(preferred).max(0.0);
    if preferred <= 0.0 || max_width <= 0.0 {
        return floor;
    }
    let width = text_width(text, preferred, font_family, fast_metrics);
    if width <= max_width {
        return preferred;
    }
    // width is linear in font size
    (preferred * max_width / width).max(floor)
}
