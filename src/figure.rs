//! In-memory drawing surface.
//!
//! Coordinates handed to a [`Surface`] are diagram units with y pointing up,
//! the way a plotting library's data space works. [`Frame`] maps them onto
//! the pixel canvas.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Semantic role of a drawn element, emitted as an SVG `class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    QubitLine,
    QubitLabel,
    Banner,
    RegionLabel,
    RotationBox,
    RotationLabel,
    Connector,
    ControlDot,
    TargetCross,
    MeasurementBox,
    MeasurementLabel,
    SummaryLabel,
}

impl Tag {
    pub fn class_name(self) -> &'static str {
        match self {
            Tag::QubitLine => "qubit-line",
            Tag::QubitLabel => "qubit-label",
            Tag::Banner => "banner",
            Tag::RegionLabel => "region-label",
            Tag::RotationBox => "rotation-box",
            Tag::RotationLabel => "rotation-label",
            Tag::Connector => "connector",
            Tag::ControlDot => "control-dot",
            Tag::TargetCross => "target-cross",
            Tag::MeasurementBox => "measurement-box",
            Tag::MeasurementLabel => "measurement-label",
            Tag::SummaryLabel => "summary-label",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hatch {
    /// `//` diagonal lines.
    Diagonal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paint {
    pub fill: String,
    pub stroke: String,
    pub opacity: f32,
    pub hatch: Option<Hatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Glyph {
    Circle,
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: String,
    pub anchor: Anchor,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Element {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
        tag: Tag,
    },
    Rect {
        rect: Rect,
        paint: Paint,
        tag: Tag,
    },
    Marker {
        at: Point,
        glyph: Glyph,
        color: String,
        /// Glyph size in pixels, independent of the axis scale.
        size: f32,
        tag: Tag,
    },
    Text {
        at: Point,
        text: String,
        style: TextStyle,
        tag: Tag,
    },
}

impl Element {
    pub fn tag(&self) -> Tag {
        match self {
            Element::Line { tag, .. }
            | Element::Rect { tag, .. }
            | Element::Marker { tag, .. }
            | Element::Text { tag, .. } => *tag,
        }
    }
}

/// The drawing capabilities a circuit renderer needs from its target.
pub trait Surface {
    fn set_title(&mut self, title: &str, style: TextStyle);
    fn set_limits(&mut self, x: (f32, f32), y: (f32, f32));
    fn line(&mut self, from: Point, to: Point, stroke: Stroke, tag: Tag);
    fn rect(&mut self, rect: Rect, paint: Paint, tag: Tag);
    fn marker(&mut self, at: Point, glyph: Glyph, color: &str, size: f32, tag: Tag);
    fn text(&mut self, at: Point, text: &str, style: TextStyle, tag: Tag);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: Option<(String, TextStyle)>,
    pub frame: Frame,
    pub elements: Vec<Element>,
}

impl Figure {
    pub fn new(frame: Frame) -> Self {
        Self {
            title: None,
            frame,
            elements: Vec::new(),
        }
    }

    pub fn count(&self, tag: Tag) -> usize {
        self.elements.iter().filter(|el| el.tag() == tag).count()
    }

    pub fn tagged(&self, tag: Tag) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |el| el.tag() == tag)
    }
}

impl Surface for Figure {
    fn set_title(&mut self, title: &str, style: TextStyle) {
        self.title = Some((title.to_string(), style));
    }

    fn set_limits(&mut self, x: (f32, f32), y: (f32, f32)) {
        self.frame.x_limits = x;
        self.frame.y_limits = y;
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke, tag: Tag) {
        self.elements.push(Element::Line {
            from,
            to,
            stroke,
            tag,
        });
    }

    fn rect(&mut self, rect: Rect, paint: Paint, tag: Tag) {
        self.elements.push(Element::Rect { rect, paint, tag });
    }

    fn marker(&mut self, at: Point, glyph: Glyph, color: &str, size: f32, tag: Tag) {
        self.elements.push(Element::Marker {
            at,
            glyph,
            color: color.to_string(),
            size,
            tag,
        });
    }

    fn text(&mut self, at: Point, text: &str, style: TextStyle, tag: Tag) {
        self.elements.push(Element::Text {
            at,
            text: text.to_string(),
            style,
            tag,
        });
    }
}

/// Canvas-to-axes mapping. Margins are in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub x_limits: (f32, f32),
    pub y_limits: (f32, f32),
}

pub const MIN_CANVAS: f32 = 200.0;

impl Frame {
    pub fn plot_width(&self) -> f32 {
        (self.canvas_width - self.margin_left - self.margin_right).max(1.0)
    }

    pub fn plot_height(&self) -> f32 {
        (self.canvas_height - self.margin_top - self.margin_bottom).max(1.0)
    }

    pub fn scale_x(&self) -> f32 {
        self.plot_width() / span(self.x_limits)
    }

    pub fn scale_y(&self) -> f32 {
        self.plot_height() / span(self.y_limits)
    }

    pub fn to_px(&self, point: Point) -> (f32, f32) {
        let px = self.margin_left + (point.x - self.x_limits.0) * self.scale_x();
        let py = self.margin_top + (self.y_limits.1 - point.y) * self.scale_y();
        (px, py)
    }

    /// Pixel-space rectangle as `(x, y, width, height)` with y pointing down.
    pub fn rect_to_px(&self, rect: Rect) -> (f32, f32, f32, f32) {
        let (x, top) = self.to_px(Point::new(rect.x, rect.y + rect.height));
        (
            x,
            top,
            rect.width * self.scale_x(),
            rect.height * self.scale_y(),
        )
    }
}

fn span(limits: (f32, f32)) -> f32 {
    let span = limits.1 - limits.0;
    if span.is_finite() && span.abs() > f32::EPSILON {
        span
    } else {
        1.0
    }
}

/// Clamps a requested canvas size to something drawable.
pub fn sanitize_canvas(value: f32) -> f32 {
    if value.is_finite() {
        value.max(MIN_CANVAS)
    } else {
        MIN_CANVAS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            canvas_width: 1200.0,
            canvas_height: 800.0,
            margin_left: 100.0,
            margin_right: 100.0,
            margin_top: 50.0,
            margin_bottom: 50.0,
            x_limits: (0.0, 20.0),
            y_limits: (0.0, 9.0),
        }
    }

    #[test]
    fn to_px_flips_y_axis() {
        let f = frame();
        assert_eq!(f.to_px(Point::new(0.0, 9.0)), (100.0, 50.0));
        assert_eq!(f.to_px(Point::new(20.0, 0.0)), (1100.0, 750.0));
    }

    #[test]
    fn rect_to_px_uses_top_left_corner() {
        let f = frame();
        let (x, y, w, h) = f.rect_to_px(Rect::new(0.0, 8.0, 1.0, 1.0));
        assert_eq!((x, y), (100.0, 50.0));
        assert_eq!(w, 50.0);
        assert!((h - 700.0 / 9.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_limits_do_not_divide_by_zero() {
        let f = Frame {
            x_limits: (3.0, 3.0),
            ..frame()
        };
        assert!(f.scale_x().is_finite());
    }

    #[test]
    fn sanitize_canvas_clamps_bad_sizes() {
        assert_eq!(sanitize_canvas(f32::NAN), MIN_CANVAS);
        assert_eq!(sanitize_canvas(-5.0), MIN_CANVAS);
        assert_eq!(sanitize_canvas(1600.0), 1600.0);
    }

    #[test]
    fn figure_records_and_counts_by_tag() {
        let mut fig = Figure::new(frame());
        let stroke = Stroke {
            color: "black".to_string(),
            width: 1.0,
        };
        fig.line(Point::new(0.5, 1.0), Point::new(19.5, 1.0), stroke.clone(), Tag::QubitLine);
        fig.line(Point::new(0.5, 2.0), Point::new(19.5, 2.0), stroke, Tag::QubitLine);
        fig.marker(Point::new(2.5, 1.0), Glyph::Circle, "red", 4.0, Tag::ControlDot);
        assert_eq!(fig.count(Tag::QubitLine), 2);
        assert_eq!(fig.count(Tag::ControlDot), 1);
        assert_eq!(fig.count(Tag::TargetCross), 0);
    }
}
