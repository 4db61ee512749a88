use crate::{Color, LineStyle};

/// Direction a reference line runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Spans the x-axis at a fixed y.
    Horizontal,
    /// Spans the y-axis at a fixed x.
    Vertical,
}

/// A line across the whole region at a fixed data coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub orientation: Orientation,
    /// The y-coordinate of a horizontal line or the x-coordinate of a vertical one.
    pub value: f64,
    /// Legend label.
    pub label: Option<String>,
    pub color: Color,
    /// Line width in points.
    pub width: f32,
    pub line_style: LineStyle,
}

impl ReferenceLine {
    fn new(orientation: Orientation, value: f64) -> Self {
        Self {
            orientation,
            value,
            label: None,
            color: Color::from_rgb(0.5, 0.5, 0.5),
            width: 1.0,
            line_style: LineStyle::Solid,
        }
    }

    /// Line at `y` spanning every x.
    pub fn horizontal(y: f64) -> Self {
        Self::new(Orientation::Horizontal, y)
    }

    pub fn vertical(x: f64) -> Self {
        Self::new(Orientation::Vertical, x)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into()).filter(|label| !label.is_empty());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Line width in points, at least half a point.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width.max(0.5);
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }
}
