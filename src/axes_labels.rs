use iced::Color;

/// Default padding between the x tick labels and the x label, in points.
pub const X_LABEL_PAD: f64 = 15.0;
/// Default padding between the y tick labels and the y label, in points.
pub const Y_LABEL_PAD: f64 = 30.0;

/// Text naming an axis, placed `labelpad` points away from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub labelpad: f64,
}

impl AxisLabel {
    pub fn new(text: impl Into<String>, labelpad: f64) -> Self {
        Self {
            text: text.into(),
            labelpad,
        }
    }
}

/// Free text anchored at a data coordinate of a region.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub color: Color,
    /// Font size in points.
    pub size: f32,
}

impl Text {
    pub fn new(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            x,
            y,
            content: content.into(),
            color: Color::BLACK,
            size: 10.0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}
