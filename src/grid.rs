use crate::{Color, LineStyle};

/// Which tick level a set of grid lines follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickWhich {
    #[default]
    Major,
    Minor,
    Both,
}

/// Which axis a set of grid lines is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridAxis {
    X,
    Y,
    #[default]
    Both,
}

/// Grid lines drawn at a region's tick locations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLines {
    pub which: TickWhich,
    pub axis: GridAxis,
    pub line_style: LineStyle,
    pub color: Color,
}

impl GridLines {
    const MAJOR_ALPHA: f32 = 0.45;
    const MINOR_ALPHA: f32 = 0.28;

    /// Solid lines on the major ticks of both axes.
    pub fn major() -> Self {
        Self {
            which: TickWhich::Major,
            axis: GridAxis::Both,
            line_style: LineStyle::Solid,
            color: Color {
                a: Self::MAJOR_ALPHA,
                ..Color::BLACK
            },
        }
    }

    /// Dashed, fainter lines on the minor ticks of both axes.
    pub fn minor() -> Self {
        Self {
            which: TickWhich::Minor,
            axis: GridAxis::Both,
            line_style: LineStyle::Dashed { length: 4.0 },
            color: Color {
                a: Self::MINOR_ALPHA,
                ..Color::BLACK
            },
        }
    }

    pub fn with_axis(mut self, axis: GridAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for GridLines {
    fn default() -> Self {
        Self::major()
    }
}
