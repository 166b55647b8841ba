//! Spines: the four border lines around an axes.

use crate::plotting::style::{Color, LineCap, LineStyle};

/// Which border of the axes a spine runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];
}

/// One border line.
#[derive(Debug, Clone, PartialEq)]
pub struct Spine {
    pub visible: bool,
    pub line_style: LineStyle,
}

impl Default for Spine {
    fn default() -> Self {
        Spine {
            visible: true,
            line_style: LineStyle::new()
                .color(Color::BLACK)
                .width(0.8)
                .cap(LineCap::Square),
        }
    }
}

/// The four spines of an axes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spines {
    pub top: Spine,
    pub bottom: Spine,
    pub left: Spine,
    pub right: Spine,
}

impl Spines {
    pub fn get(&self, side: Side) -> &Spine {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Spine {
        match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Set the line width (points) of all four spines.
    pub fn set_linewidth(&mut self, width: f64) {
        for side in Side::ALL {
            self.get_mut(side).line_style.width = width;
        }
    }
}
