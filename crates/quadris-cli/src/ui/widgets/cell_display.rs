use quadris_engine::ShapeKind;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One board cell, rendered as a 2x1 colored patch.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_shape(shape: ShapeKind, show_dots: bool) -> Self {
        let style = match shape {
            ShapeKind::Empty => {
                return if show_dots {
                    Self::new(style::EMPTY_DOT, ".")
                } else {
                    Self::new(style::EMPTY, "")
                };
            }
            ShapeKind::Line => style::LINE_BLOCK,
            ShapeKind::LShape => style::L_BLOCK,
            ShapeKind::MirroredLShape => style::MIRRORED_L_BLOCK,
            ShapeKind::Square => style::SQUARE_BLOCK,
            ShapeKind::SShape => style::S_BLOCK,
            ShapeKind::TShape => style::T_BLOCK,
            ShapeKind::ZShape => style::Z_BLOCK,
        };
        Self::new(style, "")
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
