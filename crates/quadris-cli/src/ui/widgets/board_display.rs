use std::iter;

use quadris_engine::{BOARD_HEIGHT, BOARD_WIDTH, GameSession};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::CellDisplay;

/// The playfield: locked cells plus the falling piece, rendered with the
/// top board row at the top of the widget.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        u16::try_from(BOARD_WIDTH).unwrap() * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(BOARD_HEIGHT).unwrap() * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let active_cells = self.session.active_piece_cells();
        let active_kind = self.session.active_piece_kind();

        let col_constraints = (0..BOARD_WIDTH).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..BOARD_HEIGHT).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_rows = area
            .layout::<{ BOARD_HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ BOARD_WIDTH }>(&horizontal));

        // Board row 0 is the floor; the widget draws top-down.
        for (grid_row, y) in iter::zip(grid_rows, (0..BOARD_HEIGHT).rev()) {
            for (grid_cell, x) in iter::zip(grid_row, 0..BOARD_WIDTH) {
                let shape = if active_cells.contains(&(x, y)) {
                    active_kind
                } else {
                    self.session.shape_at(x, y)
                };
                CellDisplay::from_shape(shape, true).render(grid_cell, buf);
            }
        }
    }
}
