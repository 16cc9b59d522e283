use std::iter;

use quadris_engine::ShapeKind;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::CellDisplay;

/// Grid footprint of one previewed shape: spawn-orientation offsets span
/// 4 columns and 2 rows for every shape.
const PREVIEW_COLS: u16 = 4;
const PREVIEW_ROWS: u16 = 2;

/// Vertical stack of the upcoming shapes, next to spawn at the top.
#[derive(Debug)]
pub struct QueueDisplay<'a> {
    shapes: Vec<ShapeKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> QueueDisplay<'a> {
    pub fn new<I>(shapes: I) -> Self
    where
        I: IntoIterator<Item = ShapeKind>,
    {
        Self {
            shapes: shapes.into_iter().collect(),
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
        PREVIEW_COLS * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let num_shapes = u16::try_from(self.shapes.len()).unwrap();
        let padding = num_shapes.saturating_sub(1);
        PREVIEW_ROWS * CellDisplay::height() * num_shapes
            + padding
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for QueueDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &QueueDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let layout = Layout::vertical(
            (0..self.shapes.len())
                .map(|_| Constraint::Length(PREVIEW_ROWS * CellDisplay::height())),
        )
        .flex(Flex::SpaceBetween);
        let slots = area.layout_vec(&layout);

        for (slot, shape) in iter::zip(slots, &self.shapes) {
            render_shape(*shape, slot, buf);
        }
    }
}

fn render_shape(shape: ShapeKind, area: Rect, buf: &mut Buffer) {
    // Spawn-orientation offsets fit in a 4x2 grid once shifted by
    // (+1, +1); offset row -1 (above the origin) maps to the top row.
    let mut grid = [[ShapeKind::Empty; PREVIEW_COLS as usize]; PREVIEW_ROWS as usize];
    for (dx, dy) in shape.offsets() {
        let col = usize::try_from(dx + 1).expect("preview offset out of grid");
        let row = usize::try_from(dy + 1).expect("preview offset out of grid");
        grid[row][col] = shape;
    }

    let col_constraints = (0..PREVIEW_COLS).map(|_| Constraint::Length(CellDisplay::width()));
    let row_constraints = (0..PREVIEW_ROWS).map(|_| Constraint::Length(CellDisplay::height()));
    let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
    let vertical = Layout::vertical(row_constraints);
    let grid_rows = area
        .layout_vec(&vertical)
        .into_iter()
        .map(|row| row.layout_vec(&horizontal));

    for (grid_row, shapes_row) in iter::zip(grid_rows, grid) {
        for (grid_cell, cell_shape) in iter::zip(grid_row, shapes_row) {
            CellDisplay::from_shape(cell_shape, false).render(grid_cell, buf);
        }
    }
}
