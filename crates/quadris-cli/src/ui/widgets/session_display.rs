use quadris_engine::{GameSession, SessionPhase};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::Line,
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

use crate::ui::widgets::{BoardDisplay, QueueDisplay, StatsDisplay, style};

/// The full play view: stats column, playfield, and next-piece queue,
/// with a banner over the playfield while paused or after game over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self { session }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let style = style::DEFAULT;
        let block_padding = Padding::symmetric(1, 0);
        let border_style = match self.session.phase() {
            SessionPhase::Paused => style::PAUSED_BORDER,
            SessionPhase::GameOver => style::GAME_OVER_BORDER,
            SessionPhase::Idle | SessionPhase::Running | SessionPhase::WaitingAfterLine => {
                style::RUNNING_BORDER
            }
        };

        let game_board = BoardDisplay::new(self.session)
            .block(Block::bordered().border_style(border_style).style(style));
        let queue = QueueDisplay::new(self.session.preview_pieces()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style),
        );
        let session_stats = StatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(queue.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = left_column.layout(&Layout::vertical([Constraint::Length(
            session_stats.height(),
        )]));
        let [board_area] =
            center_column.layout(&Layout::vertical([Constraint::Length(game_board.height())]));
        let [queue_area] =
            right_column.layout(&Layout::vertical([Constraint::Length(queue.height())]));

        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        queue.render(queue_area, buf);

        let banner = match self.session.phase() {
            SessionPhase::Paused => Some("PAUSED"),
            SessionPhase::GameOver => Some("GAME OVER"),
            SessionPhase::Idle | SessionPhase::Running | SessionPhase::WaitingAfterLine => None,
        };
        if let Some(text) = banner {
            let banner_area =
                board_area.centered(Constraint::Length(14), Constraint::Length(3));
            Clear.render(banner_area, buf);
            Paragraph::new(text)
                .centered()
                .style(style)
                .block(Block::bordered().border_style(border_style))
                .render(banner_area, buf);
        }
    }
}
