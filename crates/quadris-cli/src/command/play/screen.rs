use std::{path::PathBuf, time::Duration};

use crossterm::event::{Event, KeyCode};
use quadris_engine::{GameSession, SessionPhase};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph},
};

use crate::{
    highscore::HighScoreTable,
    tui::{App, Tui},
    ui::widgets::SessionDisplay,
};

const MAX_NAME_LEN: usize = 16;

/// What is drawn on top of the play view after a game ends.
#[derive(Debug)]
enum Overlay {
    None,
    /// The score made the table; collect a name for it.
    NameEntry { name: String },
    /// The leaderboard, with restart/quit as the only actions.
    Scores,
}

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    scores: HighScoreTable,
    scores_path: PathBuf,
    overlay: Overlay,
    tick_interval: Option<Duration>,
    is_exiting: bool,
    io_error: Option<anyhow::Error>,
}

impl PlayScreen {
    pub fn new(session: GameSession, scores: HighScoreTable, scores_path: PathBuf) -> Self {
        Self {
            session,
            scores,
            scores_path,
            overlay: Overlay::None,
            tick_interval: None,
            is_exiting: false,
            io_error: None,
        }
    }

    /// The error that ended the screen, if any. Call after the TUI loop
    /// returns.
    pub fn into_result(self) -> anyhow::Result<()> {
        match self.io_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Re-arms (or disables) the gravity timer when the required interval
    /// changed. Only called right after a tick or an input event, so
    /// restarting the countdown here never starves gravity.
    fn sync_tick_interval(&mut self, tui: &mut Tui) {
        let want = match self.session.phase() {
            SessionPhase::Running | SessionPhase::WaitingAfterLine => {
                Some(self.session.gravity_interval())
            }
            SessionPhase::Idle | SessionPhase::Paused | SessionPhase::GameOver => None,
        };
        if want != self.tick_interval {
            self.tick_interval = want;
            tui.set_tick_interval(want);
        }
    }

    /// Opens the end-of-game overlay once the session reaches game over.
    /// Commands can end the game synchronously (a hard drop whose next
    /// spawn collides), so this runs after input as well as after ticks.
    fn after_action(&mut self, tui: &mut Tui) {
        if self.session.phase().is_game_over() && matches!(self.overlay, Overlay::None) {
            let score = self.session.stats().score();
            self.overlay = if self.scores.qualifies(score) {
                Overlay::NameEntry {
                    name: String::new(),
                }
            } else {
                Overlay::Scores
            };
        }
        self.sync_tick_interval(tui);
    }

    fn handle_game_key(&mut self, code: KeyCode) {
        let is_playing = self.session.phase().is_running();
        let is_paused = self.session.phase().is_paused();

        match code {
            KeyCode::Left if is_playing => self.session.move_left(),
            KeyCode::Right if is_playing => self.session.move_right(),
            KeyCode::Up if is_playing => self.session.rotate_left(),
            KeyCode::Down if is_playing => self.session.rotate_right(),
            KeyCode::Char('d') if is_playing => self.session.soft_drop(),
            KeyCode::Char(' ') if is_playing => self.session.hard_drop(),
            KeyCode::Char('p') if is_playing || is_paused => self.session.toggle_pause(),
            KeyCode::Char('q') => self.is_exiting = true,
            _ => {}
        }
    }

    fn commit_name(&mut self) {
        let Overlay::NameEntry { name } = &self.overlay else {
            return;
        };
        let name = name.trim();
        let name = if name.is_empty() { "anonymous" } else { name };
        self.scores.record(name, self.session.stats().score());
        if let Err(err) = self.scores.save(&self.scores_path) {
            self.io_error = Some(err);
            self.is_exiting = true;
            return;
        }
        self.overlay = Overlay::Scores;
    }

    fn restart(&mut self) {
        self.overlay = Overlay::None;
        self.session.start();
    }

    fn help_text(&self) -> &'static str {
        match self.overlay {
            Overlay::NameEntry { .. } => "Type a name | Enter (Save) | Esc (Skip)",
            Overlay::Scores => "Controls: R (Restart) | Q (Quit)",
            Overlay::None => match self.session.phase() {
                SessionPhase::Paused => "Controls: P (Resume) | Q (Quit)",
                _ => {
                    "Controls: ← → (Move) | ↑ ↓ (Rotate) | D (Soft Drop) | Space (Hard Drop) | P (Pause) | Q (Quit)"
                }
            },
        }
    }

    fn draw_name_entry(&self, frame: &mut Frame<'_>, name: &str) {
        let area = frame
            .area()
            .centered(Constraint::Length(36), Constraint::Length(5));
        frame.render_widget(Clear, area);

        let lines = vec![
            Line::from(format!("Score: {}", self.session.stats().score())).centered(),
            Line::from(""),
            Line::from(format!("Name: {name}_")),
        ];
        let widget = Paragraph::new(lines)
            .block(Block::bordered().title(Line::from("NEW HIGH SCORE").centered()));
        frame.render_widget(widget, area);
    }

    fn draw_scores(&self, frame: &mut Frame<'_>) {
        let height = u16::try_from(HighScoreTable::MAX_RECORDS).unwrap() + 2;
        let area = frame
            .area()
            .centered(Constraint::Length(40), Constraint::Length(height));
        frame.render_widget(Clear, area);

        let lines: Vec<Line> = if self.scores.is_empty() {
            vec![Line::from("No scores yet").centered()]
        } else {
            self.scores
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    Line::from(format!(
                        "{:>2}. {:<16} {:>8}  {}",
                        i + 1,
                        record.name,
                        record.score,
                        record.timestamp.format("%Y-%m-%d"),
                    ))
                })
                .collect()
        };
        let widget = Paragraph::new(lines)
            .block(Block::bordered().title(Line::from("HIGH SCORES").centered()));
        frame.render_widget(widget, area);
    }
}

impl App for PlayScreen {
    fn init(&mut self, tui: &mut Tui) {
        self.session.start();
        self.sync_tick_interval(tui);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        if let Some(key) = event.as_key_event() {
            match &mut self.overlay {
                Overlay::None => self.handle_game_key(key.code),
                Overlay::NameEntry { name } => match key.code {
                    KeyCode::Enter => self.commit_name(),
                    KeyCode::Esc => self.overlay = Overlay::Scores,
                    KeyCode::Backspace => {
                        name.pop();
                    }
                    KeyCode::Char(c) if !c.is_control() && name.len() < MAX_NAME_LEN => {
                        name.push(c);
                    }
                    _ => {}
                },
                Overlay::Scores => match key.code {
                    KeyCode::Char('r') => self.restart(),
                    KeyCode::Char('q') => self.is_exiting = true,
                    _ => {}
                },
            }
        }
        self.after_action(tui);
    }

    fn draw(&self, frame: &mut Frame) {
        let help_text = Text::from(self.help_text())
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session), main_area);
        frame.render_widget(help_text, help_area);

        match &self.overlay {
            Overlay::None => {}
            Overlay::NameEntry { name } => self.draw_name_entry(frame, name),
            Overlay::Scores => self.draw_scores(frame),
        }
    }

    fn update(&mut self, tui: &mut Tui) {
        let _ = self.session.tick();
        self.after_action(tui);
    }
}
