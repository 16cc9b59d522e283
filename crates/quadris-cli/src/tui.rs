use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::Frame;

/// Trait for TUI applications executed by [`Tui::run`].
pub trait App {
    /// Initializes the application. Called once at the start of
    /// [`Tui::run`]; use this to set the initial tick interval.
    fn init(&mut self, tui: &mut Tui);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws the screen. Called whenever state changed since the last
    /// render.
    fn draw(&self, frame: &mut Frame);

    /// Advances game logic. Called once per elapsed tick interval.
    fn update(&mut self, tui: &mut Tui);
}

#[derive(Debug)]
enum TuiEvent {
    Tick,
    Render,
    Crossterm(Event),
}

/// TUI application runtime.
///
/// A single-threaded loop that interleaves three event sources: a timer
/// tick at a configurable interval, dirty-state renders, and crossterm
/// terminal events. The tick interval can be changed (or disabled) at any
/// time from within the application, which is how gravity speeds up with
/// the level and stops entirely while paused.
#[derive(Debug)]
pub struct Tui {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for Tui {
    fn default() -> Self {
        Self::new()
    }
}

impl Tui {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            // Initial render is required on startup
            dirty: true,
        }
    }

    /// Sets the tick interval, restarting the countdown from now. Pass
    /// `None` to disable tick events.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    /// Returns the next event, blocking until a tick is due, a render is
    /// pending, or a terminal event arrives.
    fn next_event(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            // With no tick armed, block indefinitely on terminal input.
            if let Some(interval) = self.tick_interval {
                let next_tick_at = self.last_tick + interval;
                if !event::poll(next_tick_at.saturating_duration_since(now))? {
                    continue;
                }
            }

            self.dirty = true;
            return Ok(TuiEvent::Crossterm(event::read()?));
        }
    }

    /// Runs the application: `init`, then the event loop until
    /// `should_exit` returns true.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.next_event()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
