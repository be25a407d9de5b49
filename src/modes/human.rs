use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{
    FrameSignal, GameConfig, GameEngine, GameState, Scheduler, request_direction,
};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{FrameSnapshot, Renderer};

/// Interactive play: one rendered frame drives the scheduler, the engine
/// and the view in that order.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    scheduler: Scheduler,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    frame_interval: Duration,
    epoch: Instant,
    fraction: f64,
    should_quit: bool,
    needs_redraw: bool,
    game_over_reported: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, fps: u32, seed: Option<u64>) -> Self {
        let renderer = Renderer::new(config.cell_size);
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };
        let mut state = engine.reset();
        let epoch = Instant::now();
        let scheduler = Scheduler::start(&mut state, 0.0);

        Self {
            engine,
            state,
            scheduler,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            epoch,
            fraction: 0.0,
            should_quit: false,
            needs_redraw: true,
            game_over_reported: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(self.frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        log::info!(
            "Frame loop started at {:.0} FPS",
            1.0 / self.frame_interval.as_secs_f64()
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => log::warn!("Terminal event error: {}", e),
                        None => self.should_quit = true,
                    }
                }

                // Animation frame
                _ = frame_timer.tick() => {
                    self.on_frame();
                    if self.needs_redraw {
                        self.draw(terminal)?;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        log::info!(
            "Quitting after {} games, best score {}",
            self.metrics.games_played,
            self.metrics.high_score
        );
        Ok(())
    }

    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Advance the simulation for one rendered frame.
    ///
    /// Once the scheduler is cancelled the chain stays idle until a restart
    /// or a terminal event asks for another draw.
    fn on_frame(&mut self) {
        if self.scheduler.is_cancelled() {
            return;
        }

        let now = self.now_ms();
        let tick = self
            .engine
            .run_frame(&mut self.scheduler, &mut self.state, now);
        self.fraction = tick.fraction;
        self.needs_redraw = true;
        self.metrics.update();

        if tick.signal == FrameSignal::Stopped || self.state.is_over() {
            self.report_game_over();
        }
    }

    fn report_game_over(&mut self) {
        if self.game_over_reported {
            return;
        }
        self.game_over_reported = true;
        self.metrics.on_game_over(self.state.score);
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let snapshot = FrameSnapshot::capture(&self.state, self.fraction);
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &snapshot, &self.metrics);
            })
            .context("Failed to draw frame")?;
        // After game over nothing changes until the next event
        self.needs_redraw = !self.scheduler.is_cancelled();
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Steer(direction) => {
                        request_direction(&mut self.state, direction);
                    }
                    KeyAction::Restart => self.reset_game(),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Resize(_, _) => self.needs_redraw = true,
            _ => {}
        }
    }

    /// Throw away the old chain and start a fresh game and scheduler
    fn reset_game(&mut self) {
        let now = self.now_ms();
        self.state = self.engine.reset();
        self.scheduler = Scheduler::start(&mut self.state, now);
        self.fraction = 0.0;
        self.metrics.on_game_start();
        self.game_over_reported = false;
        self.needs_redraw = true;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameStatus, Position, Snake};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig::default(), 60, Some(9))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.state.status, GameStatus::Running);
        assert_eq!(mode.state.score, 0);
        assert!(!mode.scheduler.is_cancelled());
    }

    #[test]
    fn test_arrow_key_sets_pending_direction() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.state.pending, Some(Direction::Up));

        mode.handle_event(key(KeyCode::Char('x')));
        assert_eq!(mode.state.pending, Some(Direction::Up));
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_game_over_stops_chain_and_restart_begins_a_new_one() {
        let mut mode = mode();
        mode.state.snake = Snake::new(Position::new(0, 0));
        mode.state.food = Position::new(5, 5);
        mode.state.pending = Some(Direction::Left);
        // Enough accumulated time for one step on the next frame
        mode.state.clock.accumulated_ms = mode.state.clock.step_interval_ms;

        mode.on_frame();
        assert!(mode.state.is_over());
        assert!(mode.scheduler.is_cancelled());
        assert_eq!(mode.metrics.games_played, 1);

        // Further frames are no-ops and do not count the game twice
        mode.on_frame();
        assert_eq!(mode.metrics.games_played, 1);

        mode.handle_event(key(KeyCode::Char('r')));
        assert_eq!(mode.state.status, GameStatus::Running);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.snake.head(), Position::new(10, 10));
        assert!(!mode.scheduler.is_cancelled());
    }
}
