use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};
use tracing::{error, info, warn};

use crate::game::{GameConfig, GameEngine, GameState, tick_interval};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::AnalyticsReport;
use crate::render::{ChartsView, Renderer};
use crate::storage::StatsStore;

type Backend = CrosstermBackend<Stderr>;

/// Keyboard-driven play with a stats sidebar and persisted results
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    store: Box<dyn StatsStore>,
    renderer: Renderer,
    charts: ChartsView,
    input_handler: InputHandler,
    should_quit: bool,
    /// Last notice for the sidebar (save result, analytics errors)
    status: Option<String>,
}

impl HumanMode {
    pub fn new(config: GameConfig, store: Box<dyn StatsStore>) -> Self {
        Self::with_engine(GameEngine::new(config), store)
    }

    pub fn with_engine(mut engine: GameEngine, store: Box<dyn StatsStore>) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            store,
            renderer: Renderer::new(),
            charts: ChartsView::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            status: None,
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

    async fn run_game_loop(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks follow the session speed
        let mut tick_timer = interval(tick_interval(self.state.speed));

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match self.handle_event(event) {
                            KeyAction::ShowAnalytics => {
                                self.show_analytics(terminal, &mut event_stream).await?;
                            }
                            KeyAction::Restart => {
                                tick_timer = ticker(self.state.speed);
                            }
                            _ => {}
                        }
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.update_game() {
                        tick_timer = ticker(self.state.speed);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, self.status.as_deref());
                    }).context("Failed to draw frame")?;
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

        Ok(())
    }

    /// Apply a key event; returns the action so the loop can react to it
    fn handle_event(&mut self, event: Event) -> KeyAction {
        let Event::Key(key) = event else {
            return KeyAction::None;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        let action = self.input_handler.handle_key_event(key, self.state.phase);
        self.apply(action)
    }

    fn apply(&mut self, action: KeyAction) -> KeyAction {
        match action {
            KeyAction::Turn(direction) => {
                self.engine.turn(&mut self.state, direction);
                action
            }
            KeyAction::Restart => {
                if self.reset_game() {
                    action
                } else {
                    KeyAction::None
                }
            }
            KeyAction::ShowAnalytics if !self.state.is_game_over() => KeyAction::None,
            KeyAction::Quit => {
                self.should_quit = true;
                action
            }
            _ => action,
        }
    }

    /// Run one tick; returns true when the tick interval must change
    fn update_game(&mut self) -> bool {
        let result = self.engine.step(&mut self.state);

        if let Some(record) = result.finished {
            match self.store.append(&record) {
                Ok(id) => {
                    info!(id, score = record.score, "Game stats saved");
                    self.status = Some(format!("Game saved (score {})", record.score));
                }
                Err(err) => {
                    error!(%err, "Failed to save game stats");
                    self.status = Some(format!("Could not save game: {err}"));
                }
            }
        }

        result.speed_changed
    }

    fn reset_game(&mut self) -> bool {
        if !self.engine.restart(&mut self.state) {
            return false;
        }
        self.status = None;
        info!("Game restarted");
        true
    }

    /// Load the report; `None` leaves the reason in the status line
    fn load_report(&mut self) -> Option<AnalyticsReport> {
        match AnalyticsReport::load(&*self.store, &self.engine.config().player_name) {
            Ok(report) => Some(report),
            Err(err) => {
                warn!(%err, "Analytics unavailable");
                self.status = Some(err.to_string());
                None
            }
        }
    }

    /// Draw the charts and wait for any key before returning to the game
    async fn show_analytics(
        &mut self,
        terminal: &mut Terminal<Backend>,
        event_stream: &mut EventStream,
    ) -> Result<()> {
        let Some(report) = self.load_report() else {
            return Ok(());
        };
        info!(games = report.recent.len(), "Showing analytics");

        loop {
            terminal
                .draw(|frame| self.charts.render(frame, &report))
                .context("Failed to draw analytics")?;

            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => break,
                        Some(Ok(_)) => {}
                        Some(Err(err)) => {
                            warn!(%err, "Terminal event error in analytics view");
                            break;
                        }
                        None => break,
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                    break;
                }
            }
        }

        terminal.clear().context("Failed to clear terminal")?;
        Ok(())
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Tick timer for the given speed, first tick one period from now
fn ticker(speed: u32) -> Interval {
    let period = tick_interval(speed);
    interval_at(Instant::now() + period, period)
}
