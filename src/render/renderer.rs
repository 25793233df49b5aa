use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::game::{GameState, Position};

/// Width of the stats sidebar in columns
const SIDEBAR_WIDTH: u16 = 30;

/// What a grid cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Body,
    Head,
    Food,
}

impl CellKind {
    fn span(self) -> Span<'static> {
        match self {
            CellKind::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            CellKind::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
            CellKind::Food => Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            CellKind::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }
}

/// Classify one cell; the head wins over the body and the body over food
pub fn cell_kind(state: &GameState, pos: Position) -> CellKind {
    if pos == state.snake.head() {
        CellKind::Head
    } else if state.snake.occupies(pos) {
        CellKind::Body
    } else if pos == state.food.position() {
        CellKind::Food
    } else {
        CellKind::Empty
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, status: Option<&str>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Game area and sidebar
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
            .split(rows[0]);

        if state.is_playing() {
            let grid = self.render_grid(state);
            frame.render_widget(grid, columns[0]);
        } else {
            let game_over = self.render_game_over(state);
            frame.render_widget(game_over, columns[0]);
        }

        let sidebar = self.render_sidebar(state, status);
        frame.render_widget(sidebar, columns[1]);

        let controls = self.render_controls(state);
        frame.render_widget(controls, rows[1]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let lines: Vec<Line> = (0..state.grid.height())
            .map(|y| {
                let spans: Vec<Span> = (0..state.grid.width())
                    .map(|x| cell_kind(state, Position::new(x as i32, y as i32)).span())
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_sidebar(&self, state: &GameState, status: Option<&str>) -> Paragraph<'_> {
        let analytics = &state.analytics;
        let stat = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(label, Style::default().fg(Color::Yellow)),
                Span::styled(
                    value,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };

        let mut text = vec![
            stat("Score: ", state.score.to_string()),
            stat("Speed: ", state.speed.to_string()),
            stat("Length: ", state.snake.len().to_string()),
            stat(
                "Time: ",
                format!("{:.1}s", analytics.game_duration().as_secs_f64()),
            ),
            stat("Moves: ", analytics.movements().to_string()),
            stat(
                "Efficiency: ",
                format!("{:.1}%", analytics.calculate_efficiency()),
            ),
            Line::from(""),
        ];

        let instructions: [&str; 2] = if state.is_playing() {
            ["Use arrow keys to move", "Eat red food to grow"]
        } else {
            ["Press R to restart", "Press A for analytics"]
        };
        text.extend(
            instructions
                .into_iter()
                .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::Gray)))),
        );

        if let Some(message) = status {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Magenta),
            )));
        }

        Paragraph::new(text).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray))
                .title(" Stats "),
        )
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Time Alive: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.analytics.format_time(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "A",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for analytics", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let text = if state.is_playing() {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        } else {
            Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" restart | "),
                Span::styled("A", Style::default().fg(Color::Cyan)),
                Span::raw(" analytics | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten a buffer into text, one line per row
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Food, GameConfig, GameEngine, Phase};
    use ratatui::{Terminal, backend::TestBackend};

    fn state() -> GameState {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 11);
        let mut state = engine.reset();
        state.food = Food::new(Position::new(1, 1));
        state
    }

    #[test]
    fn test_cell_kinds() {
        let mut state = state();
        state.snake.grow();
        state.snake.move_forward();

        assert_eq!(cell_kind(&state, Position::new(6, 5)), CellKind::Head);
        assert_eq!(cell_kind(&state, Position::new(5, 5)), CellKind::Body);
        assert_eq!(cell_kind(&state, Position::new(1, 1)), CellKind::Food);
        assert_eq!(cell_kind(&state, Position::new(0, 9)), CellKind::Empty);
    }

    #[test]
    fn test_sidebar_shows_live_stats() {
        let state = state();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &state, Some("saved")))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Speed: 5"));
        assert!(text.contains("Length: 1"));
        assert!(text.contains("Efficiency: 0.0%"));
        assert!(text.contains("saved"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_panel() {
        let mut state = state();
        state.score = 40;
        state.phase = Phase::GameOver;

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &state, None))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 40"));
        assert!(text.contains("Time Alive: 00:0"));
        assert!(text.contains("Press R to restart"));
    }
}
