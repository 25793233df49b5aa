use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    food::Food,
    grid::Grid,
    snake::Snake,
    state::{GameState, Phase},
};
use crate::storage::GameRecord;

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the session speed went up this step
    pub speed_changed: bool,
    /// Summary of the session, present only on the step that ended it
    pub finished: Option<GameRecord>,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a fixed food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh session: one-cell snake in the centre, food elsewhere, clock running
    pub fn reset(&mut self) -> GameState {
        let grid = Grid::new(self.config.grid_width, self.config.grid_height);
        let snake = Snake::new(grid.center());
        let food = Food::spawn(snake.body(), &grid, &mut self.rng);

        let mut state = GameState::new(snake, food, grid, self.config.initial_speed);
        state.analytics.start_game();

        info!(
            player = %self.config.player_name,
            width = grid.width(),
            height = grid.height(),
            speed = state.speed,
            "Session started"
        );
        state
    }

    /// Apply a direction command
    ///
    /// Ignored outside `Playing`. While playing, every command counts as a
    /// movement even if the snake refuses the turn.
    pub fn turn(&mut self, state: &mut GameState, direction: Direction) -> bool {
        if !state.is_playing() {
            return false;
        }
        state.analytics.record_movement();
        state.snake.change_direction(direction)
    }

    /// Start over after a game over; ignored while playing
    pub fn restart(&mut self, state: &mut GameState) -> bool {
        if !state.is_game_over() {
            return false;
        }
        *state = self.reset();
        true
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        let mut result = StepResult::default();
        if !state.is_playing() {
            return result;
        }

        state.snake.move_forward();
        state.analytics.record_speed(state.speed);

        if state.snake.head() == state.food.position() {
            result.ate_food = true;
            result.speed_changed = self.eat_food(state);
        }

        if state.snake.check_collision(&state.grid) {
            state.phase = Phase::GameOver;
            state.analytics.finish_game();
            let record = self.summarize(state);
            info!(
                score = record.score,
                time_alive = record.time_alive_secs,
                food_eaten = record.food_eaten,
                movements = record.movements,
                "Game over"
            );
            result.finished = Some(record);
        }

        result
    }

    /// Returns whether the speed went up
    fn eat_food(&mut self, state: &mut GameState) -> bool {
        let previous = state.score;
        state.score += self.config.food_score;
        state.snake.grow();
        if !state
            .food
            .respawn(state.snake.body(), &state.grid, &mut self.rng)
        {
            debug!("No free cell left for food");
        }
        state.analytics.record_food_eaten();

        let every = self.config.speed_up_every;
        let sped_up = every > 0 && previous / every < state.score / every;
        if sped_up {
            state.speed += 1;
        }
        debug!(score = state.score, speed = state.speed, "Food eaten");
        sped_up
    }

    fn summarize(&self, state: &GameState) -> GameRecord {
        GameRecord {
            player_name: self.config.player_name.clone(),
            score: state.score,
            time_alive_secs: state.analytics.game_duration().as_secs_f64(),
            max_speed: state.analytics.max_speed(),
            food_eaten: state.analytics.food_eaten(),
            played_at: Utc::now(),
            movements: state.analytics.movements(),
            efficiency: state.analytics.calculate_efficiency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::small(), 3)
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::new(GameConfig::default());
        let state = engine.reset();

        assert!(state.is_playing());
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, 5);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(15, 15));
        assert!(!state.snake.occupies(state.food.position()));
        assert!(state.analytics.is_started());
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Food::new(Position::new(0, 0));
        let initial_head = state.snake.head();

        let result = engine.step(&mut state);

        assert!(result.finished.is_none());
        assert!(!result.ate_food);
        assert_eq!(state.snake.head(), initial_head.moved_by(1, 0));
        assert_eq!(state.analytics.speed_history().len(), 1);
        assert_eq!(state.analytics.max_speed(), 5);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = engine.reset();

        let head = state.snake.head();
        state.food = Food::new(head.moved_in_direction(state.snake.direction()));

        let result = engine.step(&mut state);

        assert!(result.ate_food);
        assert!(!result.speed_changed);
        assert_eq!(state.score, 10);
        assert_eq!(state.analytics.food_eaten(), 1);
        assert!(state.snake.is_growing());
        assert!(!state.snake.occupies(state.food.position()));

        engine.step(&mut state);
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_speed_up_every_fifty_points() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.score = 40;

        let head = state.snake.head();
        state.food = Food::new(head.moved_in_direction(state.snake.direction()));
        let result = engine.step(&mut state);

        assert!(result.speed_changed);
        assert_eq!(state.score, 50);
        assert_eq!(state.speed, 6);

        let head = state.snake.head();
        state.food = Food::new(head.moved_in_direction(state.snake.direction()));
        let result = engine.step(&mut state);
        assert!(!result.speed_changed);
        assert_eq!(state.speed, 6);
    }

    #[test]
    fn test_wall_collision_ends_session_once() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Food::new(Position::new(0, 0));

        // Centre is (5, 5); the fifth move right leaves the grid
        let mut finished = Vec::new();
        let mut ended_on = None;
        for tick in 1..=8 {
            if let Some(record) = engine.step(&mut state).finished {
                finished.push(record);
                ended_on = Some(tick);
            }
        }

        assert_eq!(finished.len(), 1);
        assert!(state.is_game_over());
        assert_eq!(ended_on, Some(5));
        assert_eq!(state.snake.head(), Position::new(10, 5));
        assert_eq!(finished[0].score, 0);
        assert_eq!(finished[0].player_name, "Player1");
        assert_eq!(finished[0].max_speed, 5);
    }

    #[test]
    fn test_turn_ignored_after_game_over() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.phase = Phase::GameOver;

        assert!(!engine.turn(&mut state, Direction::Up));
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.analytics.movements(), 0);
    }

    #[test]
    fn test_rejected_turn_still_counts_as_movement() {
        let mut engine = engine();
        let mut state = engine.reset();

        assert!(!engine.turn(&mut state, Direction::Left));
        assert!(engine.turn(&mut state, Direction::Down));
        assert_eq!(state.analytics.movements(), 2);
        assert_eq!(state.snake.direction(), Direction::Down);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.score = 30;

        assert!(!engine.restart(&mut state));
        assert_eq!(state.score, 30);

        state.phase = Phase::GameOver;
        state.speed = 9;
        assert!(engine.restart(&mut state));
        assert!(state.is_playing());
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, 5);
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.phase = Phase::GameOver;
        let head_before = state.snake.head();

        let result = engine.step(&mut state);

        assert_eq!(result, StepResult::default());
        assert_eq!(state.snake.head(), head_before);
        assert_eq!(state.analytics.speed_history().len(), 0);
    }

    #[test]
    fn test_tiny_grid_keeps_food_off_snake() {
        for seed in 0..20 {
            let mut engine = GameEngine::with_seed(GameConfig::new(1, 1), seed);
            let state = engine.reset();

            assert!(state.grid.contains(state.food.position()));
            assert!(!state.snake.occupies(state.food.position()));
        }
    }
}
