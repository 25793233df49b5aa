use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How many speed samples are kept
pub const SPEED_HISTORY_CAPACITY: usize = 100;

/// Per-session counters fed by the game engine
///
/// Counts direction commands, food eaten and speed samples, and measures
/// how long the current session has been running.
#[derive(Debug, Clone)]
pub struct AnalyticsRecorder {
    start_time: Option<Instant>,
    /// Set once the session ends; freezes the clock
    end_time: Option<Instant>,
    movements: u32,
    food_eaten: u32,
    max_speed: u32,
    speed_history: VecDeque<u32>,
}

impl AnalyticsRecorder {
    pub fn new() -> Self {
        Self {
            start_time: None,
            end_time: None,
            movements: 0,
            food_eaten: 0,
            max_speed: 0,
            speed_history: VecDeque::with_capacity(SPEED_HISTORY_CAPACITY),
        }
    }

    /// Reset every counter and start the clock
    pub fn start_game(&mut self) {
        self.start_time = Some(Instant::now());
        self.end_time = None;
        self.movements = 0;
        self.food_eaten = 0;
        self.max_speed = 0;
        self.speed_history.clear();
    }

    pub fn record_movement(&mut self) {
        self.movements += 1;
    }

    pub fn record_food_eaten(&mut self) {
        self.food_eaten += 1;
    }

    pub fn record_speed(&mut self, speed: u32) {
        if self.speed_history.len() >= SPEED_HISTORY_CAPACITY {
            self.speed_history.pop_front();
        }
        self.speed_history.push_back(speed);
        self.max_speed = self.max_speed.max(speed);
    }

    /// Stop the clock at the moment the session ended
    pub fn finish_game(&mut self) {
        if self.start_time.is_some() && self.end_time.is_none() {
            self.end_time = Some(Instant::now());
        }
    }

    /// Time since `start_game` (or until `finish_game`), zero before the first session
    pub fn game_duration(&self) -> Duration {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            (None, _) => Duration::ZERO,
        }
    }

    /// Food eaten per direction command, as a percentage
    pub fn calculate_efficiency(&self) -> f64 {
        if self.movements == 0 {
            return 0.0;
        }
        f64::from(self.food_eaten) / f64::from(self.movements) * 100.0
    }

    pub fn movements(&self) -> u32 {
        self.movements
    }

    pub fn food_eaten(&self) -> u32 {
        self.food_eaten
    }

    pub fn max_speed(&self) -> u32 {
        self.max_speed
    }

    pub fn speed_history(&self) -> &VecDeque<u32> {
        &self.speed_history
    }

    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn format_time(&self) -> String {
        format_duration(self.game_duration())
    }
}

impl Default for AnalyticsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// `MM:SS`, minutes unbounded
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
