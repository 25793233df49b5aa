pub mod analytics;
pub mod report;

pub use analytics::{AnalyticsRecorder, SPEED_HISTORY_CAPACITY, format_duration};
pub use report::{AnalyticsReport, LEADERBOARD_SIZE, RECENT_GAMES, ReportError};
