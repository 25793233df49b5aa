use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use snake_stats::game::GameConfig;
use snake_stats::game::grid::MIN_SIDE;
use snake_stats::logging::init_tracing;
use snake_stats::modes::HumanMode;
use snake_stats::storage::SqliteStatsStore;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "snake_stats")]
#[command(version, about = "Snake game with live stats and game history analytics")]
struct Cli {
    /// Name stored with every finished game
    #[arg(long, default_value = "Player1")]
    player: String,

    /// Grid width
    #[arg(long, default_value = "30", value_parser = grid_side())]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "30", value_parser = grid_side())]
    height: usize,

    /// Starting speed in ticks per second
    #[arg(long, default_value = "5")]
    speed: u32,

    /// SQLite database holding game history
    #[arg(long, default_value = "snake_stats.db")]
    db: PathBuf,

    /// File receiving log output
    #[arg(long, default_value = "snake_stats.log")]
    log_file: PathBuf,
}

fn grid_side() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(MIN_SIDE as u64..)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    // Create game configuration from CLI arguments
    let config = GameConfig::new(cli.width, cli.height)
        .with_player(cli.player)
        .with_initial_speed(cli.speed);

    let store = SqliteStatsStore::open(&cli.db)
        .with_context(|| format!("Failed to open stats database {:?}", cli.db))?;
    info!(db = ?cli.db, player = %config.player_name, "Stats store opened");

    let mut human_mode = HumanMode::new(config, Box::new(store));
    human_mode.run().await?;

    Ok(())
}
