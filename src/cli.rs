use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::GameConfig;
use crate::core::engine::Engine;
use crate::data::{self, DEFAULT_BOUNDARIES_SOURCE, DEFAULT_ITEMS_SOURCE};
use crate::games::food_guess::FoodGuessGame;
use crate::quiz::Session;

#[derive(Parser)]
#[command(name = "loc8abite")]
#[command(about = "🍝 Guess which country a dish comes from")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub play: PlayArgs,

    /// Where to write logs (the terminal is taken by the game)
    #[arg(long, global = true, default_value = "loc8abite.log")]
    pub log_file: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a session (the default)
    Play(PlayArgs),
    /// List the countries in the boundary data with their centroids
    Countries {
        /// URL or path of the GeoJSON boundaries
        #[arg(short, long, default_value = DEFAULT_BOUNDARIES_SOURCE)]
        boundaries: String,
    },
}

#[derive(Args, Clone)]
pub struct PlayArgs {
    /// URL or path of the item list
    #[arg(short, long, default_value = DEFAULT_ITEMS_SOURCE)]
    pub items: String,

    /// URL or path of the GeoJSON boundaries
    #[arg(short, long, default_value = DEFAULT_BOUNDARIES_SOURCE)]
    pub boundaries: String,

    /// TOML file with game rules
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for item order
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Play(args)) => play(args).await,
        Some(Commands::Countries { boundaries }) => list_countries(&boundaries).await,
        None => play(cli.play).await,
    }
}

async fn play(args: PlayArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading rules from {}", path.display()))?,
        None => GameConfig::default(),
    };

    // load both before touching the terminal so errors stay readable
    let (items, atlas) = tokio::try_join!(
        data::load_items(&args.items),
        data::load_atlas(&args.boundaries)
    )
    .context("game data unavailable")?;

    let session = Session::new(items, atlas, config, args.seed)?;
    let engine = Engine::new(FoodGuessGame::new(session));

    let terminal = ratatui::init();
    let result = engine.run(terminal).await;
    ratatui::restore();
    info!("terminal restored");
    result
}

async fn list_countries(source: &str) -> Result<()> {
    let atlas = data::load_atlas(source)
        .await
        .context("boundary data unavailable")?;

    println!("🗺️  {} countries", atlas.len());
    for name in atlas.country_names() {
        match atlas.centroid(name) {
            Some(c) => println!("  • {name:<40} {:>8.3} {:>9.3}", c.lat, c.lng),
            None => println!("  • {name:<40} (no outline)"),
        }
    }
    Ok(())
}
