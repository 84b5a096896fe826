//! Terminal host for Fish & Boat Ladders.
//!
//! Commands:
//! - `play [--seed <n>] [--turns <n>]` - roll until someone wins (or `n` rolls)
//! - `roll [--value <1-6>]` - take a single turn
//! - `new [--force]` - start a new game, keeping names and statistics
//! - `stats` / `clear-stats` - show or reset the win counters
//! - `history` - list this game's moves, newest first
//! - `rename <player> <name>` - change a player's display name
//! - `init` - write a starter `fishboat.toml`
//!
//! The die position is saved after every command, so later rolls continue the
//! same seeded sequence until `play --seed` starts a new one.
use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use fishboat::config::Config;
use fishboat::core::{Board, GameRng, PlayerId};
use fishboat::host::{Renderer, Session, TextRenderer};
use fishboat::rules::TurnEngine;
use fishboat::store::{FileStore, Store};

#[derive(Parser)]
#[command(name = "fishboat")]
#[command(about = "Fish & Boat Ladders: sharks drag you down, boats carry you up")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "fishboat.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll for both players until the game ends
    Play {
        /// Seed for the die (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Stop after this many rolls
        #[arg(short, long)]
        turns: Option<u32>,
    },
    /// Take a single turn for the current player
    Roll {
        /// Use this face instead of rolling
        #[arg(long)]
        value: Option<u8>,
    },
    /// Start a new game
    New {
        /// Discard a game in progress without asking
        #[arg(short, long)]
        force: bool,
    },
    /// Show the lifetime win counters
    Stats,
    /// Reset the lifetime win counters
    ClearStats,
    /// List the moves of the current game
    History,
    /// Rename a player
    Rename {
        /// Player number (1 or 2)
        player: u8,
        /// New display name
        name: String,
    },
    /// Write a default configuration file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Init = cli.command {
        if std::path::Path::new(&cli.config).exists() {
            bail!("{} already exists", cli.config);
        }
        Config::create_default(&cli.config)?;
        println!("Wrote default configuration to {}", cli.config);
        return Ok(());
    }

    let config = Config::load_or_default(&cli.config)?;
    let engine = TurnEngine::new(Board::default(), config.rules.clone())?;
    let store = FileStore::open(&config.data_dir)?;
    let dice = match cli.command {
        Commands::Play { seed: Some(seed), .. } => GameRng::new(seed),
        _ => resume_dice(&store),
    };
    info!("die seed {}", dice.seed());

    let mut session = Session::open_with_names(engine, store, dice, &config.players.names());
    let stdout = io::stdout();
    let mut renderer = TextRenderer::new(stdout.lock());
    flush_notices(&mut session, &mut renderer)?;

    match cli.command {
        Commands::Play { turns, .. } => {
            if session.state().is_game_over {
                session.new_game();
            }
            let mut rolled = 0;
            while !session.state().is_game_over && turns.map_or(true, |t| rolled < t) {
                let report = session.roll()?;
                renderer.show_turn(&report, session.state())?;
                flush_notices(&mut session, &mut renderer)?;
                rolled += 1;
            }
            renderer.render(session.board(), session.state(), session.statistics())?;
        }
        Commands::Roll { value } => {
            let report = match value {
                Some(face) => session.apply_roll(face)?,
                None => session.roll()?,
            };
            renderer.show_turn(&report, session.state())?;
            renderer.render(session.board(), session.state(), session.statistics())?;
        }
        Commands::New { force } => {
            if session.game_in_progress() && !force {
                bail!("a game is in progress; pass --force to abandon it");
            }
            session.new_game();
            renderer.render(session.board(), session.state(), session.statistics())?;
        }
        Commands::Stats => {
            let stats = session.statistics();
            for id in PlayerId::all() {
                println!("{}: {} wins", session.state().player(id).name, stats.wins(id));
            }
            println!("Games played: {}", stats.total_games);
        }
        Commands::ClearStats => {
            session.clear_statistics();
            println!("Statistics cleared.");
        }
        Commands::History => renderer.show_history(session.state())?,
        Commands::Rename { player, name } => {
            let id = PlayerId::new(player)?;
            session.rename_player(id, &name)?;
            println!("{id} is now {}", session.state().player(id).name);
        }
        Commands::Init => {}
    }

    let checkpoint = session.dice().state();
    if let Err(e) = session.store_mut().save_dice_state(&checkpoint) {
        warn!("failed to save die position: {e}");
    }

    flush_notices(&mut session, &mut renderer)?;
    Ok(())
}

/// Continue the saved die sequence, or start a fresh one.
fn resume_dice(store: &FileStore) -> GameRng {
    match store.load_dice_state() {
        Ok(Some(saved)) => GameRng::from_state(&saved),
        Ok(None) => GameRng::from_entropy(),
        Err(e) => {
            warn!("discarding saved die position: {e}");
            GameRng::from_entropy()
        }
    }
}

fn flush_notices<S, D, W>(
    session: &mut Session<S, D>,
    renderer: &mut TextRenderer<W>,
) -> io::Result<()>
where
    S: Store,
    D: fishboat::core::DiceSource,
    W: Write,
{
    for notice in session.take_notices() {
        renderer.show_notice(&notice)?;
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    let base_level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    builder.parse_default_env();
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            record.level(),
            record.args()
        )
    });
    let _ = builder.try_init();
}
