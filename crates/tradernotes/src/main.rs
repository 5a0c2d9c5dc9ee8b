use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tradernotes::cache::CacheStore;
use tradernotes::models::cache_schema::{CONFIG_FILE_NAME, DEFAULT_WORLD_ID};
use tradernotes::models::{Position, TraderId, TraderRecord};
use tradernotes::overlay::{strip_markup, TooltipContext};
use tradernotes::TraderNotes;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tradernotes", about = "Inspect a TraderNotes trader cache")]
struct Cli {
    /// Game data directory containing ModData/
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// World identifier the cache belongs to
    #[arg(short, long, default_value = DEFAULT_WORLD_ID)]
    world: String,

    /// Directory holding tradernotes.toml
    #[arg(short, long, default_value = "ModConfig")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every cached trader
    List {
        /// Only traders whose offers have been seen
        #[arg(long)]
        discovered: bool,
    },
    /// Print a trader's map tooltip
    Show {
        id: i64,

        /// World time in days, for the refresh countdown
        #[arg(long, default_value_t = 0.0)]
        now: f64,

        /// Player position as x,y,z, for the distance line
        #[arg(long, value_parser = parse_position)]
        player: Option<Position>,

        /// Print the raw record as JSON instead
        #[arg(long)]
        json: bool,

        /// Keep the tooltip markup
        #[arg(long)]
        markup: bool,
    },
}

fn parse_position(text: &str) -> Result<Position, String> {
    let parts: Vec<f64> = text
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Position::new(*x, *y, *z)),
        _ => Err("expected x,y,z".to_string()),
    }
}

fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load the world's cache
    let store = CacheStore::for_world(&cli.data_dir, &cli.world);
    let records = store
        .load()
        .with_context(|| format!("Failed to load trader cache: {}", store.path().display()))?;

    match cli.command {
        Command::List { discovered } => {
            for record in records.values().filter(|r| r.discovered || !discovered) {
                println!("{}", summary_line(record));
            }
        }
        Command::Show {
            id,
            now,
            player,
            json,
            markup,
        } => {
            let record = records
                .get(&TraderId(id))
                .with_context(|| format!("No trader with id {id} in {}", store.path().display()))?;

            // Raw record, no config needed
            if json {
                println!("{}", serde_json::to_string_pretty(record)?);
                return Ok(());
            }

            // Render the tooltip
            let notes = TraderNotes::start_read_only(&cli.config_dir.join(CONFIG_FILE_NAME));
            let ctx = TooltipContext {
                now,
                player,
                loaded: true,
            };
            let text = notes.presenter().tooltip(record, &ctx);
            if markup {
                print!("{text}");
            } else {
                print!("{}", strip_markup(&text));
            }
        }
    }

    Ok(())
}

fn summary_line(record: &TraderRecord) -> String {
    format!(
        "{:>8}  {:<20} {:<12} {:>6} sells={:<3} wants={:<3} {} at ({:.0}, {:.0}, {:.0})",
        record.id.0,
        record.display_name,
        record.trader_type.as_str(),
        record.funds,
        record.sells.len(),
        record.wants.len(),
        if record.discovered { "seen" } else { "unseen" },
        record.position.x,
        record.position.y,
        record.position.z,
    )
}
