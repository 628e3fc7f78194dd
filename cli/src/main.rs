use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use damage_display_cli::commands;
use damage_display_cli::host::ConsoleSink;
use damage_display_cli::readline;
use damage_display_core::{DisplayConfig, ServiceHandle, TrackerSettings, TrackingService, config};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Simulate a game host feeding the damage display")]
struct Args {
    /// Read settings from this TOML file instead of the per-user store
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("DAMAGE_DISPLAY_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<DisplayConfig, String> {
    match path {
        // An explicit file must load; no silent fallback
        Some(path) => config::load_file(path).map_err(|e| e.to_string()),
        None => Ok(config::load_stored().unwrap_or_else(|e| {
            warn!(error = %e, "Stored settings unusable, using defaults");
            DisplayConfig::default()
        })),
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_logging();

    let args = Args::parse();
    let display_config = load_config(args.config.as_ref())?;
    let settings = TrackerSettings::from_config(&display_config).map_err(|e| e.to_string())?;
    info!(channel_id = settings.channels.channel_id, "Settings loaded");

    let service = TrackingService::start(settings, ConsoleSink);
    let handle = service.handle();

    loop {
        let Some(line) = readline()? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &handle, &display_config).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    service.stop().await.map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(version, about = "damage-display")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// One participant hits another
    Damage {
        #[arg(short, long)]
        from: u64,
        #[arg(short, long)]
        to: u64,
        #[arg(short, long)]
        amount: f32,
        #[arg(long, default_value_t = 1.0)]
        armor: f32,
        /// Another handler already refused the hit
        #[arg(long)]
        denied: bool,
    },
    /// A participant damages a structure
    Structure {
        #[arg(short, long)]
        from: u64,
        #[arg(short, long)]
        amount: u16,
    },
    /// A creature takes damage, from a participant when `from` is given
    Creature {
        #[arg(short, long)]
        from: Option<u64>,
        #[arg(short, long)]
        amount: f32,
    },
    Disconnect {
        actor: u64,
    },
    /// Flip an actor's display preference
    Toggle {
        actor: u64,
    },
    Show {
        actor: u64,
    },
    Sweep,
    Stats,
    Config,
    Exit,
}

async fn respond(
    line: &str,
    handle: &ServiceHandle,
    display_config: &DisplayConfig,
) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "damage-display".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Damage {
            from,
            to,
            amount,
            armor,
            denied,
        }) => commands::player_damage(handle, from, to, amount, armor, denied).await?,
        Some(Commands::Structure { from, amount }) => {
            commands::structure_damage(handle, from, amount).await?
        }
        Some(Commands::Creature { from, amount }) => {
            commands::creature_damage(handle, from, amount).await?
        }
        Some(Commands::Disconnect { actor }) => commands::disconnect(handle, actor).await?,
        Some(Commands::Toggle { actor }) => commands::toggle(handle, actor).await?,
        Some(Commands::Show { actor }) => commands::show(handle, actor).await?,
        Some(Commands::Sweep) => commands::sweep(handle).await?,
        Some(Commands::Stats) => commands::show_stats(handle).await?,
        Some(Commands::Config) => commands::show_settings(display_config),
        Some(Commands::Exit) => return Ok(true),
        None => {}
    }
    Ok(false)
}
