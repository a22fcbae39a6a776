//! cmdplus - headless operator console for item modification commands
//!
//! Runs `modifyitem` commands from a script or stdin against a world snapshot.

mod command_script;
mod config;
mod console;

use anyhow::Result;
use clap::Parser;
use cmdplus_commands::CommandDispatcher;
use cmdplus_testkit::{demo_world, JsonlSink};
use cmdplus_world::World;
use command_script::CommandScriptPlayer;
use config::ConsoleConfig;
use console::Console;
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Console configuration file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// World snapshot to load instead of the configured one
    #[arg(long)]
    world: Option<PathBuf>,

    /// JSON command script; commands are read from stdin when omitted
    #[arg(long)]
    script: Option<PathBuf>,

    /// Save the resulting world snapshot here
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write a JSONL transcript of every command here
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Run commands as this player
    #[arg(long = "as")]
    as_player: Option<String>,

    /// Print the command grammar and exit
    #[arg(long)]
    list_commands: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // WARN by default; RUST_LOG wins over the config's log_filter.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(ConsoleConfig::peek_log_filter(&args.config))
            }),
        )
        .init();

    info!("Starting cmdplus v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ConsoleConfig::load_from_path(&args.config);
    if args.world.is_some() {
        config.world = args.world;
    }
    if args.as_player.is_some() {
        config.operator.as_player = args.as_player;
    }

    let dispatcher = CommandDispatcher::with_builtin_commands();
    if args.list_commands {
        for usage in dispatcher.usage() {
            println!("{usage}");
        }
        return Ok(());
    }

    let (world, world_label) = match &config.world {
        Some(path) => (World::load_json(path)?, path.display().to_string()),
        None => (demo_world().0, "demo".to_string()),
    };
    let mut console = Console::new(world, dispatcher, &config)?;
    if let Some(path) = &args.transcript {
        console.record_to(JsonlSink::create(path)?, &world_label)?;
    }

    let mut out = io::stdout().lock();
    let summary = match &args.script {
        Some(path) => console.run_script(CommandScriptPlayer::from_path(path)?, &mut out)?,
        None => console.run_lines(io::stdin().lock(), &mut out)?,
    };
    info!(
        commands = summary.commands,
        failed = summary.failed,
        "Session finished"
    );

    if let Some(path) = &args.output {
        console.world().save_json(path)?;
        info!("Saved world to {}", path.display());
    }
    Ok(())
}
