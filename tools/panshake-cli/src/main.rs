//! PanShake CLI — Apply camera shake to pan/crop keyframes.
//!
//! Usage:
//!   panshake init <PATH>       Create a project file with one selected clip
//!   panshake info <PATH>       Show project information
//!   panshake shake <PATH>      Shake the selected clip
//!   panshake preview           Print the transform sequence
//!   panshake config            Show or write the configuration file

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use panshake_common::AppConfig;

mod commands;

use commands::shake::SettingsArgs;

#[derive(Parser)]
#[command(
    name = "panshake",
    about = "Sinusoidal camera shake for pan/crop keyframes",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project file holding one selected clip
    Init {
        /// Path of the project file to create
        path: PathBuf,

        /// Project name
        #[arg(short, long, default_value = "shake")]
        name: String,

        /// Clip width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Clip height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Clip length in frames
        #[arg(long, default_value = "300")]
        frames: u64,
    },

    /// Show project information
    Info {
        /// Path to the project file
        path: PathBuf,
    },

    /// Shake the selected clip of a project
    Shake {
        /// Path to the project file
        path: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Apply the shake even if it inverts undersized keyframes
        #[arg(long)]
        allow_degenerate: bool,

        /// Compute and report without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the transform sequence for a full-frame clip
    Preview {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Number of frames
        #[arg(long, default_value = "24")]
        frames: u64,

        /// Frame width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        write_defaults: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    logging.json |= cli.log_json;
    panshake_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Init {
            path,
            name,
            width,
            height,
            frames,
        } => commands::init::run(path, name, width, height, frames),
        Commands::Info { path } => commands::info::run(path),
        Commands::Shake {
            path,
            settings,
            allow_degenerate,
            dry_run,
        } => commands::shake::run(path, settings, allow_degenerate, dry_run, &config),
        Commands::Preview {
            settings,
            frames,
            width,
            height,
            json,
        } => commands::preview::run(settings, frames, width, height, json, &config),
        Commands::Config { write_defaults } => commands::config::run(&config, write_defaults),
    }
}
