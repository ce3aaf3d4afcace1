//! CLI frontend for The Cabin.

mod commands;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cabin",
    about = "The Cabin: a text adventure in the northern woods",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in this terminal
    Play {
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for wildlife placement
        #[arg(short, long)]
        seed: Option<u64>,

        /// Never call the remote interpreter
        #[arg(long)]
        offline: bool,

        /// Directory for save slots
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },

    /// Serve sessions over a websocket
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8765")]
        addr: SocketAddr,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Never call the remote interpreter
        #[arg(long)]
        offline: bool,

        /// Directory for save slots
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },

    /// List saved games
    Saves {
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory for save slots
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            config,
            seed,
            offline,
            save_dir,
        } => commands::Options {
            config,
            seed,
            offline,
            save_dir,
        }
        .load()
        .and_then(|cfg| commands::play::run(&cfg)),
        Commands::Serve {
            addr,
            config,
            offline,
            save_dir,
        } => commands::Options {
            config,
            seed: None,
            offline,
            save_dir,
        }
        .load()
        .and_then(|cfg| commands::serve::run(&cfg, addr)),
        Commands::Saves { config, save_dir } => commands::Options {
            config,
            save_dir,
            ..commands::Options::default()
        }
        .load()
        .and_then(|cfg| commands::saves::run(&cfg)),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
