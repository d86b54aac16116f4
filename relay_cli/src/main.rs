use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{matrix::MatrixArgs, solve::SolveArgs};

mod input;
mod matrix;
mod parsers;
mod progress;
mod solve;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign and order stops for a fleet of vehicles
    #[command(visible_alias = "s")]
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Build a distance matrix and store it for later runs
    #[command(visible_alias = "m")]
    Matrix {
        #[command(flatten)]
        args: MatrixArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Solve { args } => solve::run(args).await?,
        Commands::Matrix { args } => matrix::run(args).await?,
    }

    Ok(())
}
