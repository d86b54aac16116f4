use std::{path::PathBuf, sync::Arc};

use clap::Args;
use relay_optimizer::problem::matrix_builder::{DEFAULT_MATRIX_CONCURRENCY, build_distance_matrix};
use relay_routing::{router_client::RouterClient, router_provider::RouterProvider};
use tracing::info;

use crate::{
    input::{CliInput, write_json},
    parsers,
    progress::ProgressObserver,
};

#[derive(Args)]
pub struct MatrixArgs {
    /// Problem file with `points` as [lon, lat] pairs
    #[arg(short, long)]
    input: PathBuf,

    /// Where to store the matrix
    #[arg(short, long)]
    output: PathBuf,

    /// crow or graphhopper. Defaults to RELAY_ROUTER, then graphhopper
    #[arg(short, long, value_parser = parsers::parse_router)]
    router: Option<RouterProvider>,

    #[arg(long, default_value_t = DEFAULT_MATRIX_CONCURRENCY)]
    concurrency: usize,
}

pub async fn run(args: MatrixArgs) -> anyhow::Result<()> {
    let points = CliInput::from_file(&args.input)?.points()?;

    let provider = match args.router {
        Some(provider) => provider,
        None => RouterProvider::from_env()?,
    };
    let router = RouterClient::new(provider);
    let observer = Arc::new(ProgressObserver::new());

    let matrix = build_distance_matrix(&router, &points, args.concurrency, observer.as_ref()).await?;
    observer.finish();

    write_json(&args.output, &matrix)?;
    info!(
        "Wrote {0}x{0} matrix to {1}",
        matrix.num_locations(),
        args.output.display()
    );

    Ok(())
}
