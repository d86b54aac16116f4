use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject};
use relay_optimizer::{
    planner::{Plan, PlanOptions, plan, solve_blocking},
    problem::matrix_builder::DEFAULT_MATRIX_CONCURRENCY,
    solver::{
        solver::{MAX_VEHICLES, validate_vehicle_count},
        solver_params::{Algorithm, SolverParams},
    },
};
use relay_routing::{
    geometry::stitch_route_geometry, router_client::RouterClient, router_provider::RouterProvider,
};
use serde_json::json;
use tracing::info;

use crate::{
    input::{CliInput, read_matrix},
    parsers,
    progress::ProgressObserver,
};

#[derive(Args)]
pub struct SolveArgs {
    /// Problem file with `points` as [lon, lat] pairs and an optional `vehicles`
    #[arg(short, long)]
    input: PathBuf,

    /// greedy, annealing or annealing:<very-fast|fast|moderate|slow|thorough>
    #[arg(short, long, value_parser = parsers::parse_algorithm, default_value = "greedy")]
    algorithm: Algorithm,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Overrides the vehicle count of the input file
    #[arg(short, long, allow_negative_numbers = true)]
    vehicles: Option<i64>,

    /// Reuse a matrix written by the `matrix` command instead of calling the router
    #[arg(short, long)]
    matrix: Option<PathBuf>,

    /// crow or graphhopper. Defaults to RELAY_ROUTER, then graphhopper
    #[arg(short, long, value_parser = parsers::parse_router)]
    router: Option<RouterProvider>,

    #[arg(long, default_value_t = DEFAULT_MATRIX_CONCURRENCY)]
    concurrency: usize,

    /// Write the routes as a GeoJSON FeatureCollection
    #[arg(short, long)]
    geometry: Option<PathBuf>,
}

pub async fn run(args: SolveArgs) -> anyhow::Result<()> {
    let input = CliInput::from_file(&args.input)?;
    let points = input.points()?;
    let vehicles = args
        .vehicles
        .or(input.vehicles)
        .context("No vehicle count in the input file, pass --vehicles")?;

    let provider = match args.router {
        Some(provider) => provider,
        None => RouterProvider::from_env()?,
    };
    let router = RouterClient::new(provider);

    let solver = SolverParams {
        algorithm: args.algorithm,
        seed: args.seed,
    };
    let observer = Arc::new(ProgressObserver::new());

    let Plan { matrix, result } = match &args.matrix {
        Some(path) => {
            let vehicle_count = validate_vehicle_count(vehicles, MAX_VEHICLES)?;
            let matrix = read_matrix(path)?;
            if !points.is_empty() && matrix.num_locations() != points.len() {
                bail!(
                    "Matrix has {} locations but the input has {} points",
                    matrix.num_locations(),
                    points.len()
                );
            }

            solve_blocking(matrix, vehicle_count, solver, observer.clone()).await?
        }
        None => {
            let options = PlanOptions {
                solver,
                matrix_concurrency: args.concurrency,
                max_vehicles: MAX_VEHICLES,
            };

            plan(&router, &points, vehicles, &options, observer.clone()).await?
        }
    };
    observer.finish();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Vehicle", "Stops", "Distance (m)"]);

    for (vehicle, (route, distance)) in result
        .solution
        .routes()
        .iter()
        .zip(&result.score.route_distances)
        .enumerate()
    {
        let stops = route
            .stops()
            .iter()
            .map(|stop| stop.to_string())
            .collect::<Vec<_>>()
            .join(" → ");

        table.add_row(vec![
            (vehicle + 1).to_string(),
            stops,
            format!("{distance:.1}"),
        ]);
    }

    println!("{table}");
    println!(
        "{} stops, {} vehicles used of {}, total {:.1} m, longest {:.1} m, fitness {:.4}, {} in {:#}",
        matrix.num_locations().saturating_sub(1),
        result.score.utilized_vehicles,
        result.solution.vehicle_count(),
        result.score.total_distance,
        result.score.max_distance,
        result.score.fitness,
        result.algorithm,
        result.elapsed,
    );

    if let Some(output) = &args.geometry {
        if points.len() != matrix.num_locations() {
            bail!("Geometry output needs the input points");
        }

        let mut features = Vec::new();
        for (vehicle, route) in result.solution.routes().iter().enumerate() {
            if route.is_empty() {
                continue;
            }

            let line = stitch_route_geometry(&router, &points, route.stops()).await?;

            let mut properties = JsonObject::new();
            properties.insert("vehicle".to_owned(), json!(vehicle));
            properties.insert(
                "distance".to_owned(),
                json!(result.score.route_distances[vehicle]),
            );
            properties.insert("stops".to_owned(), json!(route.stops()));

            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&line))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            });
        }

        let collection = GeoJson::from(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        });
        std::fs::write(output, collection.to_string())
            .with_context(|| format!("Cannot write {}", output.display()))?;

        info!("Routes written to {}", output.display());
    }

    Ok(())
}
