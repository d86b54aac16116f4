use relay_optimizer::solver::solver_params::Algorithm;
use relay_routing::router_provider::RouterProvider;

pub fn parse_algorithm(input: &str) -> Result<Algorithm, String> {
    input
        .parse::<Algorithm>()
        .map_err(|error| error.to_string())
}

/// Resolves a router name, taking GraphHopper settings from the environment.
pub fn parse_router(input: &str) -> Result<RouterProvider, String> {
    RouterProvider::from_lookup(|key| {
        if key == "RELAY_ROUTER" {
            Some(input.to_owned())
        } else {
            std::env::var(key).ok()
        }
    })
    .map_err(|error| error.to_string())
}
