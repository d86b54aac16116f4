use geo_types::Point;

use crate::{
    as_the_crow_flies::AsTheCrowFliesRouter,
    graphhopper_api::{GraphHopperRouter, GraphHopperRouterParams},
    router::{RoutePath, Router, RouterError},
    router_provider::RouterProvider,
};

/// Router selected at runtime from a [`RouterProvider`].
pub enum RouterClient {
    GraphHopper(GraphHopperRouter),
    AsTheCrowFlies(AsTheCrowFliesRouter),
}

impl RouterClient {
    pub fn new(provider: RouterProvider) -> Self {
        match provider {
            RouterProvider::GraphHopper {
                base_url,
                profile,
                api_key,
            } => RouterClient::GraphHopper(GraphHopperRouter::new(GraphHopperRouterParams {
                base_url,
                profile,
                api_key,
            })),
            RouterProvider::AsTheCrowFlies => RouterClient::AsTheCrowFlies(AsTheCrowFliesRouter),
        }
    }
}

impl Router for RouterClient {
    async fn route(&self, from: Point<f64>, to: Point<f64>) -> Result<RoutePath, RouterError> {
        match self {
            RouterClient::GraphHopper(router) => router.route(from, to).await,
            RouterClient::AsTheCrowFlies(router) => router.route(from, to).await,
        }
    }
}
