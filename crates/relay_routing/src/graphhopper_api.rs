use std::{fmt::Display, str::FromStr};

use geo_types::{Coord, LineString, Point};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::router::{RoutePath, Router, RouterError};

pub const GRAPHHOPPER_DEFAULT_URL: &str = "http://localhost:8989";
pub const GRAPHHOPPER_ROUTE_API_PATH: &str = "/route";

#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GraphHopperProfile {
    #[default]
    Car,
    Bike,
    Foot,
    SmallTruck,
    Truck,
}

impl Display for GraphHopperProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GraphHopperProfile::Car => "car",
                GraphHopperProfile::Bike => "bike",
                GraphHopperProfile::Foot => "foot",
                GraphHopperProfile::SmallTruck => "small_truck",
                GraphHopperProfile::Truck => "truck",
            }
        )
    }
}

impl FromStr for GraphHopperProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(GraphHopperProfile::Car),
            "bike" => Ok(GraphHopperProfile::Bike),
            "foot" => Ok(GraphHopperProfile::Foot),
            "small_truck" => Ok(GraphHopperProfile::SmallTruck),
            "truck" => Ok(GraphHopperProfile::Truck),
            other => Err(format!("unknown GraphHopper profile: {other}")),
        }
    }
}

#[derive(Deserialize)]
struct RouteResponse {
    paths: Vec<ResponsePath>,
}

#[derive(Deserialize)]
struct ResponsePath {
    /// Distance in meters
    distance: f64,

    /// Only present as GeoJSON when `points_encoded=false`
    points: ResponsePoints,
}

#[derive(Deserialize)]
struct ResponsePoints {
    /// `[lon, lat]` or `[lon, lat, elevation]`
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct GraphHopperRouterParams {
    pub base_url: String,
    pub profile: GraphHopperProfile,
    pub api_key: Option<String>,
}

impl Default for GraphHopperRouterParams {
    fn default() -> Self {
        Self {
            base_url: GRAPHHOPPER_DEFAULT_URL.to_owned(),
            profile: GraphHopperProfile::default(),
            api_key: None,
        }
    }
}

/// Client for the GraphHopper `/route` endpoint, one request per point pair.
pub struct GraphHopperRouter {
    params: GraphHopperRouterParams,
    client: reqwest::Client,
}

impl GraphHopperRouter {
    pub fn new(params: GraphHopperRouterParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn params(&self) -> &GraphHopperRouterParams {
        &self.params
    }

    fn route_url(&self) -> String {
        let mut url = self.params.base_url.trim_end_matches('/').to_owned();
        url.push_str(GRAPHHOPPER_ROUTE_API_PATH);
        url
    }

    fn query(&self, from: Point<f64>, to: Point<f64>) -> Vec<(&'static str, String)> {
        // GraphHopper expects `lat,lon`
        let mut query = vec![
            ("point", format!("{},{}", from.y(), from.x())),
            ("point", format!("{},{}", to.y(), to.x())),
            ("profile", self.params.profile.to_string()),
            ("points_encoded", "false".to_owned()),
            ("instructions", "false".to_owned()),
        ];

        if let Some(api_key) = &self.params.api_key {
            query.push(("key", api_key.clone()));
        }

        query
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
        from: Point<f64>,
        to: Point<f64>,
    ) -> Result<RoutePath, RouterError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(RouterError::Api { status, message });
        }

        let bytes = response.bytes().await?;
        let route_response: RouteResponse = serde_json::from_slice(&bytes)?;

        let path = route_response
            .paths
            .into_iter()
            .next()
            .ok_or(RouterError::NoPath {
                from: from.x_y(),
                to: to.x_y(),
            })?;

        let coordinates = path
            .points
            .coordinates
            .iter()
            .filter(|coordinate| coordinate.len() >= 2)
            .map(|coordinate| Coord {
                x: coordinate[0],
                y: coordinate[1],
            })
            .collect::<Vec<_>>();

        Ok(RoutePath {
            distance: path.distance,
            geometry: LineString::new(coordinates),
        })
    }
}

impl Router for GraphHopperRouter {
    async fn route(&self, from: Point<f64>, to: Point<f64>) -> Result<RoutePath, RouterError> {
        debug!(
            "GraphHopper: routing ({}, {}) -> ({}, {})",
            from.y(),
            from.x(),
            to.y(),
            to.x()
        );

        let response = self
            .client
            .get(self.route_url())
            .query(&self.query(from, to))
            .send()
            .await?;

        self.handle_response(response, from, to).await
    }
}
