use geojson::{Feature, Geometry};
use geo_types::LineString;
use relay_optimizer::solver::solver::SolveResult;
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::Serialize;

fn feature_schema(_gen: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "oneOf": [
            { "type": "null" },
            {
                "type": "object",
                "required": ["type", "geometry", "properties"],
                "properties": {
                    "type": { "type": "string", "enum": ["Feature"] },
                    "geometry": {
                        "type": "object",
                        "required": ["type", "coordinates"],
                        "properties": {
                            "type": { "type": "string", "enum": ["LineString"] },
                            "coordinates": {
                                "type": "array",
                                "items": {
                                    "type": "array",
                                    "minItems": 2,
                                    "items": { "type": "number" }
                                }
                            }
                        }
                    },
                    "properties": { "oneOf": [{ "type": "null" }, { "type": "object" }] }
                }
            }
        ]
    })
}

#[derive(Serialize, JsonSchema)]
pub struct ApiRoute {
    pub vehicle: usize,
    /// Indices into the request points, starting with the depot.
    pub stops: Vec<usize>,
    /// Meters, without the return to the depot.
    pub distance: f64,
    /// Road geometry of the whole route. Null for unused vehicles or when
    /// geometry was not requested.
    #[schemars(schema_with = "feature_schema")]
    pub path: Option<Feature>,
}

#[derive(Serialize, JsonSchema)]
pub struct ApiSolution {
    pub routes: Vec<ApiRoute>,
    pub total_distance: f64,
    pub max_distance: f64,
    pub utilized_vehicles: usize,
    pub fitness: f64,
    pub algorithm: String,
    pub elapsed_ms: f64,
}

impl ApiSolution {
    /// `paths` holds one entry per vehicle when geometry was fetched.
    pub fn from_result(result: &SolveResult, paths: Option<Vec<Option<LineString<f64>>>>) -> Self {
        let mut paths = paths.map(|paths| paths.into_iter());

        let routes = result
            .solution
            .routes()
            .iter()
            .zip(&result.score.route_distances)
            .enumerate()
            .map(|(vehicle, (route, &distance))| ApiRoute {
                vehicle,
                stops: route.stops().to_vec(),
                distance,
                path: paths
                    .as_mut()
                    .and_then(|paths| paths.next())
                    .flatten()
                    .map(|line| line_feature(&line)),
            })
            .collect();

        ApiSolution {
            routes,
            total_distance: result.score.total_distance,
            max_distance: result.score.max_distance,
            utilized_vehicles: result.score.utilized_vehicles,
            fitness: result.score.fitness,
            algorithm: result.algorithm.to_string(),
            elapsed_ms: result.elapsed.as_secs_f64() * 1000.0,
        }
    }
}

fn line_feature(line: &LineString<f64>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(line))),
        id: None,
        properties: None,
        foreign_members: None,
    }
}
