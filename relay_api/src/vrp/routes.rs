use std::sync::Arc;

use axum::{Json, Router, routing::get};
use schemars::schema_for;
use serde_json::{Value, json};

use crate::state::AppState;

use super::{
    api_solution::ApiSolution, get_handler::get_handler, post_handler::PostVrpBody,
    post_handler::post_handler,
};

pub fn vrp_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/vrp", get(get_handler).post(post_handler))
        .route("/vrp/schema", get(schema_handler))
        .with_state(state)
}

async fn schema_handler() -> Json<Value> {
    Json(json!({
        "request": schema_for!(PostVrpBody),
        "response": schema_for!(ApiSolution),
    }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use relay_routing::{router_client::RouterClient, router_provider::RouterProvider};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        vrp_routes(Arc::new(AppState {
            router: RouterClient::new(RouterProvider::AsTheCrowFlies),
            matrix_concurrency: 4,
            max_vehicles: 50,
        }))
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get(uri: &str) -> Response {
        app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post(body: Value) -> Response {
        app()
            .oneshot(
                Request::post("/vrp")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_vrp() {
        let response = get(
            "/vrp?point=52.2297,21.0122&point=52.2400,21.0300&point=52.2100,20.9800&cars=2",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;

        let routes = body["routes"].as_array().unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(body["algorithm"], "greedy");

        let mut visited: Vec<u64> = routes
            .iter()
            .flat_map(|route| route["stops"].as_array().unwrap().iter().skip(1))
            .map(|stop| stop.as_u64().unwrap())
            .collect();
        visited.sort_unstable();
        assert_eq!(visited, vec![1, 2]);

        for route in routes {
            let stops = route["stops"].as_array().unwrap().len();
            if stops > 1 {
                assert_eq!(route["path"]["geometry"]["type"], "LineString");
                let coordinates = route["path"]["geometry"]["coordinates"].as_array().unwrap();
                assert_eq!(coordinates.len(), stops);
            } else {
                assert!(route["path"].is_null());
            }
        }
    }

    #[tokio::test]
    async fn test_post_vrp_annealing() {
        let response = post(json!({
            "points": [[21.0122, 52.2297], [21.03, 52.24], [20.98, 52.21], [21.05, 52.20]],
            "vehicles": 2,
            "algorithm": "annealing",
            "seed": 3,
            "geometry": false,
        }))
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;

        assert_eq!(body["algorithm"], "annealing:very-fast");
        assert!(body["routes"][0]["path"].is_null());
        assert!(body["total_distance"].as_f64().unwrap() > 0.0);
        assert!(body["fitness"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_invalid_vehicle_count() {
        let response = get("/vrp?point=52.2297,21.0122&point=52.24,21.03&vehicles=0").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = post(json!({ "points": [[21.0, 52.0]], "vehicles": -3 })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_fleet() {
        let response = get(
            "/vrp?point=52.2297,21.0122&point=52.24,21.03&vehicles=1000000000000&geometry=false",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get("/vrp?point=52.2297,21.0122&point=52.24,21.03&vehicles=51").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = post(json!({ "points": [[21.0, 52.0]], "vehicles": 1_000_000_000_000_i64 })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get("/vrp?point=52.2297,21.0122&point=52.24,21.03&vehicles=50&geometry=false").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_points() {
        let response = get("/vrp?vehicles=2").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let response = post(json!({ "points": "nope", "vehicles": 1 })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = post(json!({ "points": [[500.0, 52.0]], "vehicles": 1 })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_schema() {
        let response = get("/vrp/schema").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["request"]["properties"]["points"].is_object());
        assert!(body["response"]["properties"]["routes"].is_object());
    }
}
