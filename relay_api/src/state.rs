use relay_routing::router_client::RouterClient;

pub struct AppState {
    pub router: RouterClient,
    pub matrix_concurrency: usize,
    pub max_vehicles: usize,
}
