pub mod api_solution;
pub mod get_handler;
pub mod post_handler;
pub mod routes;
pub mod solve;
