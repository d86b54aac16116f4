pub mod as_the_crow_flies;
pub mod geometry;
pub mod graphhopper_api;
pub mod router;
pub mod router_client;
pub mod router_provider;
