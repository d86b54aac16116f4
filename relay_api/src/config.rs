use anyhow::{Context, bail};
use relay_optimizer::{
    problem::matrix_builder::DEFAULT_MATRIX_CONCURRENCY,
    solver::solver::{DEFAULT_MAX_VEHICLES, MAX_VEHICLES},
};
use relay_routing::router_provider::RouterProvider;

const BIND_ADDRESS_ENV_VAR: &str = "RELAY_BIND_ADDRESS";
const MATRIX_CONCURRENCY_ENV_VAR: &str = "RELAY_MATRIX_CONCURRENCY";
const MAX_VEHICLES_ENV_VAR: &str = "RELAY_MAX_VEHICLES";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind_address: String,
    pub router: RouterProvider,
    pub matrix_concurrency: usize,
    /// Largest fleet a single request may ask for.
    pub max_vehicles: usize,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let matrix_concurrency = match lookup(MATRIX_CONCURRENCY_ENV_VAR) {
            Some(value) => value
                .parse::<usize>()
                .with_context(|| format!("{MATRIX_CONCURRENCY_ENV_VAR} must be a number"))?
                .max(1),
            None => DEFAULT_MATRIX_CONCURRENCY,
        };

        let max_vehicles = match lookup(MAX_VEHICLES_ENV_VAR) {
            Some(value) => {
                let max_vehicles = value
                    .parse::<usize>()
                    .with_context(|| format!("{MAX_VEHICLES_ENV_VAR} must be a number"))?;
                if max_vehicles == 0 || max_vehicles > MAX_VEHICLES {
                    bail!("{MAX_VEHICLES_ENV_VAR} must be between 1 and {MAX_VEHICLES}");
                }
                max_vehicles
            }
            None => DEFAULT_MAX_VEHICLES,
        };

        Ok(ApiConfig {
            bind_address: lookup(BIND_ADDRESS_ENV_VAR)
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_owned()),
            router: RouterProvider::from_lookup(&lookup)?,
            matrix_concurrency,
            max_vehicles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.matrix_concurrency, 8);
        assert_eq!(config.max_vehicles, 1_000);
        assert_eq!(config.router, RouterProvider::default());
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(|key| match key {
            "RELAY_BIND_ADDRESS" => Some("0.0.0.0:3000".to_owned()),
            "RELAY_MATRIX_CONCURRENCY" => Some("0".to_owned()),
            "RELAY_ROUTER" => Some("crow".to_owned()),
            "RELAY_MAX_VEHICLES" => Some("25".to_owned()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:3000");
        assert_eq!(config.matrix_concurrency, 1);
        assert_eq!(config.max_vehicles, 25);
        assert_eq!(config.router, RouterProvider::AsTheCrowFlies);
    }

    #[test]
    fn test_invalid_concurrency() {
        let result = ApiConfig::from_lookup(|key| {
            (key == "RELAY_MATRIX_CONCURRENCY").then(|| "many".to_owned())
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_max_vehicles() {
        for value in ["0", "none", "10001"] {
            let result = ApiConfig::from_lookup(|key| {
                (key == "RELAY_MAX_VEHICLES").then(|| value.to_owned())
            });

            assert!(result.is_err(), "{value} should be rejected");
        }
    }
}
