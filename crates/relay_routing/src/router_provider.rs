use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graphhopper_api::{GRAPHHOPPER_DEFAULT_URL, GraphHopperProfile};

const ROUTER_ENV_VAR: &str = "RELAY_ROUTER";
const GRAPHHOPPER_URL_ENV_VAR: &str = "GRAPHHOPPER_URL";
const GRAPHHOPPER_PROFILE_ENV_VAR: &str = "GRAPHHOPPER_PROFILE";
const GRAPHHOPPER_API_KEY_ENV_VAR: &str = "GRAPHHOPPER_API_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterProviderError {
    #[error("Unknown router '{0}', expected 'graphhopper' or 'crow'")]
    UnknownRouter(String),

    #[error("{0}")]
    UnknownProfile(String),
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum RouterProvider {
    /// A self-hosted or hosted GraphHopper instance
    GraphHopper {
        base_url: String,
        profile: GraphHopperProfile,
        api_key: Option<String>,
    },
    /// Great-circle distance, no road network
    AsTheCrowFlies,
}

impl Default for RouterProvider {
    fn default() -> Self {
        RouterProvider::GraphHopper {
            base_url: GRAPHHOPPER_DEFAULT_URL.to_owned(),
            profile: GraphHopperProfile::default(),
            api_key: None,
        }
    }
}

impl RouterProvider {
    /// Parses a router name as given on the command line or in `RELAY_ROUTER`.
    pub fn from_name(name: &str) -> Result<Self, RouterProviderError> {
        match name {
            "graphhopper" | "gh" => Ok(RouterProvider::default()),
            "crow" | "as_the_crow_flies" => Ok(RouterProvider::AsTheCrowFlies),
            other => Err(RouterProviderError::UnknownRouter(other.to_owned())),
        }
    }

    pub fn from_env() -> Result<Self, RouterProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, RouterProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = lookup(ROUTER_ENV_VAR).unwrap_or_else(|| "graphhopper".to_owned());

        match Self::from_name(&name)? {
            RouterProvider::GraphHopper { .. } => {
                let profile = match lookup(GRAPHHOPPER_PROFILE_ENV_VAR) {
                    Some(profile) => profile
                        .parse()
                        .map_err(RouterProviderError::UnknownProfile)?,
                    None => GraphHopperProfile::default(),
                };

                Ok(RouterProvider::GraphHopper {
                    base_url: lookup(GRAPHHOPPER_URL_ENV_VAR)
                        .unwrap_or_else(|| GRAPHHOPPER_DEFAULT_URL.to_owned()),
                    profile,
                    api_key: lookup(GRAPHHOPPER_API_KEY_ENV_VAR),
                })
            }
            provider => Ok(provider),
        }
    }
}
