use std::env;

use tracing::debug;

use crate::spoonacular::DEFAULT_BASE_URL;

const API_KEY_VARS: [&str; 2] = ["SPOONACULAR_API_KEY", "VITE_SPOONACULAR_API_KEY"];
const BASE_URL_VAR: &str = "SPOONACULAR_BASE_URL";

pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// A missing API key is not fatal here. Remote calls report it per request
    /// and `serve` warns about it at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = API_KEY_VARS.iter().find_map(|var| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        });

        let base_url = lookup(BASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                debug!("{BASE_URL_VAR} not set, using default: {DEFAULT_BASE_URL}");
                DEFAULT_BASE_URL.to_string()
            });

        Config { api_key, base_url }
    }
}
