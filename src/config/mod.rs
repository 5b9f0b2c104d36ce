use std::env;

use url::Url;

use crate::utils::error::{Result, ServiceError};

/// All three services listen on the same fixed port.
pub const LISTEN_PORT: u16 = 3000;

pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_HELLO_SVC: &str = "http://hello:3000";
pub const DEFAULT_WORLD_SVC: &str = "http://world:3000";

/// Startup configuration for a leaf service, read once from the environment.
#[derive(Debug, Clone)]
pub struct LeafConfig {
    pub lang: String,
}

impl LeafConfig {
    pub fn from_env() -> Self {
        Self::new(env::var("LANG").ok())
    }

    pub fn new(lang: Option<String>) -> Self {
        Self {
            lang: lang.unwrap_or_else(|| DEFAULT_LANG.to_string()),
        }
    }
}

/// Startup configuration for the aggregator: the two leaf endpoints.
///
/// Endpoints are parsed as URLs up front so a malformed value fails at
/// startup instead of on the first incoming request.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub hello_svc: Url,
    pub world_svc: Url,
}

impl AggregatorConfig {
    pub fn from_env() -> Result<Self> {
        Self::new(env::var("HELLO_SVC").ok(), env::var("WORLD_SVC").ok())
    }

    pub fn new(hello_svc: Option<String>, world_svc: Option<String>) -> Result<Self> {
        Ok(Self {
            hello_svc: parse_endpoint(
                "HELLO_SVC",
                hello_svc.as_deref().unwrap_or(DEFAULT_HELLO_SVC),
            )?,
            world_svc: parse_endpoint(
                "WORLD_SVC",
                world_svc.as_deref().unwrap_or(DEFAULT_WORLD_SVC),
            )?,
        })
    }
}

fn parse_endpoint(name: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| ServiceError::ConfigError {
        message: format!("invalid {} endpoint '{}': {}", name, raw, e),
    })
}
