use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::AggregatorConfig;
use crate::core::dedup::unique_by;
use crate::utils::error::{Result, ServiceError};

/// Body shape shared by both leaves; each one fills in its own display field
/// and leaves the other absent.
#[derive(Debug, Deserialize)]
pub struct LeafReply {
    #[serde(default)]
    pub greeting: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    pub lang: String,
    pub host: String,
}

#[derive(Debug, Serialize)]
pub struct AggregateReply {
    pub message: String,
    pub hosts: [String; 3],
    pub langs: Vec<String>,
}

/// Request-independent aggregator state: the two leaf endpoints, a shared
/// HTTP client, and this process's own hostname.
pub struct AggregatorState {
    config: AggregatorConfig,
    client: Client,
    host: String,
}

impl AggregatorState {
    pub fn new(config: AggregatorConfig, host: String) -> Self {
        Self {
            config,
            client: Client::new(),
            host,
        }
    }

    /// Fans out to both leaves concurrently, waits for both, and merges the
    /// pair. Pairing is positional: slot 0 is always the hello leaf, slot 1
    /// the world leaf, regardless of which responds first. A failure from
    /// either leaf fails the whole aggregation.
    pub async fn aggregate(&self) -> Result<AggregateReply> {
        tracing::debug!("fanning out to hello and world leaves");
        let (hello, world) = tokio::try_join!(
            self.fetch("hello", &self.config.hello_svc),
            self.fetch("world", &self.config.world_svc),
        )?;
        Ok(self.compose(hello, world))
    }

    async fn fetch(&self, service: &'static str, endpoint: &Url) -> Result<LeafReply> {
        let response = self
            .client
            .get(endpoint.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| ServiceError::Upstream { service, source })?;

        response
            .json()
            .await
            .map_err(|source| ServiceError::Upstream { service, source })
    }

    fn compose(&self, hello: LeafReply, world: LeafReply) -> AggregateReply {
        let replies = [hello, world];
        let langs = unique_by(&replies, |r| r.lang.clone());
        let [hello, world] = replies;

        AggregateReply {
            message: format!(
                "{} {}",
                hello.greeting.as_deref().unwrap_or_default(),
                world.recipient.as_deref().unwrap_or_default()
            ),
            hosts: [hello.host, world.host, self.host.clone()],
            langs,
        }
    }
}

pub fn router(state: Arc<AggregatorState>) -> Router {
    Router::new().fallback(serve_aggregate).with_state(state)
}

async fn serve_aggregate(
    State(state): State<Arc<AggregatorState>>,
) -> std::result::Result<Json<AggregateReply>, ServiceError> {
    let reply = state.aggregate().await?;
    tracing::debug!(message = %reply.message, "merged leaf responses");
    Ok(Json(reply))
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match self {
            ServiceError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("request failed: {}", self);
        (
            status,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn state_for(hello_url: String, world_url: String) -> AggregatorState {
        let config = AggregatorConfig::new(Some(hello_url), Some(world_url)).unwrap();
        AggregatorState::new(config, "agg-host".to_string())
    }

    fn leaf_reply(lang: &str, host: &str, greeting: Option<&str>, recipient: Option<&str>) -> LeafReply {
        LeafReply {
            greeting: greeting.map(str::to_string),
            recipient: recipient.map(str::to_string),
            lang: lang.to_string(),
            host: host.to_string(),
        }
    }

    #[test]
    fn test_compose_merges_message_hosts_and_langs() {
        let state = state_for(
            "http://hello:3000".to_string(),
            "http://world:3000".to_string(),
        );

        let reply = state.compose(
            leaf_reply("en", "leaf-a", Some("Hello"), None),
            leaf_reply("en", "leaf-b", None, Some("World")),
        );

        assert_eq!(reply.message, "Hello World");
        assert_eq!(reply.hosts, ["leaf-a", "leaf-b", "agg-host"]);
        assert_eq!(reply.langs, vec!["en"]);
    }

    #[test]
    fn test_compose_keeps_divergent_langs_in_leaf_order() {
        let state = state_for(
            "http://hello:3000".to_string(),
            "http://world:3000".to_string(),
        );

        let reply = state.compose(
            leaf_reply("fr", "leaf-a", Some("Bonjour"), None),
            leaf_reply("es", "leaf-b", None, Some("Mundo")),
        );

        assert_eq!(reply.message, "Bonjour Mundo");
        assert_eq!(reply.langs, vec!["fr", "es"]);
    }

    #[test]
    fn test_compose_null_fragments_become_empty() {
        let state = state_for(
            "http://hello:3000".to_string(),
            "http://world:3000".to_string(),
        );

        let reply = state.compose(
            leaf_reply("de", "leaf-a", None, None),
            leaf_reply("de", "leaf-b", None, None),
        );

        assert_eq!(reply.message, " ");
        assert_eq!(reply.hosts.len(), 3);
    }

    #[tokio::test]
    async fn test_aggregate_fetches_both_leaves() {
        let hello_server = MockServer::start();
        let world_server = MockServer::start();

        let hello_mock = hello_server.mock(|when, then| {
            when.method(GET);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "greeting": "Hello", "lang": "en", "host": "leaf-a"
                }));
        });
        let world_mock = world_server.mock(|when, then| {
            when.method(GET);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "recipient": "World", "lang": "en", "host": "leaf-b"
                }));
        });

        let state = state_for(hello_server.base_url(), world_server.base_url());
        let reply = state.aggregate().await.unwrap();

        hello_mock.assert();
        world_mock.assert();
        assert_eq!(reply.message, "Hello World");
        assert_eq!(reply.hosts, ["leaf-a", "leaf-b", "agg-host"]);
        assert_eq!(reply.langs, vec!["en"]);
    }

    #[tokio::test]
    async fn test_aggregate_fails_on_non_2xx_leaf() {
        let hello_server = MockServer::start();
        let world_server = MockServer::start();

        hello_server.mock(|when, then| {
            when.method(GET);
            then.status(500);
        });
        world_server.mock(|when, then| {
            when.method(GET);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "recipient": "World", "lang": "en", "host": "leaf-b"
                }));
        });

        let state = state_for(hello_server.base_url(), world_server.base_url());
        let err = state.aggregate().await.unwrap_err();

        match err {
            ServiceError::Upstream { service, .. } => assert_eq!(service, "hello"),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_aggregate_fails_on_malformed_leaf_body() {
        let hello_server = MockServer::start();
        let world_server = MockServer::start();

        hello_server.mock(|when, then| {
            when.method(GET);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "greeting": "Hello", "lang": "en", "host": "leaf-a"
                }));
        });
        world_server.mock(|when, then| {
            when.method(GET);
            then.status(200)
                .header("Content-Type", "application/json")
                .body("not json");
        });

        let state = state_for(hello_server.base_url(), world_server.base_url());
        let err = state.aggregate().await.unwrap_err();

        match err {
            ServiceError::Upstream { service, .. } => assert_eq!(service, "world"),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }
}
