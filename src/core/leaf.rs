use std::sync::Arc;

use axum::extract::State;
use axum::{Json, Router};
use serde_json::{Map, Value};

use crate::config::LeafConfig;
use crate::core::language::LanguageTable;

/// One leaf service: the display string for the configured language is
/// resolved from the table once at startup and served verbatim on every
/// request. A lookup miss leaves the display field `null`; the leaf never
/// fails.
pub struct LeafService {
    field: &'static str,
    display: Option<&'static str>,
    lang: String,
    host: String,
}

impl LeafService {
    pub fn hello(config: &LeafConfig, host: String) -> Self {
        Self::new("greeting", LanguageTable::hello(), config, host)
    }

    pub fn world(config: &LeafConfig, host: String) -> Self {
        Self::new("recipient", LanguageTable::world(), config, host)
    }

    fn new(field: &'static str, table: LanguageTable, config: &LeafConfig, host: String) -> Self {
        Self {
            field,
            display: table.lookup(&config.lang),
            lang: config.lang.clone(),
            host,
        }
    }

    pub fn reply(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            self.field.to_string(),
            self.display.map(Value::from).unwrap_or(Value::Null),
        );
        body.insert("lang".to_string(), Value::String(self.lang.clone()));
        body.insert("host".to_string(), Value::String(self.host.clone()));
        Value::Object(body)
    }
}

/// Any method on any path gets the same response, so the whole router is a
/// single fallback handler.
pub fn router(service: Arc<LeafService>) -> Router {
    Router::new().fallback(serve_reply).with_state(service)
}

async fn serve_reply(State(service): State<Arc<LeafService>>) -> Json<Value> {
    tracing::debug!(lang = %service.lang, "serving greeting fragment");
    Json(service.reply())
}
