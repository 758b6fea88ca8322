//! Reqwest-backed implementation of [`MessagesGateway`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use atelier_core::submission::{BulkAction, View};

use crate::gateway::{
    is_schema_error, GatewayOutcome, Listing, MessageRow, MessagesGateway, Mutation, Stats,
};

/// HTTP gateway against a running atelier API server.
pub struct HttpGateway {
    base_url: String,
    http: reqwest::Client,
}

/// Permissive wire shape covering both success and error envelopes.
#[derive(Debug, Deserialize)]
struct WireEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<Vec<MessageRow>>,
    #[serde(default)]
    stats: Option<Stats>,
    #[serde(default, rename = "migrationStatus")]
    migration_status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, rename = "errorCode")]
    error_code: Option<String>,
}

impl HttpGateway {
    /// Create a gateway for the API at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Fold an error envelope into the tagged outcome.
    fn classify_failure<T>(envelope: &WireEnvelope) -> GatewayOutcome<T> {
        let message = envelope
            .error
            .clone()
            .unwrap_or_else(|| "Request failed".to_string());
        if is_schema_error(envelope.error_code.as_deref(), &message) {
            GatewayOutcome::SchemaMigrationRequired
        } else {
            GatewayOutcome::Failed(message)
        }
    }
}

#[async_trait]
impl MessagesGateway for HttpGateway {
    async fn list(&self, view: View) -> GatewayOutcome<Listing> {
        let url = format!(
            "{}/api/admin/messages?view={}",
            self.base_url,
            view.as_str()
        );
        let envelope: WireEnvelope = match self.http.get(&url).send().await {
            Ok(response) => match response.json().await {
                Ok(body) => body,
                Err(e) => return GatewayOutcome::Failed(format!("Invalid response: {e}")),
            },
            Err(e) => return GatewayOutcome::Failed(format!("Request failed: {e}")),
        };

        if !envelope.success {
            return Self::classify_failure(&envelope);
        }

        let migration_required = envelope.migration_status.as_deref() == Some("required");
        match (envelope.data, envelope.stats) {
            (Some(data), Some(stats)) => GatewayOutcome::Ok(Listing {
                data,
                stats,
                migration_required,
            }),
            _ => GatewayOutcome::Failed("Malformed list response".to_string()),
        }
    }

    async fn mutate(&self, action: BulkAction, ids: &[String]) -> GatewayOutcome<Mutation> {
        let url = format!("{}/api/admin/messages", self.base_url);
        let body = json!({
            "action": action.as_wire(),
            "messageIds": ids,
        });

        let envelope: WireEnvelope = match self.http.post(&url).json(&body).send().await {
            Ok(response) => match response.json().await {
                Ok(body) => body,
                Err(e) => return GatewayOutcome::Failed(format!("Invalid response: {e}")),
            },
            Err(e) => return GatewayOutcome::Failed(format!("Request failed: {e}")),
        };

        if !envelope.success {
            return Self::classify_failure(&envelope);
        }

        GatewayOutcome::Ok(Mutation {
            message: envelope.message,
        })
    }
}
