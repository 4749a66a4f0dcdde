//! Forwarding of [`DynamicOperation`]s and template API health checks.

use std::time::Duration;

use parametria_core::envelope::ResponseDto;
use parametria_core::operation::{validate_operation, DynamicOperation};
use serde_json::{json, Value};

/// Path appended to the caller-supplied endpoint when forwarding.
pub const CRUD_PATH: &str = "/service/pendig/transversales/template-parametria/api/v1/crud";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

const SUCCESS_DESCRIPTION: &str = "Operación ejecutada exitosamente";
const UNAVAILABLE_DESCRIPTION: &str = "Servicio no disponible";
const LOCAL_FAILURE_DESCRIPTION: &str = "Error en el procesamiento de la operación";

/// Errors building the client. Calls themselves never fail: they return an
/// envelope describing the failure.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("HTTP client could not be built: {0}")]
    Client(#[from] reqwest::Error),
}

/// Client for the template API. The target host is chosen per call.
#[derive(Debug, Clone)]
pub struct TemplateClient {
    client: reqwest::Client,
    timeout: Duration,
    health_timeout: Duration,
}

impl TemplateClient {
    /// Create a client whose forwarded operations time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TemplateError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, timeout))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            health_timeout: HEALTH_TIMEOUT,
        }
    }

    /// Override the health-check timeout.
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Validate `op` and forward it as `POST {endpoint}{CRUD_PATH}`.
    ///
    /// The body is the descriptor without its `endpoint`. There is no retry.
    pub async fn execute(&self, op: &DynamicOperation) -> ResponseDto<Value> {
        if let Err(err) = validate_operation(op) {
            tracing::warn!(error = %err, "Rejected template operation");
            return local_failure(&err.to_string());
        }
        let endpoint = op.endpoint.as_deref().unwrap_or_default().trim();
        let url = format!("{}{CRUD_PATH}", endpoint.trim_end_matches('/'));

        let sent = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(op)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(err) if err.is_timeout() || err.is_connect() || err.is_request() => {
                tracing::warn!(url = %url, error = %err, "Template API unreachable");
                return unavailable();
            }
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "Template API request failed");
                return local_failure(&err.to_string());
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
            Err(err) if err.is_timeout() => {
                tracing::warn!(url = %url, error = %err, "Template API response timed out");
                return unavailable();
            }
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "Template API body unreadable");
                return local_failure(&err.to_string());
            }
        };

        if status.is_success() {
            let description = status_description(&body).unwrap_or(SUCCESS_DESCRIPTION);
            let description = description.to_string();
            let data = body.get("data").cloned().unwrap_or(Value::Null);
            return ResponseDto::new(data, status.as_u16(), description);
        }

        let message = error_message(&body)
            .or(status.canonical_reason())
            .unwrap_or("Error desconocido")
            .to_string();
        tracing::warn!(
            url = %url,
            status = status.as_u16(),
            message = %message,
            "Template API returned an error"
        );
        ResponseDto::new(
            json!({ "response": null, "error": message, "details": body }),
            status.as_u16(),
            format!("Error en la operación: {message}"),
        )
    }

    /// Probe `GET {endpoint}`. Any failure, including a non-2xx status,
    /// reports the API as disconnected.
    pub async fn check_health(&self, endpoint: &str) -> ResponseDto<Value> {
        let result = self
            .client
            .get(endpoint)
            .timeout(self.health_timeout)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => ResponseDto::new(
                json!({
                    "response": {
                        "status": "connected",
                        "endpoint": endpoint,
                        "message": "Template API is reachable",
                    }
                }),
                200,
                "Connection successful",
            ),
            Err(err) => {
                tracing::warn!(endpoint, error = %err, "Template API health check failed");
                ResponseDto::new(
                    json!({
                        "response": {
                            "status": "disconnected",
                            "endpoint": endpoint,
                            "error": "Unable to connect to template API",
                        }
                    }),
                    503,
                    "Connection failed",
                )
            }
        }
    }
}

// ---- envelope helpers ----

fn unavailable() -> ResponseDto<Value> {
    ResponseDto::new(
        json!({
            "response": null,
            "error": "No se pudo conectar con el servicio template",
            "details": "Timeout o error de conexión",
        }),
        503,
        UNAVAILABLE_DESCRIPTION,
    )
}

fn local_failure(message: &str) -> ResponseDto<Value> {
    ResponseDto::new(
        json!({ "response": null, "error": message }),
        400,
        LOCAL_FAILURE_DESCRIPTION,
    )
}

/// `status.statusDescription`, at the top level or under `data`.
fn status_description(body: &Value) -> Option<&str> {
    body.pointer("/status/statusDescription")
        .or_else(|| body.pointer("/data/status/statusDescription"))
        .and_then(Value::as_str)
}

fn error_message(body: &Value) -> Option<&str> {
    body.pointer("/data/requestError")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
}
