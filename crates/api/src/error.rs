use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parametria_core::envelope::ResponseDto;
use parametria_core::error::CoreError;
use serde::Serialize;

pub const BAD_REQUEST_DESCRIPTION: &str =
    "Valores nulos o incorrectos en los parámetros de entrada.";
pub const NOT_FOUND_DESCRIPTION: &str = "Recurso no encontrado.";
pub const CONFLICT_DESCRIPTION: &str = "El recurso fue modificado por otra solicitud.";
pub const INTERNAL_DESCRIPTION: &str = "Error en el procesamiento de la solicitud.";
pub const INTERNAL_MESSAGE: &str = "Error interno del servidor";

/// Failure of a request, rendered as the error envelope.
///
/// Domain failures arrive as [`CoreError`]. The other variants come from
/// the HTTP layer itself.
/// Renders as `{ data: { requestError }, status: { statusCode, statusDescription } }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Malformed request: bad JSON, missing `data`, missing query parameter.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    request_error: String,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::InvalidId(_)
                | CoreError::Validation(_)
                | CoreError::DuplicateName(_)
                | CoreError::InvalidOperation(_) => (
                    StatusCode::BAD_REQUEST,
                    BAD_REQUEST_DESCRIPTION,
                    core.to_string(),
                ),
                CoreError::ConcurrentModification(msg) => {
                    (StatusCode::CONFLICT, CONFLICT_DESCRIPTION, msg.clone())
                }
                CoreError::Persistence(msg) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_DESCRIPTION,
                    msg.clone(),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        INTERNAL_DESCRIPTION,
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, BAD_REQUEST_DESCRIPTION, msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, NOT_FOUND_DESCRIPTION, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_DESCRIPTION,
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, description, message) = self.parts();
        let body = ResponseDto::new(
            ErrorBody {
                request_error: message,
            },
            status.as_u16(),
            description,
        );
        (status, axum::Json(body)).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("response serialization failed: {err}"))
    }
}

/// Flatten `validator` field errors into one comma-separated message,
/// ordered by field name.
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field} no es válido"),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(validation_message(&errors)))
    }
}
