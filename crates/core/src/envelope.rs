//! The `{ data, status }` envelope shared by every response of the service
//! and by the template API proxy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const OK_DESCRIPTION: &str = "OK";
pub const PARTIAL_CONTENT_DESCRIPTION: &str = "Partial Content";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub status_code: u16,
    pub status_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDto<T> {
    pub data: T,
    pub status: Status,
}

impl<T> ResponseDto<T> {
    pub fn new(data: T, status_code: u16, status_description: impl Into<String>) -> Self {
        Self {
            data,
            status: Status {
                status_code,
                status_description: status_description.into(),
            },
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(data, 200, OK_DESCRIPTION)
    }
}

impl ResponseDto<Value> {
    /// Wrap a `{ response, ... }` body, downgrading to `206 Partial Content`
    /// when `response` is null, an empty array or an empty object.
    pub fn from_body<T: Serialize>(body: &T) -> Result<Self, serde_json::Error> {
        let data = serde_json::to_value(body)?;
        if is_partial(&data) {
            return Ok(Self::new(data, 206, PARTIAL_CONTENT_DESCRIPTION));
        }
        Ok(Self::ok(data))
    }
}

/// True when `data.response` carries nothing useful.
pub fn is_partial(data: &Value) -> bool {
    match data.get("response") {
        Some(Value::Null) => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(fields)) => fields.is_empty(),
        _ => false,
    }
}
