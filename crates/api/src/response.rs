//! Success responses.
//!
//! Every handler answers with the `{ data, status }` envelope of
//! [`ResponseDto`]. Bodies whose `response` is null or empty are downgraded
//! to `206 Partial Content`, and the HTTP status always matches
//! `status.statusCode`, except for creations, which answer `201 Created`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use parametria_core::envelope::{is_partial, ResponseDto};
use parametria_core::listing::Page;
use parametria_core::lookup::Lookup;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppResult;

/// An enveloped success body plus the HTTP status to send it with.
#[derive(Debug)]
pub struct Reply {
    status: StatusCode,
    body: ResponseDto<Value>,
}

impl Reply {
    /// Wrap `body`, which must serialize to a `{ response, ... }` object.
    pub fn ok<T: Serialize>(body: &T) -> AppResult<Self> {
        let dto = ResponseDto::from_body(body)?;
        Ok(Self::passthrough(dto))
    }

    /// Like [`Reply::ok`], but a populated result answers `201 Created`.
    pub fn created<T: Serialize>(body: &T) -> AppResult<Self> {
        let dto = ResponseDto::from_body(body)?;
        if is_partial(&dto.data) {
            return Ok(Self::passthrough(dto));
        }
        Ok(Self {
            status: StatusCode::CREATED,
            body: dto,
        })
    }

    /// Send an already built envelope, using its `statusCode` as the HTTP
    /// status.
    pub fn passthrough(dto: ResponseDto<Value>) -> Self {
        let status = StatusCode::from_u16(dto.status.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { status, body: dto }
    }

    /// A listing: `{ response, paginacion }` when the ancestors resolved,
    /// `{ response: null, mensaje }` otherwise.
    pub fn page<T: Serialize>(result: Lookup<Page<T>>) -> AppResult<Self> {
        match result {
            Lookup::Found(page) => Self::ok(&page),
            Lookup::Missing(missing) => Self::ok(&Lookup::<()>::Missing(missing)),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ResponseDto<Value> {
        &self.body
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
