//! HTTP client for the template API, the downstream service that executes
//! generic CRUD operations against configured tables.
//!
//! Every outcome, including network failures, is normalized into a
//! [`ResponseDto`](parametria_core::envelope::ResponseDto) envelope.

pub mod client;

pub use client::{TemplateClient, TemplateError, CRUD_PATH};
