//! Request handlers.
//!
//! Each submodule holds the async handler functions of one resource. They
//! delegate to the repositories in `parametria_db` or to the template
//! client, and wrap results with [`crate::response::Reply`].

pub mod attribute;
pub mod catalog;
pub mod configuration;
pub mod entity;
pub mod module;
pub mod operation;
