//! Repository layer.
//!
//! Each repository is a zero-sized struct whose async methods take a
//! `&dyn ModuleStore`. Not-found conditions come back as
//! [`Lookup::Missing`](parametria_core::lookup::Lookup); rule violations and
//! store failures as [`CoreError`](parametria_core::error::CoreError).

pub mod attribute_repo;
pub mod configuration_repo;
pub mod entity_repo;
pub mod module_repo;
pub mod nested;

pub use attribute_repo::{AttributeRepo, EntityAttributes};
pub use configuration_repo::ConfigurationRepo;
pub use entity_repo::{EntityRepo, EntityScope};
pub use module_repo::ModuleRepo;
pub use nested::{EmbeddedCollection, EmbeddedItem, Messages, NestedRepo};
