pub mod attribute;
pub mod entity;
pub mod module;

pub use attribute::{CreateTableAttribute, TableAttribute, TableAttributeFilter, UpdateTableAttribute};
pub use entity::{CreateEntity, Entity, EntityFilter, EntitySummary, UpdateEntity};
pub use module::{CreateModule, Module, ModuleFilter, ModulePatch, ModuleSummary, UpdateModule};
