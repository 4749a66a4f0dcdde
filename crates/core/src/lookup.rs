//! Non-throwing lookup results.
//!
//! A missing module, entity or attribute is an expected outcome, not an
//! error: repositories return [`Lookup::Missing`] and the HTTP layer renders
//! it as `{ "response": null, "mensaje": "..." }`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Which record could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Module,
    Entity,
    Attribute,
}

impl Missing {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Module => "Modulo no encontrado",
            Self::Entity => "Entidad no encontrada",
            Self::Attribute => "Atributo no encontrado",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Missing(Missing),
}

impl<T> Lookup<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::Missing(missing) => Lookup::Missing(missing),
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing(_) => None,
        }
    }

    pub fn missing(&self) -> Option<Missing> {
        match self {
            Self::Found(_) => None,
            Self::Missing(missing) => Some(*missing),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl<T> From<Missing> for Lookup<T> {
    fn from(missing: Missing) -> Self {
        Self::Missing(missing)
    }
}

impl<T: Serialize> Serialize for Lookup<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Found(value) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("response", value)?;
                map.end()
            }
            Self::Missing(missing) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("response", &serde_json::Value::Null)?;
                map.serialize_entry("mensaje", missing.message())?;
                map.end()
            }
        }
    }
}
