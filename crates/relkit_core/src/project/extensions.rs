//! Typed extensions and loosely typed extra properties.

use super::ProjectError;
use std::any::{type_name, Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};

/// At most one value per concrete type, shared between plugins.
#[derive(Default)]
pub struct Extensions {
    entries: HashMap<TypeId, Box<dyn Any>>,
}

impl Extensions {
    /// Adds `value` as the extension for type `T`.
    ///
    /// # Errors
    /// - `ProjectError::DuplicateExtension` when a `T` is already present.
    pub fn add<T: Any>(&mut self, value: T) -> Result<(), ProjectError> {
        let key = TypeId::of::<T>();
        if self.entries.contains_key(&key) {
            return Err(ProjectError::DuplicateExtension(type_name::<T>()));
        }
        self.entries.insert(key, Box::new(value));
        Ok(())
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|value| value.downcast_mut::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extra property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Bool(bool),
    Text(String),
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

/// String-keyed properties; later writes replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraProperties {
    values: BTreeMap<String, PropertyValue>,
}

impl ExtraProperties {
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(PropertyValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }
}
