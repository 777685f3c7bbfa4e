//! Attribute values.
//!
//! A published attribute carries exactly one typed value. Modelling it as an
//! enum makes "two fields set at once" unrepresentable.

use serde::{Deserialize, Serialize};

use crate::attribute::name::QualifiedName;

/// A single typed attribute value.
///
/// Serializes the way the allocator's API expects, as a single-key object:
/// `{"int": 3}`, `{"string": "Tesla"}`, `{"bool": true}`, `{"version": "12.0"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceAttribute {
    Int(i64),
    String(String),
    Bool(bool),
    Version(String),
}

impl DeviceAttribute {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DeviceAttribute::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            DeviceAttribute::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DeviceAttribute::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_version(&self) -> Option<&str> {
        match self {
            DeviceAttribute::Version(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the populated variant, as used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            DeviceAttribute::Int(_) => "int",
            DeviceAttribute::String(_) => "string",
            DeviceAttribute::Bool(_) => "bool",
            DeviceAttribute::Version(_) => "version",
        }
    }
}

impl From<i64> for DeviceAttribute {
    fn from(v: i64) -> Self {
        DeviceAttribute::Int(v)
    }
}

impl From<bool> for DeviceAttribute {
    fn from(v: bool) -> Self {
        DeviceAttribute::Bool(v)
    }
}

impl From<&str> for DeviceAttribute {
    fn from(v: &str) -> Self {
        DeviceAttribute::String(v.to_string())
    }
}

impl From<String> for DeviceAttribute {
    fn from(v: String) -> Self {
        DeviceAttribute::String(v)
    }
}

/// An attribute handed in already named, e.g. a pre-discovered PCIe root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAttribute {
    pub name: QualifiedName,
    pub value: DeviceAttribute,
}

impl NamedAttribute {
    pub fn new(name: impl Into<QualifiedName>, value: impl Into<DeviceAttribute>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
