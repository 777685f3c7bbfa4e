//! Namespaced device attributes.
//!
//! - [`name`]: qualified attribute keys and namespace constants
//! - [`value`]: the typed attribute value
//! - [`policy`]: presence rules for NUMA node and PCIe root
//! - [`builder`]: full and partition-shared attribute sets

pub mod builder;
pub mod name;
pub mod policy;
pub mod value;

use std::collections::BTreeMap;

/// An attribute mapping, keyed by qualified name.
pub type Attributes = BTreeMap<name::QualifiedName, value::DeviceAttribute>;
