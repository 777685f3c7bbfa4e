//! Qualified attribute names.
//!
//! Every key published by this crate is fully qualified, either under the
//! vendor domain (`gpu.nvidia.com/...`) or under the allocator's standard
//! prefix (`resource.kubernetes.io/...`). Keys are case-sensitive and must
//! match the allocator's schema byte for byte.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Domain that vendor-namespaced attributes live under.
pub const VENDOR_DOMAIN: &str = "gpu.nvidia.com";

/// Prefix for attributes whose meaning is defined by the allocator itself.
pub const STANDARD_DEVICE_ATTRIBUTE_PREFIX: &str = "resource.kubernetes.io/";

macro_rules! vendor_key {
    ($name:literal) => {
        concat!("gpu.nvidia.com/", $name)
    };
}

macro_rules! standard_key {
    ($name:literal) => {
        concat!("resource.kubernetes.io/", $name)
    };
}

pub const TYPE: &str = vendor_key!("type");
pub const UUID: &str = vendor_key!("uuid");
pub const PRODUCT_NAME: &str = vendor_key!("productName");
pub const BRAND: &str = vendor_key!("brand");
pub const ARCHITECTURE: &str = vendor_key!("architecture");
pub const CUDA_COMPUTE_CAPABILITY: &str = vendor_key!("cudaComputeCapability");
pub const DRIVER_VERSION: &str = vendor_key!("driverVersion");
pub const CUDA_DRIVER_VERSION: &str = vendor_key!("cudaDriverVersion");
pub const PCIE_BUS_ID: &str = vendor_key!("pcieBusID");
pub const HEALTH: &str = vendor_key!("health");
pub const NUMA_NODE: &str = vendor_key!("numaNode");

pub const PCIE_ROOT: &str = standard_key!("pcieRoot");

/// Capacity key for device memory.
pub const MEMORY: &str = "memory";

/// A namespaced attribute or capacity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// `gpu.nvidia.com/<short>`
    pub fn vendor(short: &str) -> Self {
        Self(format!("{VENDOR_DOMAIN}/{short}"))
    }

    /// `resource.kubernetes.io/<short>`
    pub fn standard(short: &str) -> Self {
        Self(format!("{STANDARD_DEVICE_ATTRIBUTE_PREFIX}{short}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the first `/`, if any.
    pub fn domain(&self) -> Option<&str> {
        self.0.split_once('/').map(|(domain, _)| domain)
    }

    /// The part after the first `/`, or the whole name if unqualified.
    pub fn short_name(&self) -> &str {
        self.0.split_once('/').map_or(&self.0, |(_, short)| short)
    }
}

impl Borrow<str> for QualifiedName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for QualifiedName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_match_builders() {
        assert_eq!(QualifiedName::vendor("numaNode").as_str(), NUMA_NODE);
        assert_eq!(QualifiedName::vendor("pcieBusID").as_str(), PCIE_BUS_ID);
        assert_eq!(QualifiedName::standard("pcieRoot").as_str(), PCIE_ROOT);
    }

    #[test]
    fn test_exact_key_text() {
        assert_eq!(NUMA_NODE, "gpu.nvidia.com/numaNode");
        assert_eq!(PCIE_ROOT, "resource.kubernetes.io/pcieRoot");
        assert_eq!(CUDA_COMPUTE_CAPABILITY, "gpu.nvidia.com/cudaComputeCapability");
    }

    #[test]
    fn test_domain_and_short_name() {
        let name = QualifiedName::from(NUMA_NODE);
        assert_eq!(name.domain(), Some(VENDOR_DOMAIN));
        assert_eq!(name.short_name(), "numaNode");

        let bare = QualifiedName::from(MEMORY);
        assert_eq!(bare.domain(), None);
        assert_eq!(bare.short_name(), "memory");
    }
}
