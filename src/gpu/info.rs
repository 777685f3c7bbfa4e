//! Per-GPU fact records.
//!
//! A [`GpuInfo`] is the snapshot of one GPU handed to us by discovery. It is
//! never mutated here; every derived attribute map or descriptor is built
//! fresh from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::builder::{full_attributes, partition_attributes};
use crate::attribute::value::NamedAttribute;
use crate::attribute::Attributes;
use crate::gpu::device::Device;

/// Sentinel for "NUMA affinity unknown".
pub const NUMA_NODE_UNKNOWN: i32 = -1;

/// Device type published under `gpu.nvidia.com/type`.
pub const GPU_DEVICE_TYPE: &str = "gpu";

/// Health as last reported by the platform.
///
/// Platforms may report states beyond the three known ones; those are kept
/// as [`Health::Other`] and published with their original text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Health {
    Healthy,
    Unhealthy,
    #[default]
    Unknown,
    Other(String),
}

impl Health {
    pub fn as_str(&self) -> &str {
        match self {
            Health::Healthy => "Healthy",
            Health::Unhealthy => "Unhealthy",
            Health::Unknown => "Unknown",
            Health::Other(state) => state,
        }
    }
}

impl From<String> for Health {
    fn from(state: String) -> Self {
        match state.as_str() {
            "Healthy" => Health::Healthy,
            "Unhealthy" => Health::Unhealthy,
            "Unknown" => Health::Unknown,
            _ => Health::Other(state),
        }
    }
}

impl From<Health> for String {
    fn from(health: Health) -> Self {
        match health {
            Health::Other(state) => state,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_numa_node() -> i32 {
    NUMA_NODE_UNKNOWN
}

/// Discovered facts about a single full GPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuInfo {
    /// Hardware UUID, e.g. `GPU-12345678-1234-1234-1234-123456789abc`.
    pub uuid: String,

    /// Index of the `/dev/nvidiaN` device file.
    pub minor: u32,

    /// Total framebuffer memory in bytes.
    pub memory_bytes: u64,

    pub product_name: String,
    pub brand: String,
    pub architecture: String,
    pub cuda_compute_capability: String,
    pub driver_version: String,
    pub cuda_driver_version: String,

    /// The GPU's own bus address. Published as-is, never validated.
    pub pcie_bus_id: String,

    /// PCIe root attribute chosen by discovery: either a root-complex label
    /// (`pci0000:00`) or the parent bridge's bus address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcie_root_attr: Option<NamedAttribute>,

    /// NUMA node index, or [`NUMA_NODE_UNKNOWN`].
    #[serde(default = "default_numa_node")]
    pub numa_node: i32,

    #[serde(default)]
    pub health: Health,
}

impl GpuInfo {
    /// Stable device name within a node's resource pool.
    pub fn canonical_name(&self) -> String {
        format!("gpu-{}", self.minor)
    }

    /// Assemble the descriptor the allocator publishes for this GPU.
    pub fn get_device(&self) -> Device {
        Device::from_info(self)
    }

    /// Full attribute set for the whole physical device.
    pub fn attributes(&self) -> Attributes {
        full_attributes(self)
    }

    /// Attributes shared by every partition carved out of this GPU.
    pub fn part_dev_attributes(&self) -> Attributes {
        partition_attributes(self)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_gpu() -> GpuInfo {
        GpuInfo {
            uuid: "GPU-12345678-1234-1234-1234-123456789abc".to_string(),
            minor: 0,
            memory_bytes: 40 * 1024 * 1024 * 1024, // 40 GiB
            product_name: "NVIDIA A100".to_string(),
            brand: "Tesla".to_string(),
            architecture: "Ampere".to_string(),
            cuda_compute_capability: "8.0".to_string(),
            driver_version: "525.85.12".to_string(),
            cuda_driver_version: "12.0".to_string(),
            pcie_bus_id: "0000:00:1e.0".to_string(),
            pcie_root_attr: None,
            numa_node: NUMA_NODE_UNKNOWN,
            health: Health::Healthy,
        }
    }

    #[test]
    fn test_canonical_name() {
        let mut gpu = sample_gpu();
        assert_eq!(gpu.canonical_name(), "gpu-0");
        gpu.minor = 7;
        assert_eq!(gpu.canonical_name(), "gpu-7");
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "uuid": "GPU-12345678-1234-1234-1234-123456789abc",
            "minor": 1,
            "memoryBytes": 1024,
            "productName": "NVIDIA A100",
            "brand": "Tesla",
            "architecture": "Ampere",
            "cudaComputeCapability": "8.0",
            "driverVersion": "525.85.12",
            "cudaDriverVersion": "12.0",
            "pcieBusId": "0000:00:1e.0"
        }"#;
        let gpu: GpuInfo = serde_json::from_str(json).unwrap();
        assert_eq!(gpu.numa_node, NUMA_NODE_UNKNOWN);
        assert_eq!(gpu.pcie_root_attr, None);
        assert_eq!(gpu.health, Health::Unknown);
    }

    #[test]
    fn test_health_strings() {
        assert_eq!(Health::Healthy.to_string(), "Healthy");
        assert_eq!(Health::Unhealthy.as_str(), "Unhealthy");
        assert_eq!(Health::default(), Health::Unknown);
    }

    #[test]
    fn test_health_keeps_platform_states() {
        let health: Health = serde_json::from_str("\"Degraded\"").unwrap();
        assert_eq!(health, Health::Other("Degraded".to_string()));
        assert_eq!(health.as_str(), "Degraded");
        assert_eq!(serde_json::to_string(&health).unwrap(), "\"Degraded\"");

        let health: Health = serde_json::from_str("\"Unhealthy\"").unwrap();
        assert_eq!(health, Health::Unhealthy);
        assert_eq!(serde_json::to_string(&health).unwrap(), "\"Unhealthy\"");
    }
}
