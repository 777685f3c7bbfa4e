//! Device descriptors as published to the allocator.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::attribute::name::{QualifiedName, MEMORY};
use crate::attribute::value::DeviceAttribute;
use crate::attribute::Attributes;
use crate::gpu::info::GpuInfo;
use crate::gpu::quantity::Quantity;

/// A single capacity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceCapacity {
    pub value: Quantity,
}

/// A device entry in the allocator's resource pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    /// Unique within the pool, e.g. `gpu-0`.
    pub name: String,

    pub attributes: Attributes,

    pub capacity: BTreeMap<QualifiedName, DeviceCapacity>,
}

impl Device {
    /// Build the descriptor for a whole GPU.
    pub fn from_info(gpu: &GpuInfo) -> Self {
        let mut capacity = BTreeMap::new();
        capacity.insert(
            QualifiedName::from(MEMORY),
            DeviceCapacity {
                value: Quantity::from_bytes(gpu.memory_bytes),
            },
        );

        Self {
            name: gpu.canonical_name(),
            attributes: gpu.attributes(),
            capacity,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&DeviceAttribute> {
        self.attributes.get(name)
    }

    pub fn capacity(&self, name: &str) -> Option<Quantity> {
        self.capacity.get(name).map(|c| c.value)
    }
}

/// Descriptors for a set of GPUs, ordered by minor number.
pub fn devices_for(gpus: &[GpuInfo]) -> Vec<Device> {
    let mut sorted: Vec<&GpuInfo> = gpus.iter().collect();
    sorted.sort_by_key(|gpu| gpu.minor);
    sorted.into_iter().map(GpuInfo::get_device).collect()
}
