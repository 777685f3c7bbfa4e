//! Attribute set construction.
//!
//! Attributes are derived from a [`GpuInfo`] through two rule tables:
//!
//! - [`SHARED_RULES`]: facts a partition inherits from its parent GPU
//!   (descriptive strings, versions, NUMA node).
//! - [`PHYSICAL_RULES`]: facts that belong to the physical device only
//!   (UUID, bus address, PCIe root, health, type).
//!
//! The full set applies both tables, the partition set only the first. Both
//! therefore share one NUMA rule and cannot disagree on it.

use tracing::debug;

use crate::attribute::name::{
    QualifiedName, ARCHITECTURE, BRAND, CUDA_COMPUTE_CAPABILITY, CUDA_DRIVER_VERSION,
    DRIVER_VERSION, HEALTH, NUMA_NODE, PCIE_BUS_ID, PCIE_ROOT, PRODUCT_NAME, TYPE, UUID,
};
use crate::attribute::policy::{numa_node_attribute, pcie_root_attribute};
use crate::attribute::value::DeviceAttribute;
use crate::attribute::Attributes;
use crate::gpu::info::{GpuInfo, GPU_DEVICE_TYPE};

/// One row of a rule table: the key it governs and how to derive it.
struct Rule {
    name: &'static str,
    derive: fn(&GpuInfo) -> Option<(QualifiedName, DeviceAttribute)>,
}

fn string(name: &str, value: &str) -> Option<(QualifiedName, DeviceAttribute)> {
    Some((
        QualifiedName::from(name),
        DeviceAttribute::String(value.to_string()),
    ))
}

fn version(name: &str, value: &str) -> Option<(QualifiedName, DeviceAttribute)> {
    Some((
        QualifiedName::from(name),
        DeviceAttribute::Version(value.to_string()),
    ))
}

const SHARED_RULES: &[Rule] = &[
    Rule {
        name: PRODUCT_NAME,
        derive: |gpu| string(PRODUCT_NAME, &gpu.product_name),
    },
    Rule {
        name: BRAND,
        derive: |gpu| string(BRAND, &gpu.brand),
    },
    Rule {
        name: ARCHITECTURE,
        derive: |gpu| string(ARCHITECTURE, &gpu.architecture),
    },
    Rule {
        name: CUDA_COMPUTE_CAPABILITY,
        derive: |gpu| version(CUDA_COMPUTE_CAPABILITY, &gpu.cuda_compute_capability),
    },
    Rule {
        name: DRIVER_VERSION,
        derive: |gpu| version(DRIVER_VERSION, &gpu.driver_version),
    },
    Rule {
        name: CUDA_DRIVER_VERSION,
        derive: |gpu| version(CUDA_DRIVER_VERSION, &gpu.cuda_driver_version),
    },
    Rule {
        name: NUMA_NODE,
        derive: |gpu| numa_node_attribute(gpu.numa_node),
    },
];

const PHYSICAL_RULES: &[Rule] = &[
    Rule {
        name: TYPE,
        derive: |_| string(TYPE, GPU_DEVICE_TYPE),
    },
    Rule {
        name: UUID,
        derive: |gpu| string(UUID, &gpu.uuid),
    },
    Rule {
        name: PCIE_BUS_ID,
        derive: |gpu| string(PCIE_BUS_ID, &gpu.pcie_bus_id),
    },
    Rule {
        name: HEALTH,
        derive: |gpu| string(HEALTH, gpu.health.as_str()),
    },
    Rule {
        name: PCIE_ROOT,
        derive: |gpu| pcie_root_attribute(gpu.pcie_root_attr.as_ref()),
    },
];

fn apply(gpu: &GpuInfo, rules: &[Rule], attrs: &mut Attributes) {
    for rule in rules {
        match (rule.derive)(gpu) {
            Some((name, value)) => {
                attrs.insert(name, value);
            }
            None => debug!(uuid = %gpu.uuid, attribute = rule.name, "Attribute omitted"),
        }
    }
}

/// Every attribute published for a whole physical GPU.
pub fn full_attributes(gpu: &GpuInfo) -> Attributes {
    let mut attrs = Attributes::new();
    apply(gpu, SHARED_RULES, &mut attrs);
    apply(gpu, PHYSICAL_RULES, &mut attrs);
    attrs
}

/// Attributes shared by partitions of a GPU. Leaves out everything tied to
/// the physical device's own identity or PCI position.
pub fn partition_attributes(gpu: &GpuInfo) -> Attributes {
    let mut attrs = Attributes::new();
    apply(gpu, SHARED_RULES, &mut attrs);
    attrs
}
