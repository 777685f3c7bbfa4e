//! Presence rules for the conditionally published attributes.
//!
//! Only two attributes may be absent from a GPU's attribute set: the NUMA
//! node and the PCIe root. Each rule is a small pure function returning the
//! key/value pair to publish, or `None` to leave the key out.

use tracing::debug;

use crate::attribute::name::{QualifiedName, PCIE_ROOT, NUMA_NODE};
use crate::attribute::value::{DeviceAttribute, NamedAttribute};
use crate::pci::{hex_field, is_pci_bus_id};

/// NUMA node attribute, present only for a non-negative node index.
pub fn numa_node_attribute(numa_node: i32) -> Option<(QualifiedName, DeviceAttribute)> {
    if numa_node < 0 {
        return None;
    }
    Some((
        QualifiedName::from(NUMA_NODE),
        DeviceAttribute::Int(i64::from(numa_node)),
    ))
}

/// PCIe root attribute, republished verbatim when discovery supplied one.
///
/// The value is not inspected: a root-complex label and a parent bridge
/// address are both legitimate. Nothing is synthesized when it is absent.
pub fn pcie_root_attribute(
    root: Option<&NamedAttribute>,
) -> Option<(QualifiedName, DeviceAttribute)> {
    let root = root?;
    if root.name.as_str() != PCIE_ROOT {
        debug!(
            supplied = %root.name,
            published = PCIE_ROOT,
            "PCIe root attribute supplied under a non-standard name"
        );
    }
    Some((QualifiedName::from(PCIE_ROOT), root.value.clone()))
}

/// Where a PCIe root value appears to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PcieRootKind {
    /// Synthesized root-complex label `pci<domain>:<bus>`, e.g. `pci0000:00`.
    RootComplex,
    /// Bus address of the parent bridge, used when no root label exists.
    ParentBridge,
    Other,
}

/// Classify a PCIe root value. Informational only; never affects presence.
pub fn classify_pcie_root(value: &str) -> PcieRootKind {
    if is_pci_bus_id(value) {
        PcieRootKind::ParentBridge
    } else if is_root_complex_label(value) {
        PcieRootKind::RootComplex
    } else {
        PcieRootKind::Other
    }
}

/// `pci` followed by 4 hex digits of domain, `:`, and 2 hex digits of bus.
fn is_root_complex_label(value: &str) -> bool {
    value
        .strip_prefix("pci")
        .and_then(|rest| rest.split_once(':'))
        .is_some_and(|(domain, bus)| {
            hex_field(domain, 4).is_some() && hex_field(bus, 2).is_some()
        })
}
