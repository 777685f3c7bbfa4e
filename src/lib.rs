//! gpu-device-attrs: device attributes for GPU dynamic resource allocation.
//!
//! Turns discovered per-GPU facts into the namespaced attribute sets and
//! device descriptors a cluster allocator publishes:
//!   facts → presence policies / PCI validation → attribute sets → descriptor
//!
//! Everything between a [`gpu::info::GpuInfo`] and a [`gpu::device::Device`]
//! is pure and synchronous. Reading facts from disk lives in [`facts`].

pub mod attribute;
pub mod config;
pub mod facts;
pub mod gpu;
pub mod pci;

pub use attribute::name::QualifiedName;
pub use attribute::value::{DeviceAttribute, NamedAttribute};
pub use attribute::Attributes;
pub use gpu::device::Device;
pub use gpu::info::{GpuInfo, Health};
pub use pci::is_pci_bus_id;
