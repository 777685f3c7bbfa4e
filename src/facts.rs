//! Loading discovered fact records.
//!
//! Discovery writes a JSON array of [`GpuInfo`] records. Records that look
//! odd (a UUID that is not `GPU-<uuid>`, a bus address that is not a BDF)
//! are logged and passed through; deciding what is publishable is not this
//! loader's job.

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::attribute::policy::classify_pcie_root;
use crate::gpu::info::GpuInfo;
use crate::pci::is_pci_bus_id;

#[derive(Error, Debug)]
pub enum FactsError {
    #[error("Failed to read facts from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode facts: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Length of a hyphenated UUID (`8-4-4-4-12`).
const HYPHENATED_UUID_LEN: usize = 36;

/// Whether `uuid` has the `GPU-<hyphenated uuid>` form. The simple, braced
/// and `urn:uuid:` spellings `Uuid` also parses are rejected.
pub fn is_gpu_uuid(uuid: &str) -> bool {
    uuid.strip_prefix("GPU-").is_some_and(|rest| {
        rest.len() == HYPHENATED_UUID_LEN && Uuid::parse_str(rest).is_ok()
    })
}

/// Decode fact records from a JSON string.
pub fn parse_facts(data: &str) -> Result<Vec<GpuInfo>, FactsError> {
    let gpus: Vec<GpuInfo> = serde_json::from_str(data)?;
    for gpu in &gpus {
        inspect(gpu);
    }
    Ok(gpus)
}

/// Read and decode fact records from a file.
pub fn load_facts(path: &Path) -> Result<Vec<GpuInfo>, FactsError> {
    let data = std::fs::read_to_string(path).map_err(|source| FactsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let gpus = parse_facts(&data)?;
    info!(path = %path.display(), count = gpus.len(), "Loaded GPU facts");
    Ok(gpus)
}

fn inspect(gpu: &GpuInfo) {
    if !is_gpu_uuid(&gpu.uuid) {
        warn!(uuid = %gpu.uuid, minor = gpu.minor, "Unexpected GPU UUID format");
    }
    if !is_pci_bus_id(&gpu.pcie_bus_id) {
        warn!(
            uuid = %gpu.uuid,
            pcie_bus_id = %gpu.pcie_bus_id,
            "GPU bus address is not a PCI BDF"
        );
    }
    if let Some(root) = gpu.pcie_root_attr.as_ref().and_then(|r| r.value.as_string()) {
        info!(
            uuid = %gpu.uuid,
            pcie_root = root,
            kind = ?classify_pcie_root(root),
            "PCIe root supplied"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::attribute::name::HEALTH;
    use crate::gpu::info::Health;

    const FACTS: &str = r#"[
        {
            "uuid": "GPU-12345678-1234-1234-1234-123456789abc",
            "minor": 0,
            "memoryBytes": 42949672960,
            "productName": "NVIDIA A100",
            "brand": "Tesla",
            "architecture": "Ampere",
            "cudaComputeCapability": "8.0",
            "driverVersion": "525.85.12",
            "cudaDriverVersion": "12.0",
            "pcieBusId": "0000:00:1e.0",
            "pcieRootAttr": {
                "name": "resource.kubernetes.io/pcieRoot",
                "value": { "string": "pci0000:00" }
            },
            "numaNode": 0,
            "health": "Healthy"
        },
        {
            "uuid": "not-a-uuid",
            "minor": 1,
            "memoryBytes": 0,
            "productName": "",
            "brand": "",
            "architecture": "",
            "cudaComputeCapability": "",
            "driverVersion": "",
            "cudaDriverVersion": "",
            "pcieBusId": "bogus"
        }
    ]"#;

    #[test]
    fn test_is_gpu_uuid() {
        assert!(is_gpu_uuid("GPU-12345678-1234-1234-1234-123456789abc"));
        assert!(!is_gpu_uuid("12345678-1234-1234-1234-123456789abc"));
        assert!(!is_gpu_uuid("GPU-xyz"));
        assert!(!is_gpu_uuid(""));
    }

    #[test]
    fn test_is_gpu_uuid_only_hyphenated() {
        assert!(!is_gpu_uuid("GPU-123456781234123412341234567890ab"));
        assert!(!is_gpu_uuid("GPU-{12345678-1234-1234-1234-123456789abc}"));
        assert!(!is_gpu_uuid("GPU-urn:uuid:12345678-1234-1234-1234-123456789abc"));
        assert!(is_gpu_uuid("GPU-12345678-1234-1234-1234-123456789ABC"));
    }

    #[test]
    fn test_parse_keeps_odd_records() {
        let gpus = parse_facts(FACTS).unwrap();
        assert_eq!(gpus.len(), 2);
        assert_eq!(gpus[0].numa_node, 0);
        assert!(gpus[0].pcie_root_attr.is_some());
        assert_eq!(gpus[1].pcie_bus_id, "bogus");
        assert_eq!(gpus[1].numa_node, -1);
    }

    #[test]
    fn test_parse_keeps_unrecognised_health() {
        let facts = FACTS.replace(r#""health": "Healthy""#, r#""health": "Degraded""#);
        let gpus = parse_facts(&facts).unwrap();
        assert_eq!(gpus.len(), 2);
        assert_eq!(gpus[0].health, Health::Other("Degraded".to_string()));

        let device = gpus[0].get_device();
        assert_eq!(
            device.attribute(HEALTH).and_then(|a| a.as_string()),
            Some("Degraded")
        );
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(matches!(parse_facts("{"), Err(FactsError::Decode(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FACTS.as_bytes()).unwrap();

        let gpus = load_facts(file.path()).unwrap();
        assert_eq!(gpus[0].canonical_name(), "gpu-0");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_facts(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, FactsError::Io { .. }));
    }
}
