//! PCI bus address (BDF) syntax.
//!
//! A bus address has the fixed-width form `DDDD:BB:dd.F`:
//! 4 hex digits of domain, 2 of bus, 2 of device and 1 of function.
//! Hex digits are accepted in either case. Anything else, including
//! synthesized root-complex labels like `pci0000:00`, is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which part of a bus address failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PciField {
    Domain,
    Bus,
    Device,
    Function,
}

impl fmt::Display for PciField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PciField::Domain => write!(f, "domain"),
            PciField::Bus => write!(f, "bus"),
            PciField::Device => write!(f, "device"),
            PciField::Function => write!(f, "function"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PciBusIdError {
    #[error("Invalid PCI bus ID {input:?}: bad {field} field")]
    InvalidField { input: String, field: PciField },

    #[error("Invalid PCI bus ID {input:?}: expected DDDD:BB:dd.F")]
    Malformed { input: String },
}

/// A parsed PCI Bus:Device.Function address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PciBusId {
    pub domain: u16,
    pub bus: u8,
    pub device: u8,
    pub function: u8,
}

/// Returns true if `s` is a well-formed `DDDD:BB:dd.F` bus address.
pub fn is_pci_bus_id(s: &str) -> bool {
    s.parse::<PciBusId>().is_ok()
}

/// Parse exactly `width` hex digits. `from_str_radix` alone would accept a
/// leading `+`, so every byte is checked first.
pub(crate) fn hex_field(s: &str, width: usize) -> Option<u16> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(s, 16).ok()
}

impl FromStr for PciBusId {
    type Err = PciBusIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PciBusIdError::Malformed {
            input: s.to_string(),
        };
        let invalid = |field| PciBusIdError::InvalidField {
            input: s.to_string(),
            field,
        };

        let (rest, function) = s.rsplit_once('.').ok_or_else(malformed)?;
        let mut parts = rest.split(':');
        let (Some(domain), Some(bus), Some(device), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let domain = hex_field(domain, 4).ok_or_else(|| invalid(PciField::Domain))?;
        let bus = hex_field(bus, 2).ok_or_else(|| invalid(PciField::Bus))?;
        let device = hex_field(device, 2).ok_or_else(|| invalid(PciField::Device))?;
        let function = hex_field(function, 1).ok_or_else(|| invalid(PciField::Function))?;

        Ok(Self {
            domain,
            bus: bus as u8,
            device: device as u8,
            function: function as u8,
        })
    }
}

impl fmt::Display for PciBusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}:{:02x}:{:02x}.{:x}",
            self.domain, self.bus, self.device, self.function
        )
    }
}

impl TryFrom<String> for PciBusId {
    type Error = PciBusIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PciBusId> for String {
    fn from(id: PciBusId) -> Self {
        id.to_string()
    }
}
