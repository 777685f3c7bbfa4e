//! Capacity quantities in the allocator's binary-SI notation.
//!
//! A byte count is rendered with the largest binary suffix that divides it
//! exactly (`42949672960` -> `40Gi`), or as a bare integer otherwise.

use std::fmt;

use serde::{Serialize, Serializer};

const SUFFIXES: [&str; 6] = ["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];

/// A non-negative capacity in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quantity(u64);

impl Quantity {
    pub fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "0");
        }

        let mut value = self.0;
        let mut suffix = "";
        for s in SUFFIXES {
            if value % 1024 != 0 {
                break;
            }
            value /= 1024;
            suffix = s;
        }
        write!(f, "{value}{suffix}")
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
