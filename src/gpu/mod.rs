//! GPU fact records and the descriptors derived from them.
//!
//! - [`info`]: discovered per-GPU facts
//! - [`device`]: descriptor assembly
//! - [`quantity`]: capacity rendering

pub mod device;
pub mod info;
pub mod quantity;
