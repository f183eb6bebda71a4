//! adbscan Core - Device record types shared by the adbscan crates
//!
//! This crate provides the data model for devices reported by `adb`:
//! - `DeviceRecord`, an open-ended key/value record per attached device
//! - `DeviceListing`, a timestamped set of records from one tool run

pub mod device;

pub use device::{DeviceListing, DeviceRecord};
