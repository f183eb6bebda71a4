//! adbscan Discovery - Listing devices attached through `adb`
//!
//! This crate runs `adb devices -l` and turns its output into records:
//! - `parse_line` classifies one line of output
//! - `list_connected_devices` runs the tool and collects every device
//! - `DeviceTool` is the seam between process invocation and parsing

pub mod adb;
pub mod tool;

pub use adb::{
    list_connected_devices, list_devices_with, parse_devices_output, parse_line, AdbError,
    HEADER_PREFIX,
};
pub use tool::{AdbCommand, DeviceTool, ADB_EXECUTABLE};
