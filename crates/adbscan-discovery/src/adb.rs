//! Parsing of `adb devices -l` output

use adbscan_core::DeviceRecord;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, trace};

use crate::tool::{AdbCommand, DeviceTool};

/// Start of the header line printed before the device table
pub const HEADER_PREFIX: &str = "List of";

/// Start of adb server status lines ("* daemon started successfully")
const STATUS_PREFIX: &str = "*";

const DEVICE_TYPE: &str = "device";

#[derive(Error, Debug)]
pub enum AdbError {
    #[error("adb executable not found: {0}")]
    ToolNotFound(PathBuf),
    #[error("adb exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },
    #[error("Failed to run adb: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unexpected adb output: {0}")]
    MalformedOutput(String),
}

/// Parse a line from `adb devices -l` output
///
/// Returns `None` for the header, for server status lines, and for any
/// device whose connection type is not `device`.
pub fn parse_line(raw: &str) -> Option<DeviceRecord> {
    // Format: "emulator-5554 device product:sdk_gphone_x86 model:sdk_gphone_x86 transport_id:1"
    if raw.starts_with(HEADER_PREFIX) || raw.starts_with(STATUS_PREFIX) {
        return None;
    }

    let mut parts = raw.split_whitespace();
    let id = parts.next()?;
    let device_type = parts.next().unwrap_or_default();

    if device_type != DEVICE_TYPE {
        return None;
    }

    let mut record = DeviceRecord::new(id, device_type);
    for feature in parts {
        match feature.split_once(':') {
            Some((key, value)) => record.insert(key, Some(value.to_string())),
            None => record.insert(feature, None),
        };
    }

    Some(record)
}

/// Turn the complete stdout of `adb devices -l` into device records
///
/// Lines are trimmed and blank lines dropped. The header is recognised by
/// its prefix, so status lines or blank lines ahead of it are harmless.
pub fn parse_devices_output(stdout: &str) -> Result<Vec<DeviceRecord>, AdbError> {
    let lines: Vec<&str> = stdout
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AdbError::MalformedOutput("no output".to_string()));
    }
    if !lines.iter().any(|line| line.starts_with(HEADER_PREFIX)) {
        return Err(AdbError::MalformedOutput(format!(
            "missing '{}' header in {} line(s)",
            HEADER_PREFIX,
            lines.len()
        )));
    }

    let devices: Vec<DeviceRecord> = lines
        .into_iter()
        .filter_map(|line| {
            let record = parse_line(line);
            if record.is_none() {
                trace!(line, "Skipping line");
            }
            record
        })
        // a "type:..." feature token can rewrite the type after the check above
        .filter(DeviceRecord::is_device)
        .collect();

    Ok(devices)
}

/// List devices using the given tool
pub fn list_devices_with(tool: &dyn DeviceTool) -> Result<Vec<DeviceRecord>, AdbError> {
    let stdout = tool.devices_output()?;
    let devices = parse_devices_output(&stdout)?;
    for device in &devices {
        trace!(device = %device, "Found device");
    }
    debug!(tool = %tool.describe(), count = devices.len(), "Listed connected devices");
    Ok(devices)
}

/// List devices currently attached to the local adb server
///
/// The `adb` executable is located through `ANDROID_HOME`,
/// `ANDROID_SDK_ROOT` or `PATH`. Blocks until the tool exits.
pub fn list_connected_devices() -> Result<Vec<DeviceRecord>, AdbError> {
    list_devices_with(&AdbCommand::locate())
}
