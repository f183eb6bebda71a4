//! Human-readable rendering of a device listing

use adbscan_core::{DeviceListing, DeviceRecord};

const PLACEHOLDER: &str = "-";

/// Keys that get their own column
const COLUMNS: [&str; 5] = [DeviceRecord::ID, DeviceRecord::TYPE, "model", "product", "transport_id"];

/// Remaining attributes as `key:value` (or bare `key`), in key order
fn extra_attributes(device: &DeviceRecord) -> String {
    device
        .iter()
        .filter(|(key, _)| !COLUMNS.contains(&key.as_str()))
        .map(|(key, value)| match value {
            Some(value) => format!("{key}:{value}"),
            None => key.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per device: serial, model, product, transport id, other attributes
pub fn format_devices(listing: &DeviceListing) -> String {
    if listing.is_empty() {
        return format!("No devices attached via {}\n", listing.tool);
    }

    let id_width = listing
        .devices
        .iter()
        .filter_map(DeviceRecord::id)
        .map(str::len)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for device in &listing.devices {
        let field = |key: &str| device.get(key).unwrap_or(PLACEHOLDER);
        let line = format!(
            "{:<width$}  {:<20}  {:<20}  transport:{}  {}",
            device.id().unwrap_or(PLACEHOLDER),
            field("model"),
            field("product"),
            field("transport_id"),
            extra_attributes(device),
            width = id_width,
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("{} device(s) via {}\n", listing.len(), listing.tool));
    out
}
