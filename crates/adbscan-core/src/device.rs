//! Device types for records reported by `adb devices -l`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// A device line from the tool, as a mapping of attribute name to value.
///
/// Records produced by the parser always start with `id` and `type`; every
/// `key:value` feature token adds one more entry. A feature token without a
/// colon is stored with no value. Feature tokens may overwrite `id` or `type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceRecord(BTreeMap<String, Option<String>>);

impl DeviceRecord {
    /// Key holding the device serial
    pub const ID: &'static str = "id";
    /// Key holding the connection type
    pub const TYPE: &'static str = "type";

    /// Create a record with only the `id` and `type` entries
    pub fn new(id: &str, device_type: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(Self::ID.to_string(), Some(id.to_string()));
        entries.insert(Self::TYPE.to_string(), Some(device_type.to_string()));
        Self(entries)
    }

    /// Set an entry, returning the previous value if the key was present
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) -> Option<Option<String>> {
        self.0.insert(key.into(), value)
    }

    /// Value stored under `key`, if the key is present and has a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    /// Whether `key` is present, with or without a value
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.get(Self::ID)
    }

    pub fn device_type(&self) -> Option<&str> {
        self.get(Self::TYPE)
    }

    /// True when the record's `type` is exactly `device`
    pub fn is_device(&self) -> bool {
        self.device_type() == Some("device")
    }

    /// Iterate entries in key order, `id` and `type` included
    pub fn iter(&self) -> btree_map::Iter<'_, String, Option<String>> {
        self.0.iter()
    }
}

impl std::fmt::Display for DeviceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({})",
            self.id().unwrap_or("?"),
            self.device_type().unwrap_or("?")
        )
    }
}

/// Devices returned by one run of the tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceListing {
    /// When the tool was run
    pub scanned_at: DateTime<Utc>,
    /// Executable that produced the listing
    pub tool: String,
    /// Records in the order the tool printed them
    pub devices: Vec<DeviceRecord>,
}

impl DeviceListing {
    pub fn new(tool: impl Into<String>, devices: Vec<DeviceRecord>) -> Self {
        Self {
            scanned_at: Utc::now(),
            tool: tool.into(),
            devices,
        }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = DeviceRecord::new("emulator-5554", "device");
        assert_eq!(record.id(), Some("emulator-5554"));
        assert_eq!(record.device_type(), Some("device"));
        assert_eq!(record.iter().count(), 2);
        assert!(record.is_device());
    }

    #[test]
    fn test_key_without_value() {
        let mut record = DeviceRecord::new("dev1", "device");
        record.insert("nestedflag", None);
        assert!(record.contains_key("nestedflag"));
        assert_eq!(record.get("nestedflag"), None);
        assert!(!record.contains_key("model"));
    }

    #[test]
    fn test_type_overwrite() {
        let mut record = DeviceRecord::new("dev1", "device");
        let previous = record.insert(DeviceRecord::TYPE, Some("usb".to_string()));
        assert_eq!(previous, Some(Some("device".to_string())));
        assert!(!record.is_device());
        assert_eq!(record.device_type(), Some("usb"));
    }

    #[test]
    fn test_serialize_flat_map() {
        let mut record = DeviceRecord::new("dev1", "device");
        record.insert("model", Some("Pixel_7".to_string()));
        record.insert("flag", None);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "dev1",
                "type": "device",
                "model": "Pixel_7",
                "flag": null,
            })
        );

        let back: DeviceRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_display() {
        let record = DeviceRecord::new("R58M123ABC", "device");
        assert_eq!(record.to_string(), "R58M123ABC (device)");
    }
}
