use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::{fmt::Display, str::FromStr};

/// One entry of the `nvme list` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListedDevice {
    pub device_path: String,
    pub model_number: String,
    pub serial_number: String,
}

/// `nvme list` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceList {
    #[serde(rename = "Devices", default)]
    pub devices: Vec<ListedDevice>,
}

/// SMART / health log fields used by the graphs
///
/// nvme-cli prints wide counters as JSON strings on some versions, so every
/// field accepts a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SmartLog {
    /// Composite temperature in Kelvin
    #[serde(deserialize_with = "number_or_string")]
    pub temperature: i64,
    #[serde(deserialize_with = "number_or_string")]
    pub thm_temp1_trans_count: u64,
    #[serde(deserialize_with = "number_or_string")]
    pub percent_used: u64,
    #[serde(deserialize_with = "number_or_string")]
    pub media_errors: u64,
    #[serde(deserialize_with = "number_or_string")]
    pub avail_spare: u64,
    #[serde(deserialize_with = "number_or_string")]
    pub spare_thresh: u64,
}

/// Controller identity fields used by the graphs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdCtrl {
    /// Warning composite temperature threshold in Kelvin, 0 when unset
    #[serde(deserialize_with = "number_or_string")]
    pub wctemp: i64,
    /// Critical composite temperature threshold in Kelvin, 0 when unset
    #[serde(deserialize_with = "number_or_string")]
    pub cctemp: i64,
}

/// Accept `12` as well as `"12"`.
fn number_or_string<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString<T> {
        Number(T),
        String(String),
    }

    match NumberOrString::<T>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

/// An NVMe device as seen during one plugin run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub device_path: String,
    pub system_name: String,
    pub model_name: String,
    pub serial_number: String,
    pub metrics: SmartLog,
    pub controller: IdCtrl,
}

/// Devices keyed by their sanitized field name, in enumeration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceMap {
    entries: Vec<(String, Device)>,
}

impl DeviceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a device; an existing key keeps its position and gets the new device.
    pub fn insert(&mut self, key: String, device: Device) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = device,
            None => self.entries.push((key, device)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Device> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, device)| device)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Device)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What the agent asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Autoconf,
    Config,
    Fetch,
}

impl Mode {
    /// Interpret the first plugin argument. Anything unknown means fetch.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("autoconf") => Self::Autoconf,
            Some("config") => Self::Config,
            _ => Self::Fetch,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Fetch
    }
}

/// Kelvin to Celsius, as the controller reports whole degrees
pub fn ktoc(kelvin: i64) -> i64 {
    kelvin - 273
}
