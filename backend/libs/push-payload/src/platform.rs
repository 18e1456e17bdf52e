use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{PayloadError, Result};

/// Sentinel token meaning "no filtering on this dimension"
pub(crate) const ALL: &str = "all";

/// Target operating system
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Android,
    Ios,
    Winphone,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Android => "android",
            DeviceType::Ios => "ios",
            DeviceType::Winphone => "winphone",
        }
    }
}

impl FromStr for DeviceType {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "android" => Ok(DeviceType::Android),
            "ios" => Ok(DeviceType::Ios),
            "winphone" => Ok(DeviceType::Winphone),
            other => Err(PayloadError::schema(format!("unknown platform: {other}"))),
        }
    }
}

/// Target platforms of a push
///
/// Encodes as `"all"` or as an array of device tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    All,
    Devices(BTreeSet<DeviceType>),
}

impl Platform {
    pub fn all() -> Self {
        Platform::All
    }

    pub fn android() -> Self {
        Self::devices([DeviceType::Android])
    }

    pub fn ios() -> Self {
        Self::devices([DeviceType::Ios])
    }

    pub fn winphone() -> Self {
        Self::devices([DeviceType::Winphone])
    }

    pub fn android_ios() -> Self {
        Self::devices([DeviceType::Android, DeviceType::Ios])
    }

    pub fn devices(devices: impl IntoIterator<Item = DeviceType>) -> Self {
        Platform::Devices(devices.into_iter().collect())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Platform::All)
    }

    /// Whether a push with this platform reaches the given device type
    pub fn includes(&self, device: DeviceType) -> bool {
        match self {
            Platform::All => true,
            Platform::Devices(set) => set.contains(&device),
        }
    }

    pub fn check(&self) -> Result<()> {
        match self {
            Platform::Devices(set) if set.is_empty() => {
                Err(PayloadError::schema("platform device set is empty"))
            }
            _ => Ok(()),
        }
    }

    /// Decode the wire form, rejecting unknown tags and empty arrays
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) if s.eq_ignore_ascii_case(ALL) => Ok(Platform::All),
            Value::String(s) => Err(PayloadError::schema(format!(
                "platform must be \"all\" or an array, got \"{s}\""
            ))),
            Value::Array(items) => {
                let devices = items
                    .iter()
                    .map(|item| match item {
                        Value::String(tag) => tag.parse::<DeviceType>(),
                        other => Err(PayloadError::schema(format!(
                            "platform tag must be a string, got {other}"
                        ))),
                    })
                    .collect::<Result<BTreeSet<_>>>()?;
                let platform = Platform::Devices(devices);
                platform.check()?;
                Ok(platform)
            }
            other => Err(PayloadError::schema(format!(
                "platform must be \"all\" or an array, got {other}"
            ))),
        }
    }
}

impl Serialize for Platform {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Platform::All => ALL.serialize(serializer),
            Platform::Devices(set) => set.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Platform::from_value(&value).map_err(serde::de::Error::custom)
    }
}
