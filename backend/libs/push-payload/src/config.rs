use serde::Deserialize;

use crate::errors::Result;

/// Delivery defaults applied to outgoing payloads
///
/// Read from `PUSH_APNS_PRODUCTION` and `PUSH_TIME_TO_LIVE`; unset
/// variables leave the payload's own options untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PushConfig {
    pub apns_production: Option<bool>,
    pub time_to_live: Option<i64>,
}

impl PushConfig {
    pub fn from_env() -> Result<Self> {
        Ok(envy::prefixed("PUSH_").from_env::<PushConfig>()?)
    }

    /// Target the APNs production environment
    pub fn production() -> Self {
        Self {
            apns_production: Some(true),
            time_to_live: None,
        }
    }

    pub fn with_time_to_live(mut self, time_to_live: i64) -> Self {
        self.time_to_live = Some(time_to_live);
        self
    }
}
