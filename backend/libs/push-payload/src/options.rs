use serde::{Deserialize, Serialize};

/// Delivery options
///
/// Every field is omitted from the wire when absent or zero, and the whole
/// block is omitted when nothing is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Caller-chosen id echoed back in the send response
    #[serde(default, skip_serializing_if = "is_zero")]
    pub sendno: i32,

    /// Seconds an offline message is kept for later delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_msg_id: Option<i64>,

    /// `true` targets the APNs production environment, `false` the sandbox
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apns_production: Option<bool>,

    /// Minutes over which a large push is spread
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_push_duration: Option<i32>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sendno(mut self, sendno: i32) -> Self {
        self.sendno = sendno;
        self
    }

    pub fn with_time_to_live(mut self, time_to_live: i64) -> Self {
        self.time_to_live = Some(time_to_live);
        self
    }

    pub fn with_override_msg_id(mut self, override_msg_id: i64) -> Self {
        self.override_msg_id = Some(override_msg_id);
        self
    }

    pub fn with_apns_production(mut self, apns_production: bool) -> Self {
        self.apns_production = Some(apns_production);
        self
    }

    pub fn with_big_push_duration(mut self, minutes: i32) -> Self {
        self.big_push_duration = Some(minutes);
        self
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}
