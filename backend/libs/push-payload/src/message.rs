use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{PayloadError, Result};

/// Custom message delivered to the app instead of the system tray
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "msg_content", default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

impl Message {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn check(&self) -> Result<()> {
        if self.content.is_empty() {
            return Err(PayloadError::content("message content is empty"));
        }
        Ok(())
    }
}

/// SMS fallback sent when the push is not delivered in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    #[serde(default)]
    pub content: String,

    /// Seconds to wait for push delivery before sending the SMS
    #[serde(default, skip_serializing_if = "is_zero")]
    pub delay_time: u32,
}

impl SmsMessage {
    pub fn new(content: impl Into<String>, delay_time: u32) -> Self {
        Self {
            content: content.into(),
            delay_time,
        }
    }
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}
