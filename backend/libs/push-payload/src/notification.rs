use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{PayloadError, Result};

/// Custom key/value pairs attached to a platform notification
pub type Extras = BTreeMap<String, Value>;

/// System notification shown by the OS
///
/// `alert` is shared by every platform; a platform block overrides it for
/// that platform only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidNotification>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<IosNotification>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winphone: Option<WinphoneNotification>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alert(mut self, alert: impl Into<String>) -> Self {
        self.alert = Some(alert.into());
        self
    }

    pub fn with_android(mut self, android: AndroidNotification) -> Self {
        self.android = Some(android);
        self
    }

    pub fn with_ios(mut self, ios: IosNotification) -> Self {
        self.ios = Some(ios);
        self
    }

    pub fn with_winphone(mut self, winphone: WinphoneNotification) -> Self {
        self.winphone = Some(winphone);
        self
    }

    /// At least one of the shared alert or a platform block must be set
    pub fn check(&self) -> Result<()> {
        let has_alert = self.alert.as_deref().is_some_and(|a| !a.is_empty());
        if has_alert || self.android.is_some() || self.ios.is_some() || self.winphone.is_some() {
            Ok(())
        } else {
            Err(PayloadError::content("no notification payload is set"))
        }
    }
}

/// Android-specific notification block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AndroidNotification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Notification layout id registered in the client app
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder_id: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_text: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: Extras,
}

impl AndroidNotification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alert(mut self, alert: impl Into<String>) -> Self {
        self.alert = Some(alert.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_builder_id(mut self, builder_id: i32) -> Self {
        self.builder_id = Some(builder_id);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

/// iOS-specific notification block, forwarded to APNs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IosNotification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,

    /// Absolute value or a relative change such as `"+1"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,

    #[serde(
        rename = "content-available",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_available: Option<bool>,

    #[serde(
        rename = "mutable-content",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mutable_content: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: Extras,
}

impl IosNotification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alert(mut self, alert: impl Into<String>) -> Self {
        self.alert = Some(alert.into());
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    /// Increment the badge by one on delivery
    pub fn auto_badge(self) -> Self {
        self.with_badge("+1")
    }

    pub fn with_content_available(mut self, content_available: bool) -> Self {
        self.content_available = Some(content_available);
        self
    }

    pub fn with_mutable_content(mut self, mutable_content: bool) -> Self {
        self.mutable_content = Some(mutable_content);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

/// Windows Phone notification block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WinphoneNotification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page opened when the toast is tapped
    #[serde(rename = "_open_page", default, skip_serializing_if = "Option::is_none")]
    pub open_page: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: Extras,
}

impl WinphoneNotification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alert(mut self, alert: impl Into<String>) -> Self {
        self.alert = Some(alert.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_open_page(mut self, open_page: impl Into<String>) -> Self {
        self.open_page = Some(open_page.into());
        self
    }
}
