//! Payload size accounting
//!
//! The delivery service rejects pushes whose per-platform content exceeds
//! fixed byte ceilings. Sizes are UTF-8 byte lengths of the compact JSON
//! encoding, computed with the same omission rules as the wire form.
use serde::Serialize;
use tracing::warn;

use crate::payload::PushPayload;
use crate::platform::DeviceType;

/// Android entity ceiling in bytes
pub const MAX_ANDROID_ENTITY_LENGTH: usize = 4096;
/// iOS entity ceiling in bytes
pub const MAX_IOS_ENTITY_LENGTH: usize = 6144;
/// APNs push frame ceiling in bytes
pub const MAX_IOS_PAYLOAD_LENGTH: usize = 2048;

/// A ceiling a payload can exceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeLimit {
    AndroidEntity,
    IosEntity,
    IosPushPayload,
}

impl SizeLimit {
    pub fn max_bytes(&self) -> usize {
        match self {
            SizeLimit::AndroidEntity => MAX_ANDROID_ENTITY_LENGTH,
            SizeLimit::IosEntity => MAX_IOS_ENTITY_LENGTH,
            SizeLimit::IosPushPayload => MAX_IOS_PAYLOAD_LENGTH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeLimit::AndroidEntity => "android_entity",
            SizeLimit::IosEntity => "ios_entity",
            SizeLimit::IosPushPayload => "ios_push_payload",
        }
    }
}

/// Size checks over a borrowed payload
#[derive(Debug, Clone, Copy)]
pub struct SizeAccountant<'a> {
    payload: &'a PushPayload,
}

impl<'a> SizeAccountant<'a> {
    pub fn new(payload: &'a PushPayload) -> Self {
        Self { payload }
    }

    /// Message plus notification, minus the block of the platform not counted
    pub fn entity_length(&self, excluded: DeviceType) -> usize {
        let mut length = self.payload.message.as_ref().map_or(0, json_length);

        if let Some(notification) = &self.payload.notification {
            let excluded_length = match excluded {
                DeviceType::Android => notification.android.as_ref().map_or(0, json_length),
                DeviceType::Ios => notification.ios.as_ref().map_or(0, json_length),
                DeviceType::Winphone => notification.winphone.as_ref().map_or(0, json_length),
            };
            length += json_length(notification).saturating_sub(excluded_length);
        }

        length
    }

    /// Length of the content forwarded to APNs
    ///
    /// This is the iOS block when present, otherwise the shared alert as a
    /// JSON string. Zero when neither exists.
    pub fn ios_push_payload_length(&self) -> usize {
        let Some(notification) = &self.payload.notification else {
            return 0;
        };
        match (&notification.ios, &notification.alert) {
            (Some(ios), _) => json_length(ios),
            (None, Some(alert)) => json_length(alert),
            (None, None) => 0,
        }
    }

    fn exceeds_entity_limit(&self, excluded: DeviceType, limit: SizeLimit) -> bool {
        self.entity_length(excluded) > limit.max_bytes()
    }

    pub fn exceeds_android_entity_limit(&self) -> bool {
        self.exceeds_entity_limit(DeviceType::Ios, SizeLimit::AndroidEntity)
    }

    pub fn exceeds_ios_entity_limit(&self) -> bool {
        self.exceeds_entity_limit(DeviceType::Android, SizeLimit::IosEntity)
    }

    /// Stricter than the iOS entity check; APNs enforces it on the final frame
    pub fn exceeds_ios_push_payload_limit(&self) -> bool {
        self.ios_push_payload_length() > SizeLimit::IosPushPayload.max_bytes()
    }

    /// Too large for Android and for iOS alike
    pub fn exceeds_global_limit(&self) -> bool {
        self.exceeds_android_entity_limit() && self.exceeds_ios_entity_limit()
    }

    /// Every ceiling this payload exceeds
    pub fn exceeded_limits(&self) -> Vec<SizeLimit> {
        let mut exceeded = Vec::new();
        if self.exceeds_android_entity_limit() {
            exceeded.push(SizeLimit::AndroidEntity);
        }
        if self.exceeds_ios_entity_limit() {
            exceeded.push(SizeLimit::IosEntity);
        }
        if self.exceeds_ios_push_payload_limit() {
            exceeded.push(SizeLimit::IosPushPayload);
        }
        exceeded
    }
}

impl PushPayload {
    pub fn size(&self) -> SizeAccountant<'_> {
        SizeAccountant::new(self)
    }
}

fn json_length<T: Serialize + ?Sized>(value: &T) -> usize {
    match serde_json::to_vec(value) {
        Ok(bytes) => bytes.len(),
        Err(e) => {
            warn!("Failed to serialize payload part for size accounting: {}", e);
            0
        }
    }
}
