use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::audience::Audience;
use crate::config::PushConfig;
use crate::errors::{PayloadError, Result};
use crate::message::{Message, SmsMessage};
use crate::notification::Notification;
use crate::options::Options;
use crate::platform::Platform;

/// Push request body
///
/// Field order matches the wire key order. Absent fields and default
/// options are never written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PushPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_message: Option<SmsMessage>,

    #[serde(skip_serializing_if = "Options::is_default")]
    pub options: Options,
}

/// Wire shape used for decoding. Platform and audience stay raw so their
/// tag errors surface as schema errors rather than parse errors.
#[derive(Debug, Deserialize)]
struct WirePayload {
    #[serde(default)]
    platform: Option<Value>,
    #[serde(default)]
    audience: Option<Value>,
    #[serde(default)]
    notification: Option<Notification>,
    #[serde(default)]
    message: Option<Message>,
    #[serde(default)]
    sms_message: Option<SmsMessage>,
    #[serde(default)]
    options: Option<Options>,
}

impl PushPayload {
    pub fn new(
        platform: Platform,
        audience: Audience,
        notification: Option<Notification>,
        message: Option<Message>,
    ) -> Self {
        Self {
            platform: Some(platform),
            audience: Some(audience),
            notification,
            message,
            sms_message: None,
            options: Options::default(),
        }
    }

    /// Alert notification to every platform and every device
    pub fn alert_all(alert: impl Into<String>) -> Result<Self> {
        Self::new(
            Platform::all(),
            Audience::all(),
            Some(Notification::new().with_alert(alert)),
            None,
        )
        .check()
    }

    /// Custom message to every platform and every device
    pub fn message_all(content: impl Into<String>) -> Result<Self> {
        Self::new(
            Platform::all(),
            Audience::all(),
            None,
            Some(Message::content(content)),
        )
        .check()
    }

    pub fn with_sms_message(mut self, sms_message: SmsMessage) -> Self {
        self.sms_message = Some(sms_message);
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn reset_options_apns_production(&mut self, apns_production: bool) {
        self.options.apns_production = Some(apns_production);
    }

    pub fn reset_options_time_to_live(&mut self, time_to_live: i64) {
        self.options.time_to_live = Some(time_to_live);
    }

    /// Apply the delivery defaults present in the configuration
    pub fn apply_config(&mut self, config: &PushConfig) {
        if let Some(apns_production) = config.apns_production {
            self.reset_options_apns_production(apns_production);
        }
        if let Some(time_to_live) = config.time_to_live {
            self.reset_options_time_to_live(time_to_live);
        }
    }

    pub fn sendno(&self) -> i32 {
        self.options.sendno
    }

    /// Verify the required-field invariants without touching any field
    pub fn validate(&self) -> Result<()> {
        self.platform
            .as_ref()
            .ok_or(PayloadError::MissingField("platform"))?
            .check()?;
        self.audience
            .as_ref()
            .ok_or(PayloadError::MissingField("audience"))?
            .check()?;
        if self.notification.is_none() && self.message.is_none() {
            return Err(PayloadError::MissingField("notification or message"));
        }
        if let Some(message) = &self.message {
            message.check()?;
        }
        if let Some(notification) = &self.notification {
            notification.check()?;
        }
        Ok(())
    }

    /// Validate and hand the payload back for chaining
    pub fn check(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Serialize a validated payload to its wire text
    pub fn to_json(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Decode wire text and validate the result
    pub fn from_json(text: &str) -> Result<Self> {
        match Self::decode(text) {
            Ok(payload) => {
                debug!("Decoded push payload (sendno={})", payload.sendno());
                Ok(payload)
            }
            Err(e) => {
                error!("Failed to decode push payload: {}", e);
                Err(e)
            }
        }
    }

    fn decode(text: &str) -> Result<Self> {
        let wire: WirePayload = serde_json::from_str(text)?;
        let platform = wire.platform.as_ref().map(Platform::from_value).transpose()?;
        let audience = wire.audience.as_ref().map(Audience::from_value).transpose()?;
        Self {
            platform,
            audience,
            notification: wire.notification,
            message: wire.message,
            sms_message: wire.sms_message,
            options: wire.options.unwrap_or_default(),
        }
        .check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audience::AudienceKind;
    use crate::notification::{AndroidNotification, IosNotification};

    #[test]
    fn test_alert_all_wire_form() {
        let payload = PushPayload::alert_all("hello").unwrap();
        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"platform":"all","audience":"all","notification":{"alert":"hello"}}"#
        );
    }

    #[test]
    fn test_message_all_wire_form() {
        let payload = PushPayload::message_all("ping").unwrap();
        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"platform":"all","audience":"all","message":{"msg_content":"ping"}}"#
        );
    }

    #[test]
    fn test_shortcuts_reject_empty_content() {
        assert!(matches!(
            PushPayload::alert_all(""),
            Err(PayloadError::Content(_))
        ));
        assert!(matches!(
            PushPayload::message_all(""),
            Err(PayloadError::Content(_))
        ));
    }

    #[test]
    fn test_missing_platform_is_reported_first() {
        let payload = PushPayload {
            platform: None,
            audience: None,
            ..PushPayload::alert_all("x").unwrap()
        };
        assert_eq!(
            payload.validate(),
            Err(PayloadError::MissingField("platform"))
        );
    }

    #[test]
    fn test_missing_audience() {
        let payload = PushPayload {
            audience: None,
            ..PushPayload::alert_all("x").unwrap()
        };
        assert_eq!(
            payload.check().unwrap_err(),
            PayloadError::MissingField("audience")
        );
    }

    #[test]
    fn test_missing_notification_and_message() {
        let payload = PushPayload::new(Platform::all(), Audience::all(), None, None);
        assert_eq!(
            payload.validate(),
            Err(PayloadError::MissingField("notification or message"))
        );
    }

    #[test]
    fn test_platform_checked_before_audience() {
        let payload = PushPayload::new(
            Platform::devices(Vec::new()),
            Audience::tag(Vec::<String>::new()),
            Some(Notification::new().with_alert("x")),
            None,
        );
        let err = payload.validate().unwrap_err();
        assert_eq!(
            err,
            PayloadError::Schema("platform device set is empty".to_string())
        );
    }

    #[test]
    fn test_check_returns_unchanged_payload() {
        let payload = PushPayload::new(
            Platform::android_ios(),
            Audience::alias(["u1"]).and(AudienceKind::Tag, ["vip"]),
            Some(
                Notification::new()
                    .with_alert("hi")
                    .with_android(AndroidNotification::new().with_title("T"))
                    .with_ios(IosNotification::new().with_sound("default")),
            ),
            Some(Message::content("data")),
        );
        let checked = payload.clone().check().unwrap();
        assert_eq!(checked, payload);
    }

    #[test]
    fn test_to_json_refuses_invalid_payload() {
        let payload = PushPayload::default();
        assert_eq!(
            payload.to_json(),
            Err(PayloadError::MissingField("platform"))
        );
    }

    #[test]
    fn test_reset_options() {
        let mut payload = PushPayload::alert_all("x").unwrap();
        assert_eq!(payload.sendno(), 0);
        payload.reset_options_apns_production(true);
        payload.reset_options_time_to_live(3600);
        assert_eq!(payload.options.apns_production, Some(true));
        assert_eq!(payload.options.time_to_live, Some(3600));
        assert!(payload
            .to_json()
            .unwrap()
            .ends_with(r#""options":{"time_to_live":3600,"apns_production":true}}"#));
    }

    #[test]
    fn test_apply_config_only_touches_present_values() {
        let mut payload = PushPayload::alert_all("x")
            .unwrap()
            .with_options(Options::new().with_time_to_live(10));
        payload.apply_config(&PushConfig {
            apns_production: Some(false),
            time_to_live: None,
        });
        assert_eq!(payload.options.apns_production, Some(false));
        assert_eq!(payload.options.time_to_live, Some(10));
    }

    #[test]
    fn test_from_json_reports_schema_error_for_bad_tag() {
        let err = PushPayload::from_json(
            r#"{"platform":["android","blackberry"],"audience":"all","message":{"msg_content":"x"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PayloadError::Schema(_)));
    }

    #[test]
    fn test_from_json_reports_parse_error_for_malformed_text() {
        let err = PushPayload::from_json(r#"{"platform":"all","#).unwrap_err();
        assert!(matches!(err, PayloadError::Parse(_)));
    }

    #[test]
    fn test_from_json_rejects_missing_platform_and_audience() {
        let err = PushPayload::from_json(r#"{"notification":{"alert":"x"}}"#).unwrap_err();
        assert_eq!(err, PayloadError::MissingField("platform"));
    }

    #[test]
    fn test_from_json_treats_null_as_absent() {
        let payload = PushPayload::from_json(
            r#"{"platform":"all","audience":"all","notification":null,"message":{"msg_content":"x"},"options":null}"#,
        )
        .unwrap();
        assert!(payload.notification.is_none());
        assert!(payload.options.is_default());
    }
}
