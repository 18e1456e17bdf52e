/// Nova Push Payload Library
///
/// This library models the request body accepted by the push delivery service
/// and keeps it valid before it leaves the process.
///
/// It handles:
/// - Platform and audience targeting with the `"all"` sentinel
/// - Notification, custom message, SMS and option blocks
/// - Required-field validation
/// - Per-platform payload size accounting against the delivery ceilings
/// - JSON encoding that omits absent and default fields, and validated decoding

pub mod audience;
pub mod config;
pub mod errors;
pub mod message;
pub mod notification;
pub mod options;
pub mod payload;
pub mod platform;
pub mod size;

pub use audience::{Audience, AudienceKind};
pub use config::PushConfig;
pub use errors::{PayloadError, Result};
pub use message::{Message, SmsMessage};
pub use notification::{AndroidNotification, IosNotification, Notification, WinphoneNotification};
pub use options::Options;
pub use payload::PushPayload;
pub use platform::{DeviceType, Platform};
pub use size::{SizeAccountant, SizeLimit};
