//! Domain model for the notification context.

mod error;
mod notification;

pub use error::{NotificationDomainError, ParseNotificationKindError};
pub use notification::{
    Notification, NotificationId, NotificationKind, PersistedNotificationData,
};
