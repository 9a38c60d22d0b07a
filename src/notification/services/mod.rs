//! Application services for the notification context.

mod dispatcher;

pub use dispatcher::{DispatchError, NotificationDispatcher, NotifyRequest};
