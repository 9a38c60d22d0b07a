//! `PostgreSQL` adapters for the notification context.

mod conversion;
mod models;
mod repository;
mod schema;

pub use repository::{NotificationPgPool, PostgresNotificationStore};

#[cfg(test)]
pub(crate) use conversion::{notification_to_new_row, row_to_notification};
#[cfg(test)]
pub(crate) use models::NotificationRow;
