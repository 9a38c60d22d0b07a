//! Notification context: per-user notifications with read receipts and
//! live broadcast feeds.
//!
//! The dispatcher persists every notification and fans it out to any live
//! subscribers of the recipient's feed. Read receipts are idempotent: the
//! first one wins.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
