//! History context: the append-only audit trail of task changes.
//!
//! Every meaningful task change is recorded as an immutable
//! [`domain::HistoryEntry`]. Recording is best-effort from the caller's
//! perspective: the trail documents operations but never vetoes them.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
