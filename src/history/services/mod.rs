//! Application services for the history context.

mod recorder;

pub use recorder::{HistoryRecorder, HistoryRecorderError, RecordEntryRequest};
