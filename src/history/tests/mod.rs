//! Unit tests for the history context.

mod fixtures;
mod postgres_row_tests;
mod recorder_tests;
