//! Unit tests for the notification context.

mod postgres_row_tests;
