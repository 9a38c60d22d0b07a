//! Unit tests for the board context.
//!
//! Tests are organised by concern: pure domain rules, stage resolution,
//! approval windows, view ordering, and the application services over the
//! in-memory store.

mod approval_tests;
mod registry_tests;
mod view_tests;
