//! Weather Console Library
//!
//! Exposes the building blocks of the `weather` binary for integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod temperature;
pub mod ui;
pub mod units;
