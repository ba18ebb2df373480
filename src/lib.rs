//! Core library for the scholarship application portal service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
