//! Rollcall core - shared domain model, configuration, and errors.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
