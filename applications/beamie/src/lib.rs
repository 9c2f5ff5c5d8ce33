//! Beamie
//!
//! Personal media catalog: scans media folders into a SQLite catalog of
//! artists, albums and tracks and lets you browse the result.
//!
//! This library exposes the command implementations for testing purposes.

pub mod commands;
pub mod config;
pub mod error;

pub use config::BeamieConfig;
pub use error::{AppError, Result};
