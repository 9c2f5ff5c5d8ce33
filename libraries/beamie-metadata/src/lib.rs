//! Beamie Metadata
//!
//! Tag reading for the Beamie library scanner.
//!
//! This crate provides `LoftyTagReader`, the `TagReader` implementation
//! backed by `lofty`. It supports every container `lofty` can probe (MP3,
//! FLAC, OGG, OPUS, M4A, WAV, ...).
//!
//! # Example
//!
//! ```rust,no_run
//! use beamie_core::TagReader;
//! use beamie_metadata::LoftyTagReader;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = LoftyTagReader::new();
//! let tags = reader.read(Path::new("/music/song.mp3"))?;
//! println!("{} - {}", tags.artist, tags.title);
//! # Ok(())
//! # }
//! ```

mod error;
mod reader;

pub use error::{MetadataError, Result};
pub use reader::LoftyTagReader;
