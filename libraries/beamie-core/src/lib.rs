//! Beamie Core
//!
//! Storage-agnostic domain types, collaborator contracts, and error handling
//! for the Beamie media catalog.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Artist`, `Album`, `Track`, `TaggedFile`, `ScanReport`
//! - **Core Traits**: `TagReader` (file → tags) and `CatalogStore` (catalog rows)
//! - **Error Handling**: Unified `BeamieError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use beamie_core::types::{TaggedFile, TrackTags};
//!
//! let tags = TrackTags::new("Artist", "Album", "Title", 1);
//! let tagged = TaggedFile::from_tags("/music/a.mp3", tags);
//!
//! assert_eq!(tagged.artist_name, "Artist");
//! assert_eq!(tagged.track_number, 1);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{BeamieError, Result};
pub use storage::CatalogStore;
pub use traits::TagReader;

pub use types::{
    Album, AlbumDiscovery, AlbumId, AlbumSummary, Artist, ArtistId, Discoveries, NewAlbum,
    NewTrack, ScanReport, ScanTotals, TaggedFile, Track, TrackDiscovery, TrackId, TrackSummary,
    TrackTags,
};
