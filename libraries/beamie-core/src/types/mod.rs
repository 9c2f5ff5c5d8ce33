mod album;
mod artist;
mod report;
mod tags;
mod track;

pub use album::{Album, AlbumId, AlbumSummary, NewAlbum};
pub use artist::{Artist, ArtistId};
pub use report::{AlbumDiscovery, Discoveries, ScanReport, ScanTotals, TrackDiscovery};
pub use tags::{TaggedFile, TrackTags};
pub use track::{NewTrack, Track, TrackId, TrackSummary};
