//! Scan report types

use super::{NewAlbum, NewTrack, TrackSummary};
use serde::{Deserialize, Serialize};

/// An album created by a scan
pub type AlbumDiscovery = NewAlbum;

/// A track created by a scan
pub type TrackDiscovery = NewTrack;

/// Entities a scan created, grouped by level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discoveries {
    pub artists: Vec<String>,
    pub albums: Vec<AlbumDiscovery>,
    pub tracks: Vec<TrackDiscovery>,
}

impl Discoveries {
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.albums.is_empty() && self.tracks.is_empty()
    }
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Tracks removed because their file is gone
    pub orphans: Vec<TrackSummary>,

    /// Artists, albums and tracks created
    pub discoveries: Discoveries,
}

impl ScanReport {
    /// True when the pass changed nothing
    pub fn is_empty(&self) -> bool {
        self.orphans.is_empty() && self.discoveries.is_empty()
    }

    pub fn totals(&self) -> ScanTotals {
        ScanTotals {
            orphans: self.orphans.len(),
            artists: self.discoveries.artists.len(),
            albums: self.discoveries.albums.len(),
            tracks: self.discoveries.tracks.len(),
        }
    }
}

/// Per-category counts of a `ScanReport`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTotals {
    pub orphans: usize,
    pub artists: usize,
    pub albums: usize,
    pub tracks: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_serializes_to_nested_shape() {
        let value = serde_json::to_value(ScanReport::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "orphans": [],
                "discoveries": { "artists": [], "albums": [], "tracks": [] }
            })
        );
    }

    #[test]
    fn totals_count_each_category() {
        let mut report = ScanReport::default();
        report.discoveries.artists.push("X".to_string());
        report.discoveries.albums.push(NewAlbum {
            name: "Y".to_string(),
            artist_id: 1,
        });

        assert!(!report.is_empty());
        let totals = report.totals();
        assert_eq!(totals.artists, 1);
        assert_eq!(totals.albums, 1);
        assert_eq!(totals.tracks, 0);
        assert_eq!(totals.orphans, 0);
    }
}
