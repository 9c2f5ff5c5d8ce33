//! Scan report assembly

use beamie_core::{AlbumDiscovery, ScanReport, TrackDiscovery, TrackSummary};

/// Accumulates the outcome of each reconciliation step
#[derive(Debug, Default)]
pub struct ReportBuilder {
    report: ScanReport,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orphans(&mut self, orphans: impl IntoIterator<Item = TrackSummary>) -> &mut Self {
        self.report.orphans.extend(orphans);
        self
    }

    pub fn artists(&mut self, names: impl IntoIterator<Item = String>) -> &mut Self {
        self.report.discoveries.artists.extend(names);
        self
    }

    pub fn albums(&mut self, albums: impl IntoIterator<Item = AlbumDiscovery>) -> &mut Self {
        self.report.discoveries.albums.extend(albums);
        self
    }

    pub fn tracks(&mut self, tracks: impl IntoIterator<Item = TrackDiscovery>) -> &mut Self {
        self.report.discoveries.tracks.extend(tracks);
        self
    }

    pub fn build(self) -> ScanReport {
        self.report
    }
}
