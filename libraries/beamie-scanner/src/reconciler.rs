//! Reconciliation of the filesystem against the catalog
//!
//! A pass runs strictly in order: orphan removal, walk, candidate filtering,
//! tag extraction, then artist, album and track resolution. Each resolution
//! step looks entities up first, stages the missing ones once per pass and
//! inserts them as a single batch, so a parent always exists before its
//! children are staged.

use crate::report::ReportBuilder;
use crate::walker::FileWalker;
use crate::Result;
use beamie_core::types::{AlbumId, ArtistId};
use beamie_core::{
    AlbumDiscovery, CatalogStore, NewAlbum, NewTrack, ScanReport, TagReader, TaggedFile,
    TrackDiscovery, TrackSummary,
};
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Tuning knobs for a reconciliation pass
#[derive(Debug, Clone, Copy)]
pub struct ReconcileOptions {
    /// Maximum number of files whose tags are read concurrently
    pub tag_workers: usize,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            tag_workers: num_cpus::get(),
        }
    }
}

impl ReconcileOptions {
    /// Set the number of concurrent tag readers (at least one)
    pub fn tag_workers(mut self, workers: usize) -> Self {
        self.tag_workers = workers.max(1);
        self
    }
}

/// Reconciles media roots against a catalog store
///
/// Only one pass runs at a time per reconciler; concurrent calls to
/// [`Reconciler::reconcile`] wait for the running pass to finish.
pub struct Reconciler<S, R> {
    store: Arc<S>,
    reader: Arc<R>,
    walker: FileWalker,
    options: ReconcileOptions,
    write_lock: Mutex<()>,
}

impl<S, R> Reconciler<S, R>
where
    S: CatalogStore,
    R: TagReader + 'static,
{
    /// Create a new reconciler
    pub fn new(store: Arc<S>, reader: Arc<R>) -> Self {
        Self {
            store,
            reader,
            walker: FileWalker::new(),
            options: ReconcileOptions::default(),
            write_lock: Mutex::new(()),
        }
    }

    /// Replace the pass options
    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the file walker
    pub fn with_walker(mut self, walker: FileWalker) -> Self {
        self.walker = walker;
        self
    }

    /// Run one full reconciliation pass
    ///
    /// Store failures abort the pass. Files whose tags cannot be read and
    /// records whose parent cannot be resolved are skipped.
    pub async fn reconcile(
        &self,
        roots: &[PathBuf],
        allowed_extensions: &[String],
    ) -> Result<ScanReport> {
        let _guard = self.write_lock.lock().await;
        let start_time = Instant::now();

        tracing::info!(
            "Starting library scan of {} root(s) for {:?}",
            roots.len(),
            allowed_extensions
        );

        let mut report = ReportBuilder::new();
        report.orphans(self.remove_orphans().await?);

        let walker = self.walker;
        let owned_roots = roots.to_vec();
        let files = tokio::task::spawn_blocking(move || walker.walk(&owned_roots)).await?;

        let candidates = Self::filter_candidates(files, allowed_extensions);
        tracing::debug!("{} candidate file(s) after filtering", candidates.len());

        let tagged = self.extract_tags(candidates).await?;

        report.artists(self.resolve_artists(&tagged).await?);
        report.albums(self.resolve_albums(&tagged).await?);
        report.tracks(self.resolve_tracks(&tagged).await?);

        let report = report.build();
        let totals = report.totals();

        tracing::info!(
            "Library scan complete in {:?}: {} orphan(s), {} artist(s), {} album(s), {} track(s)",
            start_time.elapsed(),
            totals.orphans,
            totals.artists,
            totals.albums,
            totals.tracks
        );

        Ok(report)
    }

    /// Delete every track whose file is gone
    ///
    /// A file only counts as gone when the filesystem reports it as not
    /// found; other stat failures leave the track in place.
    pub async fn remove_orphans(&self) -> Result<Vec<TrackSummary>> {
        let mut orphans = Vec::new();

        for track in self.store.all_tracks().await? {
            match tokio::fs::metadata(&track.filename).await {
                Ok(_) => continue,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!("Cannot stat {}, keeping track: {}", track.filename, e);
                    continue;
                }
            }

            self.store.delete_track(track.id).await?;
            tracing::debug!("Removed orphaned track: {}", track);
            orphans.push(track);
        }

        Ok(orphans)
    }

    /// Keep the files whose name ends with one of the allowed extensions
    ///
    /// The match is a case-sensitive suffix comparison.
    pub fn filter_candidates(
        files: impl IntoIterator<Item = PathBuf>,
        allowed_extensions: &[String],
    ) -> Vec<PathBuf> {
        files
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| allowed_extensions.iter().any(|ext| name.ends_with(ext.as_str())))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Read tags from every candidate, in parallel
    ///
    /// At most `tag_workers` files are read at once. Unreadable files are
    /// skipped. The result is sorted by filename.
    pub async fn extract_tags(&self, candidates: Vec<PathBuf>) -> Result<Vec<TaggedFile>> {
        let files: Vec<(PathBuf, String)> = candidates
            .into_iter()
            .filter_map(|path| match path.to_str().map(str::to_string) {
                Some(filename) => Some((path, filename)),
                None => {
                    tracing::warn!("Skipping non UTF-8 path: {}", path.display());
                    None
                }
            })
            .collect();

        let results: Vec<_> = stream::iter(files)
            .map(|(path, filename)| {
                let reader = self.reader.clone();
                async move {
                    let read = tokio::task::spawn_blocking(move || reader.read(&path)).await;
                    (filename, read)
                }
            })
            .buffer_unordered(self.options.tag_workers.max(1))
            .collect()
            .await;

        let mut tagged = Vec::with_capacity(results.len());
        for (filename, read) in results {
            match read? {
                Ok(tags) => tagged.push(TaggedFile::from_tags(filename, tags)),
                Err(e) => tracing::debug!("Skipping file without usable tags: {}", e),
            }
        }

        tagged.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(tagged)
    }

    /// Create the artists not yet in the catalog
    ///
    /// Returns the names created, in first-seen order.
    pub async fn resolve_artists(&self, files: &[TaggedFile]) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut staged = Vec::new();

        for file in files {
            if !seen.insert(file.artist_name.as_str()) {
                continue;
            }

            match self.store.find_artist_by_name(&file.artist_name).await? {
                Some(artist) => tracing::debug!("Artist exists: {}", artist.name),
                None => {
                    tracing::debug!("Discovered artist: {}", file.artist_name);
                    staged.push(file.artist_name.clone());
                }
            }
        }

        if !staged.is_empty() {
            self.store.insert_artists(&staged).await?;
        }

        Ok(staged)
    }

    /// Create the albums not yet in the catalog
    ///
    /// An album is identified by its name together with its artist.
    pub async fn resolve_albums(&self, files: &[TaggedFile]) -> Result<Vec<AlbumDiscovery>> {
        let mut seen = HashSet::new();
        let mut artist_ids: HashMap<&str, Option<ArtistId>> = HashMap::new();
        let mut staged = Vec::new();

        for file in files {
            if !seen.insert((file.album_name.as_str(), file.artist_name.as_str())) {
                continue;
            }

            let artist_id = match artist_ids.get(file.artist_name.as_str()) {
                Some(id) => *id,
                None => {
                    let id = self
                        .store
                        .find_artist_by_name(&file.artist_name)
                        .await?
                        .map(|artist| artist.id);
                    artist_ids.insert(file.artist_name.as_str(), id);
                    id
                }
            };

            let Some(artist_id) = artist_id else {
                tracing::warn!(
                    "Skipping album {}: artist {} is not in the catalog",
                    file.album_name,
                    file.artist_name
                );
                continue;
            };

            match self.store.find_album_by_name(&file.album_name, artist_id).await? {
                Some(album) => tracing::debug!("Album exists: {}", album.name),
                None => {
                    tracing::debug!("Discovered album: {} by {}", file.album_name, file.artist_name);
                    staged.push(NewAlbum {
                        name: file.album_name.clone(),
                        artist_id,
                    });
                }
            }
        }

        if !staged.is_empty() {
            self.store.insert_albums(&staged).await?;
        }

        Ok(staged)
    }

    /// Create the tracks not yet in the catalog
    pub async fn resolve_tracks(&self, files: &[TaggedFile]) -> Result<Vec<TrackDiscovery>> {
        let mut seen = HashSet::new();
        let mut album_ids: HashMap<(&str, &str), Option<AlbumId>> = HashMap::new();
        let mut staged = Vec::new();

        for file in files {
            if !seen.insert(file.filename.as_str()) {
                continue;
            }

            if self.store.find_track_by_filename(&file.filename).await?.is_some() {
                tracing::debug!("Track exists: {}", file.filename);
                continue;
            }

            let key = (file.album_name.as_str(), file.artist_name.as_str());
            let album_id = match album_ids.get(&key) {
                Some(id) => *id,
                None => {
                    let id = self.find_album_id(file).await?;
                    album_ids.insert(key, id);
                    id
                }
            };

            let Some(album_id) = album_id else {
                tracing::warn!(
                    "Skipping {}: album {} by {} is not in the catalog",
                    file.filename,
                    file.album_name,
                    file.artist_name
                );
                continue;
            };

            tracing::debug!("Discovered track: {}", file.filename);
            staged.push(NewTrack {
                filename: file.filename.clone(),
                name: file.title.clone(),
                album_id,
                number: file.track_number,
            });
        }

        if !staged.is_empty() {
            self.store.insert_tracks(&staged).await?;
        }

        Ok(staged)
    }

    async fn find_album_id(&self, file: &TaggedFile) -> Result<Option<AlbumId>> {
        let Some(artist) = self.store.find_artist_by_name(&file.artist_name).await? else {
            return Ok(None);
        };

        Ok(self
            .store
            .find_album_by_name(&file.album_name, artist.id)
            .await?
            .map(|album| album.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beamie_core::BeamieError;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    type NoStore = Reconciler<NullStore, NullReader>;

    struct NullReader;

    impl TagReader for NullReader {
        fn read(&self, path: &Path) -> beamie_core::Result<beamie_core::TrackTags> {
            Err(BeamieError::metadata(path.display().to_string()))
        }
    }

    struct NullStore;

    #[async_trait::async_trait]
    impl CatalogStore for NullStore {
        async fn find_artist_by_name(
            &self,
            _name: &str,
        ) -> beamie_core::Result<Option<beamie_core::Artist>> {
            Ok(None)
        }
        async fn find_album_by_name(
            &self,
            _name: &str,
            _artist_id: ArtistId,
        ) -> beamie_core::Result<Option<beamie_core::Album>> {
            Ok(None)
        }
        async fn find_track_by_filename(
            &self,
            _filename: &str,
        ) -> beamie_core::Result<Option<beamie_core::Track>> {
            Ok(None)
        }
        async fn all_tracks(&self) -> beamie_core::Result<Vec<TrackSummary>> {
            Ok(Vec::new())
        }
        async fn insert_artists(
            &self,
            _names: &[String],
        ) -> beamie_core::Result<Vec<beamie_core::Artist>> {
            Ok(Vec::new())
        }
        async fn insert_albums(
            &self,
            _albums: &[NewAlbum],
        ) -> beamie_core::Result<Vec<beamie_core::Album>> {
            Ok(Vec::new())
        }
        async fn insert_tracks(
            &self,
            _tracks: &[NewTrack],
        ) -> beamie_core::Result<Vec<beamie_core::Track>> {
            Ok(Vec::new())
        }
        async fn delete_track(&self, _id: beamie_core::TrackId) -> beamie_core::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_filter_candidates_is_case_sensitive_suffix() {
        let files = vec![
            PathBuf::from("/music/a.mp3"),
            PathBuf::from("/music/b.MP3"),
            PathBuf::from("/music/c.flac"),
            PathBuf::from("/music/mp3"),
            PathBuf::from("/music/d.mp3.part"),
        ];

        let kept = NoStore::filter_candidates(files, &[".mp3".to_string()]);
        assert_eq!(kept, vec![PathBuf::from("/music/a.mp3")]);
    }

    #[test]
    fn test_filter_candidates_multiple_extensions() {
        let files = vec![
            PathBuf::from("/music/a.mp3"),
            PathBuf::from("/music/c.flac"),
            PathBuf::from("/music/cover.jpg"),
        ];

        let kept = NoStore::filter_candidates(files, &[".mp3".to_string(), ".flac".to_string()]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_filter_candidates_no_extensions_keeps_nothing() {
        let kept = NoStore::filter_candidates(vec![PathBuf::from("/music/a.mp3")], &[]);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_tag_workers_has_a_floor() {
        assert_eq!(ReconcileOptions::default().tag_workers(0).tag_workers, 1);
        assert!(ReconcileOptions::default().tag_workers >= 1);
    }

    /// Reader recording how many reads overlap
    #[derive(Default)]
    struct CountingReader {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    impl TagReader for CountingReader {
        fn read(&self, path: &Path) -> beamie_core::Result<beamie_core::TrackTags> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(10));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);

            Ok(beamie_core::TrackTags::new(
                "X",
                "Y",
                path.display().to_string(),
                1,
            ))
        }
    }

    #[tokio::test]
    async fn test_tag_reads_are_bounded_by_workers() {
        let reader = Arc::new(CountingReader::default());
        let reconciler = Reconciler::new(Arc::new(NullStore), reader.clone())
            .with_options(ReconcileOptions::default().tag_workers(3));

        let candidates: Vec<_> = (0..24)
            .map(|i| PathBuf::from(format!("/music/{i:02}.mp3")))
            .collect();
        let tagged = reconciler.extract_tags(candidates).await.unwrap();

        assert_eq!(reader.calls.load(Ordering::SeqCst), 24);
        assert!(reader.peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(tagged.len(), 24);
        assert_eq!(tagged[0].filename, "/music/00.mp3");
        assert_eq!(tagged[23].filename, "/music/23.mp3");
    }

    #[tokio::test]
    async fn test_unreadable_files_are_skipped() {
        let reconciler = Reconciler::new(Arc::new(NullStore), Arc::new(NullReader));
        let tagged = reconciler
            .extract_tags(vec![PathBuf::from("/music/a.mp3")])
            .await
            .unwrap();
        assert!(tagged.is_empty());
    }
}
