//! Beamie library scanner
//!
//! Reconciles the audio files found under a set of media roots against the
//! catalog.
//!
//! # Architecture
//!
//! - `walker`: recursive filesystem walk with a cycle guard
//! - `reconciler`: orphan removal, tag extraction and the artist → album →
//!   track resolution passes
//! - `report`: assembly of the [`ScanReport`](beamie_core::ScanReport)
//!
//! # Example
//!
//! ```rust,no_run
//! use beamie_core::{CatalogStore, TagReader};
//! use beamie_scanner::Reconciler;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! async fn scan<S: CatalogStore, R: TagReader + 'static>(store: S, reader: R) {
//!     let reconciler = Reconciler::new(Arc::new(store), Arc::new(reader));
//!     let report = reconciler
//!         .reconcile(&[PathBuf::from("/music")], &[".mp3".to_string()])
//!         .await
//!         .unwrap();
//!     println!("{:?}", report.totals());
//! }
//! ```

mod error;

pub mod reconciler;
pub mod report;
pub mod walker;

pub use error::{Result, ScanError};
pub use reconciler::{ReconcileOptions, Reconciler};
pub use report::ReportBuilder;
pub use walker::FileWalker;
