/// Application configuration
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "beamie.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BeamieConfig {
    #[serde(default = "default_library")]
    pub library: LibrarySettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Roots scanned for audio files
    #[serde(default)]
    pub media_paths: Vec<PathBuf>,

    /// Filename suffixes considered audio files (case-sensitive)
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Number of files whose tags are read concurrently
    #[serde(default = "default_tag_workers")]
    pub tag_workers: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Level used for the beamie crates when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
}

impl BeamieConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `beamie.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (BEAMIE_STORAGE__DATABASE_URL, ...)
        settings = settings.add_source(env);

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.library.allowed_extensions.is_empty() {
            return Err(AppError::Config(
                "At least one allowed extension is required (library.allowed_extensions)"
                    .to_string(),
            ));
        }

        if self.library.allowed_extensions.iter().any(|ext| ext.is_empty()) {
            return Err(AppError::Config(
                "Allowed extensions must not be empty strings".to_string(),
            ));
        }

        if self.storage.database_url.trim().is_empty() {
            return Err(AppError::Config(
                "Database URL is required (set BEAMIE_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.library.tag_workers == 0 {
            return Err(AppError::Config(
                "library.tag_workers must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Tracing filter directives for the beamie crates
    pub fn log_filter(&self) -> String {
        let level = &self.logging.level;
        format!(
            "beamie={level},beamie_scanner={level},beamie_storage={level},beamie_metadata={level}"
        )
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("BEAMIE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("library.media_paths")
        .with_list_parse_key("library.allowed_extensions")
}

// Default values
fn default_library() -> LibrarySettings {
    LibrarySettings {
        media_paths: Vec::new(),
        allowed_extensions: default_allowed_extensions(),
        tag_workers: default_tag_workers(),
    }
}

fn default_allowed_extensions() -> Vec<String> {
    vec![".mp3".to_string()]
}

fn default_tag_workers() -> usize {
    num_cpus::get()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/beamie.db".to_string()
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        level: default_level(),
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for BeamieConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            storage: default_storage(),
            logging: default_logging(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = BeamieConfig::default();
        assert!(config.library.media_paths.is_empty());
        assert_eq!(config.library.allowed_extensions, vec![".mp3"]);
        assert!(config.library.tag_workers >= 1);
        assert_eq!(config.storage.database_url, "sqlite://./data/beamie.db");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("beamie.toml");
        fs::write(
            &path,
            r#"
[library]
media_paths = ["/music", "/more-music"]
allowed_extensions = [".mp3", ".flac"]
tag_workers = 3

[storage]
database_url = "sqlite:///tmp/catalog.db"
"#,
        )
        .unwrap();

        let config = BeamieConfig::load_with_env(Some(&path), env(&[])).unwrap();
        assert_eq!(
            config.library.media_paths,
            vec![PathBuf::from("/music"), PathBuf::from("/more-music")]
        );
        assert_eq!(config.library.allowed_extensions, vec![".mp3", ".flac"]);
        assert_eq!(config.library.tag_workers, 3);
        assert_eq!(config.storage.database_url, "sqlite:///tmp/catalog.db");
        // Untouched sections keep their defaults
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_environment_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("beamie.toml");
        fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let config = BeamieConfig::load_with_env(
            Some(&path),
            env(&[
                ("BEAMIE_LOGGING__LEVEL", "debug"),
                ("BEAMIE_LIBRARY__MEDIA_PATHS", "/a,/b"),
                ("BEAMIE_LIBRARY__TAG_WORKERS", "4"),
            ]),
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.library.media_paths,
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
        assert_eq!(config.library.tag_workers, 4);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = BeamieConfig::load_with_env(Some(&temp.path().join("nope.toml")), env(&[]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = BeamieConfig::default();
        config.library.allowed_extensions.clear();
        assert!(config.validate().is_err());

        let mut config = BeamieConfig::default();
        config.library.allowed_extensions = vec![String::new()];
        assert!(config.validate().is_err());

        let mut config = BeamieConfig::default();
        config.storage.database_url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = BeamieConfig::default();
        config.library.tag_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_filter_covers_all_crates() {
        let mut config = BeamieConfig::default();
        config.logging.level = "debug".to_string();
        let filter = config.log_filter();
        assert!(filter.contains("beamie=debug"));
        assert!(filter.contains("beamie_scanner=debug"));
        assert!(filter.contains("beamie_storage=debug"));
    }
}
