//! Recursive filesystem walk over the media roots

use std::collections::{BTreeSet, HashSet};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Walker collecting every regular file under a set of roots
///
/// Symbolic links are followed. Each directory is entered at most once per
/// walk, keyed on its canonical path, so symlink loops and overlapping roots
/// terminate. Entries that cannot be read are logged and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileWalker {
    /// Maximum depth to traverse (unlimited when unset)
    max_depth: Option<usize>,
}

impl FileWalker {
    /// Create a new file walker
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum directory depth to traverse
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Walk every root and return the union of the files found
    pub fn walk(&self, roots: &[PathBuf]) -> BTreeSet<PathBuf> {
        let mut files = BTreeSet::new();
        let mut visited = HashSet::new();

        for root in roots {
            match absolutize(root) {
                Ok(root) => self.walk_root(&root, &mut visited, &mut files),
                Err(e) => tracing::warn!("Failed to resolve root {}: {}", root.display(), e),
            }
        }

        files
    }

    fn walk_root(
        &self,
        root: &Path,
        visited: &mut HashSet<PathBuf>,
        files: &mut BTreeSet<PathBuf>,
    ) {
        let mut walker = WalkDir::new(root).follow_links(true);

        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let entries = walker.into_iter().filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }

            match entry.path().canonicalize() {
                // Already entered through another path
                Ok(canonical) => visited.insert(canonical),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", entry.path().display(), e);
                    false
                }
            }
        });

        for entry in entries {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    files.insert(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root.display().to_string());
                    tracing::warn!("Skipping {}: {}", path, e);
                }
            }
        }
    }
}

/// Make a root absolute and lexically normal
///
/// `.` components and repeated separators are dropped and `..` removes the
/// preceding component, so equivalent spellings of one root yield the same
/// file paths. Symlinks in the root itself are kept as written.
fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normal = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // At the root `..` stays at the root
            Component::ParentDir => {
                normal.pop();
            }
            other => normal.push(other),
        }
    }

    Ok(normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_walk_nested_directories() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("song1.mp3"), b"fake mp3").unwrap();
        fs::write(base.join("cover.jpg"), b"not audio").unwrap();

        let deep = base.join("a").join("b").join("c");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("song2.mp3"), b"fake mp3").unwrap();

        let files = FileWalker::new().walk(&[base.to_path_buf()]);

        // No extension filtering at this level
        assert_eq!(files.len(), 3);
        assert!(files.contains(&base.join("song1.mp3")));
        assert!(files.contains(&base.join("cover.jpg")));
        assert!(files.contains(&deep.join("song2.mp3")));
    }

    #[test]
    fn test_walk_with_max_depth() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("song1.mp3"), b"fake mp3").unwrap();

        let subdir = base.join("subdir");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("song2.mp3"), b"fake mp3").unwrap();

        let files = FileWalker::new().max_depth(1).walk(&[base.to_path_buf()]);

        assert_eq!(files.len(), 1);
        assert!(files.contains(&base.join("song1.mp3")));
    }

    #[test]
    fn test_duplicate_and_overlapping_roots() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        let subdir = base.join("subdir");
        fs::create_dir(&subdir).unwrap();
        fs::write(base.join("top.mp3"), b"x").unwrap();
        fs::write(subdir.join("inner.mp3"), b"x").unwrap();

        let files = FileWalker::new().walk(&[
            base.to_path_buf(),
            base.to_path_buf(),
            subdir.clone(),
        ]);

        assert_eq!(
            files.into_iter().collect::<Vec<_>>(),
            vec![base.join("subdir").join("inner.mp3"), base.join("top.mp3")]
        );
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        fs::write(base.join("song.mp3"), b"x").unwrap();

        let files = FileWalker::new().walk(&[base.join("does-not-exist"), base.to_path_buf()]);

        assert_eq!(files.len(), 1);
        assert!(files.contains(&base.join("song.mp3")));
    }

    #[test]
    fn test_absolutize_normalizes_spelling() {
        let base = Path::new("/srv/music");

        assert_eq!(absolutize(Path::new("/srv//music")).unwrap(), base);
        assert_eq!(absolutize(Path::new("/srv/music/.")).unwrap(), base);
        assert_eq!(absolutize(Path::new("/srv/./music/")).unwrap(), base);
        assert_eq!(absolutize(Path::new("/srv/other/../music")).unwrap(), base);
        assert_eq!(absolutize(Path::new("/../srv/music")).unwrap(), base);
    }

    #[test]
    fn test_relative_root_becomes_absolute() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolutize(Path::new("./music")).unwrap(), cwd.join("music"));
    }

    #[test]
    fn test_equivalent_roots_yield_same_paths() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        fs::write(base.join("song.mp3"), b"x").unwrap();

        let plain = FileWalker::new().walk(&[base.to_path_buf()]);
        let dotted = FileWalker::new().walk(&[base.join(".")]);

        assert_eq!(plain, dotted);
        assert!(plain.contains(&base.join("song.mp3")));
    }

    #[test]
    fn test_empty_roots() {
        assert!(FileWalker::new().walk(&[]).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_terminates() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let base = temp.path();

        let album = base.join("album");
        fs::create_dir(&album).unwrap();
        fs::write(album.join("track.mp3"), b"x").unwrap();
        symlink(base, album.join("loop")).unwrap();

        let files = FileWalker::new().walk(&[base.to_path_buf()]);

        assert_eq!(files.len(), 1);
        assert!(files.contains(&album.join("track.mp3")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("open.mp3"), b"x").unwrap();
        let sibling = base.join("sibling");
        fs::create_dir(&sibling).unwrap();
        fs::write(sibling.join("also-open.mp3"), b"x").unwrap();

        let locked = base.join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.mp3"), b"x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root
        let enforced = fs::read_dir(&locked).is_err();
        let files = FileWalker::new().walk(&[base.to_path_buf()]);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(files.contains(&base.join("open.mp3")));
        assert!(files.contains(&sibling.join("also-open.mp3")));
        if enforced {
            assert_eq!(files.len(), 2);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_skipped() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("real.mp3"), b"x").unwrap();
        symlink(base.join("nowhere.mp3"), base.join("dangling.mp3")).unwrap();

        let files = FileWalker::new().walk(&[base.to_path_buf()]);

        assert_eq!(files.len(), 1);
        assert!(files.contains(&base.join("real.mp3")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_followed() {
        use std::os::unix::fs::symlink;

        let library = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        fs::write(elsewhere.path().join("linked.mp3"), b"x").unwrap();
        symlink(elsewhere.path(), library.path().join("external")).unwrap();

        let files = FileWalker::new().walk(&[library.path().to_path_buf()]);

        assert!(files.contains(&library.path().join("external").join("linked.mp3")));
    }
}
