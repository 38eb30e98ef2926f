//! Definition file discovery.
//!
//! Finds every definition file below a project root, either with the
//! defaults or with the settings of a `def2fgd.yaml` manifest in the root.
//!
//! # Example
//!
//! ```ignore
//! use def2fgd::discovery::discover;
//!
//! let result = discover("games")?;
//! println!("Found {} definition files", result.files.len());
//! ```

mod manifest;
mod scanner;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FgdError, Result};

pub use manifest::Manifest;
pub use scanner::scan_directory;

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "def2fgd.yaml";

/// Result of discovering definition files.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no def2fgd.yaml found).
    pub manifest: Manifest,

    /// Whether a def2fgd.yaml manifest was found.
    pub has_manifest: bool,

    /// Definition files, sorted by path.
    pub files: Vec<PathBuf>,
}

/// Load the manifest from `root`, falling back to defaults.
pub fn load_manifest(root: &Path) -> Result<(Manifest, bool)> {
    let manifest_path = root.join(MANIFEST_FILENAME);
    if manifest_path.is_file() {
        Ok((Manifest::load(&manifest_path)?, true))
    } else {
        Ok((Manifest::default(), false))
    }
}

/// Discover definition files under a project root.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let (manifest, has_manifest) = load_manifest(&root)?;
    Ok(discover_with(root, manifest, has_manifest))
}

/// Discover definition files with an already resolved manifest.
pub fn discover_with(root: PathBuf, manifest: Manifest, has_manifest: bool) -> DiscoveryResult {
    let files = scan_directory(&root, &manifest);
    DiscoveryResult {
        root,
        manifest,
        has_manifest,
        files,
    }
}

/// Read a definition file, replacing invalid UTF-8 sequences.
pub fn read_definition(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| FgdError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Expand explicit paths: files are taken as given, directories are scanned.
pub fn discover_paths(paths: &[PathBuf], manifest: &Manifest) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(scan_directory(path, manifest));
        } else {
            files.push(path.clone());
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_without_manifest() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("base/scripts")).unwrap();
        fs::write(dir.path().join("base/scripts/entities.def"), "").unwrap();

        let result = discover(dir.path()).unwrap();

        assert!(!result.has_manifest);
        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn test_discover_with_manifest() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILENAME),
            "pattern: \"*.def\"\nbrush_marker: none\n",
        )
        .unwrap();
        fs::write(dir.path().join("items.def"), "").unwrap();
        fs::write(dir.path().join("monsters.def"), "").unwrap();

        let result = discover(dir.path()).unwrap();

        assert!(result.has_manifest);
        assert_eq!(result.manifest.brush_marker, crate::parser::BrushMarker::None);
        assert_eq!(result.files.len(), 2);
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempdir().unwrap();

        let result = discover(dir.path()).unwrap();

        assert!(result.files.is_empty());
    }

    #[test]
    fn test_read_definition_is_lossy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entities.def");
        fs::write(&path, b"/*QUAKED a (1 1 1)\ncaf\xe9\n*/").unwrap();

        let text = read_definition(&path).unwrap();

        assert!(text.starts_with("/*QUAKED a (1 1 1)\ncaf\u{FFFD}"));
    }

    #[test]
    fn test_read_definition_missing_file() {
        let err = read_definition(Path::new("/nonexistent/entities.def")).unwrap_err();

        assert!(matches!(err, FgdError::Io { .. }));
    }

    #[test]
    fn test_discover_paths_mixes_files_and_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("mod/scripts")).unwrap();
        fs::write(dir.path().join("mod/scripts/entities.def"), "").unwrap();
        let single = dir.path().join("extra.def");
        fs::write(&single, "").unwrap();

        let files = discover_paths(
            &[single.clone(), dir.path().join("mod")],
            &Manifest::default(),
        );

        assert_eq!(files, vec![single, dir.path().join("mod/scripts/entities.def")]);
    }
}
