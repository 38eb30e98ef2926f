//! Project manifest (def2fgd.yaml) parsing.
//!
//! The manifest is optional. It sets which files are converted and how
//! ambiguous header layouts are read; CLI flags override it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FgdError, Result};
use crate::parser::BrushMarker;
use crate::types::ColourScale;

/// Project manifest loaded from def2fgd.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// File name to convert, or a `*suffix` pattern such as `*.def`.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// How headers without a size box treat their first token.
    #[serde(default)]
    pub brush_marker: BrushMarker,

    /// How header colour components are read.
    #[serde(default)]
    pub colour_scale: ColourScale,

    /// Guess FGD key types from key names.
    #[serde(default)]
    pub infer_key_types: bool,

    /// Directory holding game descriptor files to switch from def to fgd.
    #[serde(default)]
    pub games_dir: Option<PathBuf>,

    /// Patterns to exclude from discovery.
    #[serde(default)]
    pub excludes: Vec<String>,
}

fn default_pattern() -> String {
    "entities.def".to_string()
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            brush_marker: BrushMarker::default(),
            colour_scale: ColourScale::default(),
            infer_key_types: false,
            games_dir: None,
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from a def2fgd.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FgdError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| FgdError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check def2fgd.yaml syntax".to_string()),
        })
    }

    /// Whether a file name matches the input pattern.
    pub fn matches_input(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        match self.pattern.strip_prefix('*') {
            Some(suffix) => name.ends_with(suffix),
            None => name == self.pattern,
        }
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");

        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Simple glob pattern matching.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            // **/dir/* matches anything inside dir anywhere in the path
            if let Some(dir) = suffix.strip_suffix("/*") {
                return path.contains(&format!("/{}/", dir)) || path.starts_with(&format!("{}/", dir));
            }
            return path.contains(suffix);
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            if !pattern.contains('/') {
                return path.ends_with(suffix);
            }
        }

        if let Some(prefix) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", prefix))
                || path.contains(&format!("/{}/", prefix));
        }

        path.contains(pattern)
    }
}
