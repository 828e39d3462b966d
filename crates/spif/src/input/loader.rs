//! Loads a JSON or YAML definition file into a dataset document.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpifError};
use crate::schema::Dataset;

/// On-disk format of a definition file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionFormat {
    Json,
    Yaml,
}

/// Metadata about a loaded definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionSource {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    pub format: DefinitionFormat,
    /// When the definition was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl DefinitionSource {
    fn new(path: &Path, format: DefinitionFormat) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path: path.to_path_buf(),
            format,
            loaded_at: Utc::now(),
        }
    }
}

/// Load a definition file from an already-resolved path.
///
/// A missing file is reported as [`SpifError::NotFound`]; a document that
/// does not match the entity shape as [`SpifError::Structural`].
pub fn load_definition(path: impl AsRef<Path>) -> Result<(Dataset, DefinitionSource)> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SpifError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let format = match extension.as_str() {
        "json" => DefinitionFormat::Json,
        "yaml" | "yml" => DefinitionFormat::Yaml,
        other => return Err(SpifError::UnsupportedFormat(other.to_string())),
    };

    let contents = fs::read_to_string(path).map_err(|e| SpifError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let structural = |message: String| SpifError::Structural {
        path: path.to_path_buf(),
        message,
    };

    let dataset = match format {
        DefinitionFormat::Json => {
            serde_json::from_str(&contents).map_err(|e| structural(e.to_string()))?
        }
        DefinitionFormat::Yaml => {
            serde_yaml::from_str(&contents).map_err(|e| structural(e.to_string()))?
        }
    };

    Ok((dataset, DefinitionSource::new(path, format)))
}
