use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use error_location::ErrorLocation;
use tapedeck_core::{ArtifactSink, CoreError, CoreResult, capture::RecordingArtifact};
use tracing::{info, instrument};

/// [`ArtifactSink`] writing each recording to its own timestamped file.
pub(crate) struct FileSaver {
    directory: PathBuf,
    prefix: String,
}

impl FileSaver {
    pub(crate) fn new(directory: PathBuf, prefix: impl Into<String>) -> Self {
        Self {
            directory,
            prefix: prefix.into(),
        }
    }

    /// First free path for an artifact saved at `stamp`.
    ///
    /// Saves within the same second get `-1`, `-2`, ... appended.
    fn target_path(&self, stamp: DateTime<Local>, suffix: &str) -> PathBuf {
        let base = file_stem(&self.prefix, stamp);
        let mut path = self.directory.join(format!("{}.{}", base, suffix));
        let mut n = 1;
        while path.exists() {
            path = self.directory.join(format!("{}-{}.{}", base, n, suffix));
            n += 1;
        }
        path
    }
}

impl ArtifactSink for FileSaver {
    #[track_caller]
    #[instrument(skip(self, artifact), fields(bytes = artifact.len(), suffix = artifact.suffix()))]
    fn save(&mut self, artifact: &RecordingArtifact) -> CoreResult<String> {
        fs::create_dir_all(&self.directory).map_err(|e| CoreError::SaveFailed {
            reason: format!("Failed to create {}: {}", self.directory.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let path = self.target_path(Local::now(), artifact.suffix());
        write_atomic(&path, artifact.bytes())?;

        info!(path = %path.display(), "Recording saved");
        Ok(path.display().to_string())
    }
}

/// `<prefix>-<YYYYmmdd-HHMMSS>`
pub(crate) fn file_stem(prefix: &str, stamp: DateTime<Local>) -> String {
    format!("{}-{}", prefix, stamp.format("%Y%m%d-%H%M%S"))
}

/// Writes to a hidden temporary sibling, syncs, then renames into place.
#[track_caller]
fn write_atomic(path: &Path, bytes: &[u8]) -> CoreResult<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    let write = || -> std::io::Result<()> {
        let mut temp_file = fs::File::create(&temp_path)?;
        temp_file.write_all(bytes)?;
        temp_file.sync_all()?;
        fs::rename(&temp_path, path)
    };

    write().map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CoreError::SaveFailed {
            reason: format!("Failed to write {}: {}", path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        }
    })
}
