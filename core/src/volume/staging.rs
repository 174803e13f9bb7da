use super::{error::VolumeError, reader::read_volume_file};
use log::{error, info, warn};
use std::env::temp_dir;
use std::fs::{create_dir_all, remove_dir_all, write};
use std::path::Path;
use uuid::Uuid;

/// Staged copies of the activity artifacts for one (user, identity) pair.
/// Each pair owns its own directory so extractions never interfere
pub(crate) struct ExtractionSet {
    pub(crate) directory: String,
    pub(crate) files: Vec<String>,
}

impl ExtractionSet {
    /// Create the staging directory for one (user, identity) pair
    pub(crate) fn new(
        base: &str,
        username: &str,
        identity: &str,
    ) -> Result<ExtractionSet, VolumeError> {
        let directory = format!("{base}/{username}-{identity}");
        let status = create_dir_all(&directory);
        match status {
            Ok(_) => {}
            Err(err) => {
                error!("[volume] Failed to create staging directory {directory}: {err:?}");
                return Err(VolumeError::CreateDirectory);
            }
        }
        info!("[volume] Staging location for {username} ({identity}): {directory}");

        Ok(ExtractionSet {
            directory,
            files: Vec::new(),
        })
    }

    /// Stage one candidate file out of the volume. Absent or empty candidates are
    /// skipped, the WAL and SHM sidecars frequently do not exist
    pub(crate) fn stage(&mut self, source: &str, volume_path: &str) {
        let data_result = read_volume_file(source, volume_path);
        let data = match data_result {
            Ok(result) => result,
            Err(err) => {
                warn!("[volume] Could not extract {volume_path}: {err:?}");
                return;
            }
        };
        if data.is_empty() {
            info!("[volume] Skipping zero size file {volume_path}");
            return;
        }

        // Staged copies keep the base name of the volume path
        let name_option = Path::new(volume_path).file_name();
        let file_name = match name_option {
            Some(result) => result.to_string_lossy(),
            None => {
                warn!("[volume] Could not get a filename from {volume_path}");
                return;
            }
        };

        let target = format!("{}/{file_name}", self.directory);
        info!("[volume] Extracting {volume_path} to {target}");
        let status = write(&target, &data);
        match status {
            Ok(_) => self.files.push(target),
            Err(err) => warn!("[volume] Failed to write staged file {target}: {err:?}"),
        }
    }

    /// Get the staged activities database if extraction produced one
    pub(crate) fn locate_database(&self) -> Option<String> {
        self.files
            .iter()
            .find(|staged| staged.ends_with("ActivitiesCache.db"))
            .cloned()
    }
}

/// Owns the staging root for a whole volume run
pub(crate) struct StagingManager {
    pub(crate) root: String,
    cleanup: bool,
}

impl StagingManager {
    pub(crate) fn new(temp_location: &Option<String>, cleanup: bool) -> StagingManager {
        let root = match temp_location {
            Some(result) => result.to_string(),
            None => format!(
                "{}/winactivities-{}",
                temp_dir().display(),
                Uuid::new_v4().hyphenated()
            ),
        };
        StagingManager { root, cleanup }
    }

    pub(crate) fn extraction_set(
        &self,
        username: &str,
        identity: &str,
    ) -> Result<ExtractionSet, VolumeError> {
        ExtractionSet::new(&self.root, username, identity)
    }

    /// Remove every staged extraction when the cleanup policy is enabled,
    /// otherwise the staged files are retained for inspection
    pub(crate) fn finish(&self) {
        if !self.cleanup {
            info!("[volume] Staged extractions retained at {}", self.root);
            return;
        }
        let status = remove_dir_all(&self.root);
        match status {
            Ok(_) => {}
            Err(err) => warn!(
                "[volume] Failed to remove staging root {}: {err:?}",
                self.root
            ),
        }
    }
}
