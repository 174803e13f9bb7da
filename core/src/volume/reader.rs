use super::error::VolumeError;
use crate::core::is_logical_volume;
use crate::filesystem::directory::{list_directory_entries, DirectoryEntry};
use crate::filesystem::error::FileSystemError;
use crate::filesystem::files::{is_file, read_file};
use log::error;

/// Read a file out of a volume source. Volume paths are relative to the volume
/// root and use forward slashes. A mounted source is plain file access, a
/// logical volume (ex: \\.\C:) goes through the raw NTFS reader
pub(crate) fn read_volume_file(source: &str, volume_path: &str) -> Result<Vec<u8>, VolumeError> {
    if is_logical_volume(source) {
        return read_raw_file(source, volume_path);
    }

    let path = format!("{source}/{volume_path}");
    if !is_file(&path) {
        return Err(VolumeError::NotFound);
    }
    match read_file(&path) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[volume] Failed to read {path}: {err:?}");
            Err(VolumeError::ReadFile)
        }
    }
}

/// List the entries of a directory on a volume source
pub(crate) fn list_volume_directory(
    source: &str,
    volume_path: &str,
) -> Result<Vec<DirectoryEntry>, VolumeError> {
    if is_logical_volume(source) {
        return list_raw_directory(source, volume_path);
    }

    let path = format!("{source}/{volume_path}");
    let entries_result = list_directory_entries(&path);
    match entries_result {
        Ok(result) => Ok(result),
        Err(FileSystemError::NotDirectory) => Err(VolumeError::NotFound),
        Err(err) => {
            error!("[volume] Failed to list {path}: {err:?}");
            Err(VolumeError::ReadDirectory)
        }
    }
}

#[cfg(target_os = "windows")]
fn read_raw_file(source: &str, volume_path: &str) -> Result<Vec<u8>, VolumeError> {
    use crate::filesystem::ntfs::reader::raw_read_file;

    let drive = match drive_letter(source) {
        Some(result) => result,
        None => return Err(VolumeError::UnsupportedSource),
    };
    match raw_read_file(&drive, &path_components(volume_path)) {
        Ok(result) => Ok(result),
        Err(FileSystemError::NotFound) => Err(VolumeError::NotFound),
        Err(err) => {
            error!("[volume] Failed raw read of {volume_path}: {err:?}");
            Err(VolumeError::ReadFile)
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn read_raw_file(_source: &str, volume_path: &str) -> Result<Vec<u8>, VolumeError> {
    error!("[volume] Cannot read {volume_path}: logical volume sources require Windows");
    Err(VolumeError::UnsupportedSource)
}

#[cfg(target_os = "windows")]
fn list_raw_directory(
    source: &str,
    volume_path: &str,
) -> Result<Vec<DirectoryEntry>, VolumeError> {
    use crate::filesystem::ntfs::reader::raw_list_directory;

    let drive = match drive_letter(source) {
        Some(result) => result,
        None => return Err(VolumeError::UnsupportedSource),
    };
    match raw_list_directory(&drive, &path_components(volume_path)) {
        Ok(result) => Ok(result),
        Err(FileSystemError::NotFound) => Err(VolumeError::NotFound),
        Err(err) => {
            error!("[volume] Failed raw listing of {volume_path}: {err:?}");
            Err(VolumeError::ReadDirectory)
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn list_raw_directory(
    _source: &str,
    volume_path: &str,
) -> Result<Vec<DirectoryEntry>, VolumeError> {
    error!("[volume] Cannot list {volume_path}: logical volume sources require Windows");
    Err(VolumeError::UnsupportedSource)
}

/// Get the drive letter out of a logical volume source (ex: C from \\.\C:)
#[cfg(target_os = "windows")]
fn drive_letter(source: &str) -> Option<char> {
    source.chars().nth(4)
}

#[cfg(target_os = "windows")]
fn path_components(volume_path: &str) -> Vec<String> {
    volume_path
        .split('/')
        .filter(|component| !component.is_empty())
        .map(|component| component.to_string())
        .collect()
}
