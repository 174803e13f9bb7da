use super::error::FileSystemError;
use log::error;
use std::{fs::read_dir, path::Path};

pub(crate) struct DirectoryEntry {
    pub(crate) name: String,
    pub(crate) is_directory: bool,
}

/// Check if path is a directory
pub(crate) fn is_directory(path: &str) -> bool {
    let dir = Path::new(path);
    if dir.is_dir() {
        return true;
    }
    false
}

/// Get the name and type of every entry directly under a provided directory
pub(crate) fn list_directory_entries(path: &str) -> Result<Vec<DirectoryEntry>, FileSystemError> {
    if !is_directory(path) {
        return Err(FileSystemError::NotDirectory);
    }
    let dir_result = read_dir(path);
    let dir = match dir_result {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Failed to get directory contents: {err:?}");
            return Err(FileSystemError::ReadDirectory);
        }
    };

    let mut entries: Vec<DirectoryEntry> = Vec::new();
    for entry_result in dir {
        let entry = match entry_result {
            Ok(result) => result,
            Err(err) => {
                error!("[filesystem] Failed to get directory entry: {err:?}");
                continue;
            }
        };

        let is_dir = match entry.file_type() {
            Ok(result) => result.is_dir(),
            Err(err) => {
                error!("[filesystem] Failed to get directory entry type: {err:?}");
                continue;
            }
        };

        entries.push(DirectoryEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            is_directory: is_dir,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::{is_directory, list_directory_entries};
    use std::path::PathBuf;

    #[test]
    fn test_is_directory() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("src");
        let result = is_directory(&test_location.display().to_string());
        assert_eq!(result, true);
    }

    #[test]
    fn test_list_directory_entries() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("src");
        let result = list_directory_entries(&test_location.display().to_string()).unwrap();

        let mut found_lib = false;
        for entry in result {
            if entry.name == "lib.rs" {
                found_lib = true;
                assert_eq!(entry.is_directory, false);
            }
        }
        assert_eq!(found_lib, true);
    }

    #[test]
    fn test_list_directory_entries_not_directory() {
        let result = list_directory_entries("not-a-real-directory");
        assert!(result.is_err());
    }
}
