use std::fmt;

#[derive(Debug)]
pub(crate) enum FileSystemError {
    ReadDirectory,
    NotDirectory,
    #[cfg(target_os = "windows")]
    OpenFile,
    ReadFile,
    NotFile,
    #[cfg(target_os = "windows")]
    NotFound,
    #[cfg(target_os = "windows")]
    NtfsSectorReader,
    #[cfg(target_os = "windows")]
    NtfsNew,
    #[cfg(target_os = "windows")]
    RootDirectory,
    #[cfg(target_os = "windows")]
    IndexDirectory,
    #[cfg(target_os = "windows")]
    FileData,
    #[cfg(target_os = "windows")]
    NoDataAttributeValue,
}

impl std::error::Error for FileSystemError {}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::ReadDirectory => write!(f, "Could not read directory path"),
            FileSystemError::NotDirectory => write!(f, "Not a directory"),
            #[cfg(target_os = "windows")]
            FileSystemError::OpenFile => write!(f, "Could not open file"),
            FileSystemError::ReadFile => write!(f, "Could not read file"),
            FileSystemError::NotFile => write!(f, "Not a file"),
            #[cfg(target_os = "windows")]
            FileSystemError::NotFound => write!(f, "No filesystem entry at path"),
            #[cfg(target_os = "windows")]
            FileSystemError::NtfsSectorReader => write!(f, "Failed to setup NTFS sector reader"),
            #[cfg(target_os = "windows")]
            FileSystemError::NtfsNew => write!(f, "Failed to start NTFS parser"),
            #[cfg(target_os = "windows")]
            FileSystemError::RootDirectory => write!(f, "Failed to get NTFS root directory"),
            #[cfg(target_os = "windows")]
            FileSystemError::IndexDirectory => write!(f, "Failed to get NTFS index directory info"),
            #[cfg(target_os = "windows")]
            FileSystemError::FileData => write!(f, "Failed to get NTFS file data"),
            #[cfg(target_os = "windows")]
            FileSystemError::NoDataAttributeValue => {
                write!(f, "Failed to get NTFS $DATA attribute")
            }
        }
    }
}
