use std::fmt;

#[derive(Debug)]
pub(crate) enum VolumeError {
    NotFound,
    ReadFile,
    ReadDirectory,
    UnsupportedSource,
    BadSettings,
    CreateDirectory,
}

impl std::error::Error for VolumeError {}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeError::NotFound => write!(f, "No entry at volume path"),
            VolumeError::ReadFile => write!(f, "Could not read file from volume"),
            VolumeError::ReadDirectory => write!(f, "Could not list volume directory"),
            VolumeError::UnsupportedSource => {
                write!(f, "Logical volume sources require Windows")
            }
            VolumeError::BadSettings => write!(f, "Could not parse CDP global settings"),
            VolumeError::CreateDirectory => write!(f, "Could not create staging directory"),
        }
    }
}
