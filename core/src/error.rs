use std::fmt;

#[derive(Debug)]
pub enum TimelineError {
    NotFile,
    Database,
    Volume,
}

impl std::error::Error for TimelineError {}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineError::NotFile => write!(f, "Source is not a database file"),
            TimelineError::Database => write!(f, "Failed to parse activities database"),
            TimelineError::Volume => write!(f, "Failed to process volume"),
        }
    }
}
