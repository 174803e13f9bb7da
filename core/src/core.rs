use crate::error::TimelineError;
use crate::filesystem::files::is_file;
use crate::structs::options::ActivitiesOptions;
use crate::volume::processor::{process_database, process_volume};
use log::error;
use regex::Regex;

/// Check if the source is a logical volume (ex: \\.\C:) instead of a database path
pub fn is_logical_volume(source: &str) -> bool {
    let pattern_result = Regex::new(r"^\\\\\.\\[a-zA-Z]:$");
    match pattern_result {
        Ok(pattern) => pattern.is_match(source),
        Err(_err) => false,
    }
}

/// Parse a single ActivitiesCache database at the provided path
pub fn parse_database(path: &str, options: &ActivitiesOptions) -> Result<(), TimelineError> {
    if !is_file(path) {
        error!("[activities] No database file at {path}");
        return Err(TimelineError::NotFile);
    }

    let status = process_database(path, None, options);
    match status {
        Ok(_) => Ok(()),
        Err(err) => {
            error!("[activities] Failed to parse database {path}: {err:?}");
            Err(TimelineError::Database)
        }
    }
}

/// Walk a volume and parse the ActivitiesCache database of every discovered
/// (user, identity) pair
pub fn parse_volume(source: &str, options: &ActivitiesOptions) -> Result<(), TimelineError> {
    let status = process_volume(source, options);
    match status {
        Ok(_) => Ok(()),
        Err(err) => {
            error!("[volume] Failed to process volume {source}: {err:?}");
            Err(TimelineError::Volume)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_logical_volume, parse_database};
    use crate::structs::options::ActivitiesOptions;

    #[test]
    fn test_is_logical_volume() {
        assert_eq!(is_logical_volume("\\\\.\\C:"), true);
        assert_eq!(is_logical_volume("\\\\.\\d:"), true);
        assert_eq!(is_logical_volume("C:\\ActivitiesCache.db"), false);
        assert_eq!(is_logical_volume("/tmp/ActivitiesCache.db"), false);
        assert_eq!(is_logical_volume("\\\\.\\C:\\Users"), false);
    }

    #[test]
    fn test_parse_database_missing() {
        let options = ActivitiesOptions {
            sequence: 0,
            dump_db: false,
            template: None,
            temp_dir: None,
            cleanup: false,
        };
        let result = parse_database("not-a-real-database.db", &options);
        assert!(result.is_err());
    }
}
