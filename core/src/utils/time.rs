use super::error::UtilsError;
use chrono::DateTime;

/// Convert `UnixEpoch` seconds to a naive UTC datetime string (ex: 2019-11-27 01:54:06)
pub(crate) fn unixepoch_to_datetime(timestamp: &i64) -> Result<String, UtilsError> {
    let datetime_opt = DateTime::from_timestamp(*timestamp, 0);
    match datetime_opt {
        Some(result) => Ok(result.format("%Y-%m-%d %H:%M:%S").to_string()),
        None => Err(UtilsError::OutOfRangeTimestamp),
    }
}
