use std::fmt;

#[derive(Debug)]
pub(crate) enum UtilsError {
    OutOfRangeTimestamp,
}

impl std::error::Error for UtilsError {}

impl fmt::Display for UtilsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilsError::OutOfRangeTimestamp => {
                write!(f, "Timestamp outside the representable date range")
            }
        }
    }
}
