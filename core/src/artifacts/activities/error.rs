use std::fmt;

#[derive(Debug)]
pub(crate) enum ActivitiesError {
    Connection,
    BadSql,
    SequenceNotFound,
    SchemaMismatch,
    TimestampOutOfRange,
    MalformedPayload,
}

impl std::error::Error for ActivitiesError {}

impl fmt::Display for ActivitiesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivitiesError::Connection => write!(f, "Could not open activities database"),
            ActivitiesError::BadSql => write!(f, "Could not compose or run activities query"),
            ActivitiesError::SequenceNotFound => write!(f, "No activity sequence marker"),
            ActivitiesError::SchemaMismatch => {
                write!(f, "Row is missing a column the table schema requires")
            }
            ActivitiesError::TimestampOutOfRange => {
                write!(f, "Timestamp outside the representable date range")
            }
            ActivitiesError::MalformedPayload => write!(f, "Could not parse nested JSON payload"),
        }
    }
}
