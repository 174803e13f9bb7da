/// Decode rule applied to a single output field
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DecodeRule {
    /// Keep the raw value. Binary values are base64 encoded
    Verbatim,
    /// Render a binary identifier as a lowercase hex string
    Hex,
    /// Parse a nested JSON payload into a structured value
    Json,
    /// Interpret seconds since the UnixEpoch. Zero is an unset sentinel, not a date
    Timestamp,
}

/// Declared output layout for one table. Field order is part of the schema
pub(crate) struct TableSchema {
    pub(crate) table: &'static str,
    pub(crate) fields: &'static [(&'static str, DecodeRule)],
}

/// Tables dumped by the full database dump, in output order
pub(crate) const ACTIVITY_TABLES: [&str; 7] = [
    "Activity",
    "Activity_PackageId",
    "ActivityAssetCache",
    "ActivityOperation",
    "AppSettings",
    "ManualSequence",
    "Metadata",
];

/// Views known to exist in the database. Views have no rowid and are never dumped
pub(crate) const ACTIVITY_VIEWS: [&str; 1] = ["SmartLookup"];

const ACTIVITY_FIELDS: &[(&str, DecodeRule)] = &[
    ("_rowid", DecodeRule::Verbatim),
    ("Id", DecodeRule::Hex),
    ("AppId", DecodeRule::Json),
    ("PackageIdHash", DecodeRule::Verbatim),
    ("AppActivityId", DecodeRule::Verbatim),
    ("ActivityType", DecodeRule::Verbatim),
    ("ActivityStatus", DecodeRule::Verbatim),
    ("ParentActivityId", DecodeRule::Hex),
    ("Tag", DecodeRule::Verbatim),
    ("Group", DecodeRule::Verbatim),
    ("MatchId", DecodeRule::Verbatim),
    ("LastModifiedTime", DecodeRule::Timestamp),
    ("ExpirationTime", DecodeRule::Timestamp),
    ("Payload", DecodeRule::Json),
    ("Priority", DecodeRule::Verbatim),
    ("IsLocalOnly", DecodeRule::Verbatim),
    ("PlatformDeviceId", DecodeRule::Verbatim),
    ("CreatedInCloud", DecodeRule::Verbatim),
    ("StartTime", DecodeRule::Timestamp),
    ("EndTime", DecodeRule::Timestamp),
    ("LastModifiedOnClient", DecodeRule::Timestamp),
    ("GroupAppActivityId", DecodeRule::Verbatim),
    ("ClipboardPayload", DecodeRule::Verbatim),
    ("EnterpriseId", DecodeRule::Verbatim),
    ("OriginalPayload", DecodeRule::Verbatim),
    ("OriginalLastModifiedOnClient", DecodeRule::Timestamp),
    ("ETag", DecodeRule::Verbatim),
];

const ACTIVITY_OPERATION_FIELDS: &[(&str, DecodeRule)] = &[
    ("OperationOrder", DecodeRule::Verbatim),
    ("Id", DecodeRule::Hex),
    ("OperationType", DecodeRule::Verbatim),
    ("AppId", DecodeRule::Json),
    ("PackageIdHash", DecodeRule::Verbatim),
    ("AppActivityId", DecodeRule::Verbatim),
    ("ActivityType", DecodeRule::Verbatim),
    ("ParentActivityId", DecodeRule::Verbatim),
    ("Tag", DecodeRule::Verbatim),
    ("Group", DecodeRule::Verbatim),
    ("MatchId", DecodeRule::Verbatim),
    ("LastModifiedTime", DecodeRule::Timestamp),
    ("ExpirationTime", DecodeRule::Timestamp),
    ("Payload", DecodeRule::Json),
    ("Priority", DecodeRule::Verbatim),
    ("CreatedTime", DecodeRule::Timestamp),
    ("Attachments", DecodeRule::Verbatim),
    ("PlatformDeviceId", DecodeRule::Verbatim),
    ("CreatedInCloud", DecodeRule::Verbatim),
    ("StartTime", DecodeRule::Timestamp),
    ("EndTime", DecodeRule::Timestamp),
    ("LastModifiedOnClient", DecodeRule::Verbatim),
    ("CorrelationVector", DecodeRule::Verbatim),
    ("GroupAppActivityId", DecodeRule::Verbatim),
    ("ClipboardPayload", DecodeRule::Verbatim),
    ("EnterpriseId", DecodeRule::Verbatim),
    ("OriginalPayload", DecodeRule::Verbatim),
    ("OriginalLastModifiedOnClient", DecodeRule::Verbatim),
    ("ETag", DecodeRule::Verbatim),
];

const PACKAGE_ID_FIELDS: &[(&str, DecodeRule)] = &[
    ("_rowid", DecodeRule::Verbatim),
    ("ActivityId", DecodeRule::Hex),
    ("Platform", DecodeRule::Verbatim),
    ("PackageName", DecodeRule::Verbatim),
    ("ExpirationTime", DecodeRule::Verbatim),
];

/// Lookup the declared schema for a table. Rules are strictly per table, a column
/// name may decode differently (or not at all) in another table. Undeclared tables
/// decode generically
pub(crate) fn table_schema(table: &str) -> Option<TableSchema> {
    match table {
        "Activity" => Some(TableSchema {
            table: "Activity",
            fields: ACTIVITY_FIELDS,
        }),
        "ActivityOperation" => Some(TableSchema {
            table: "ActivityOperation",
            fields: ACTIVITY_OPERATION_FIELDS,
        }),
        "Activity_PackageId" => Some(TableSchema {
            table: "Activity_PackageId",
            fields: PACKAGE_ID_FIELDS,
        }),
        _ => None,
    }
}
