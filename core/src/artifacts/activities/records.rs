use super::{
    error::ActivitiesError,
    schema::{table_schema, DecodeRule},
};
use crate::utils::{
    encoding::{base64_encode_standard, bytes_to_hex},
    time::unixepoch_to_datetime,
};
use log::error;
use rusqlite::types::Value as SqlValue;
use serde_json::{Map, Number, Value};

/// One raw row as returned by the query engine: column order preserved, values loosely typed
pub(crate) type RawRow = Vec<(String, SqlValue)>;

/// Decode a raw row through the table's declared schema. The decoded record holds
/// exactly the declared fields in declared order, absent input decodes to null.
/// Undeclared tables pass every column through verbatim in query order
pub(crate) fn decode_row(
    table: &str,
    row: &RawRow,
) -> Result<Map<String, Value>, ActivitiesError> {
    let schema_option = table_schema(table);
    let schema = match schema_option {
        Some(result) => result,
        None => return decode_generic(row),
    };

    let mut record = Map::new();
    for (key, rule) in schema.fields {
        // The rowid pseudo-column is surfaced under a provenance style key
        let column = if *key == "_rowid" { "rowid" } else { *key };
        let raw_option = row
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value);

        let raw = match raw_option {
            Some(result) => result,
            None => {
                error!(
                    "[activities] Table {} row is missing expected column {column}",
                    schema.table
                );
                return Err(ActivitiesError::SchemaMismatch);
            }
        };
        record.insert((*key).to_string(), decode_value(raw, rule)?);
    }

    Ok(record)
}

/// Pass every raw column through verbatim, in query order
fn decode_generic(row: &RawRow) -> Result<Map<String, Value>, ActivitiesError> {
    let mut record = Map::new();
    for (name, value) in row {
        record.insert(name.to_string(), verbatim_value(value));
    }
    Ok(record)
}

fn decode_value(value: &SqlValue, rule: &DecodeRule) -> Result<Value, ActivitiesError> {
    match rule {
        DecodeRule::Verbatim => Ok(verbatim_value(value)),
        DecodeRule::Hex => hex_value(value),
        DecodeRule::Json => json_value(value),
        DecodeRule::Timestamp => timestamp_value(value),
    }
}

fn verbatim_value(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(result) => Value::Number(Number::from(*result)),
        SqlValue::Real(result) => match Number::from_f64(*result) {
            Some(number) => Value::Number(number),
            None => Value::Null,
        },
        SqlValue::Text(result) => Value::String(result.to_string()),
        SqlValue::Blob(result) => Value::String(base64_encode_standard(result)),
    }
}

fn hex_value(value: &SqlValue) -> Result<Value, ActivitiesError> {
    match value {
        SqlValue::Null => Ok(Value::Null),
        SqlValue::Blob(result) => Ok(Value::String(bytes_to_hex(result))),
        SqlValue::Text(result) => Ok(Value::String(bytes_to_hex(result.as_bytes()))),
        _ => {
            error!("[activities] Expected a binary identifier, got: {value:?}");
            Err(ActivitiesError::SchemaMismatch)
        }
    }
}

fn json_value(value: &SqlValue) -> Result<Value, ActivitiesError> {
    let parsed = match value {
        SqlValue::Null => return Ok(Value::Null),
        SqlValue::Text(result) => serde_json::from_str(result),
        SqlValue::Blob(result) => serde_json::from_slice(result),
        _ => {
            error!("[activities] Expected a nested JSON payload, got: {value:?}");
            return Err(ActivitiesError::MalformedPayload);
        }
    };

    match parsed {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[activities] Failed to parse nested JSON payload: {err:?}");
            Err(ActivitiesError::MalformedPayload)
        }
    }
}

fn timestamp_value(value: &SqlValue) -> Result<Value, ActivitiesError> {
    match value {
        SqlValue::Null => Ok(Value::Null),
        // Zero means the timestamp was never set, keep it distinct from the epoch instant
        SqlValue::Integer(0) => Ok(Value::Number(Number::from(0))),
        SqlValue::Integer(result) => match unixepoch_to_datetime(result) {
            Ok(datetime) => Ok(Value::String(datetime)),
            Err(err) => {
                error!("[activities] Failed to decode timestamp {result}: {err:?}");
                Err(ActivitiesError::TimestampOutOfRange)
            }
        },
        _ => {
            error!("[activities] Expected an epoch timestamp, got: {value:?}");
            Err(ActivitiesError::SchemaMismatch)
        }
    }
}
