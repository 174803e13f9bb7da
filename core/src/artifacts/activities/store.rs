use super::{
    error::ActivitiesError,
    records::{decode_row, RawRow},
    schema::{ACTIVITY_TABLES, ACTIVITY_VIEWS},
};
use log::{debug, error, warn};
use rusqlite::{types::Value as SqlValue, Connection, OpenFlags, ToSql};
use serde_json::{Map, Value};

/// Read only access to one ActivitiesCache database. Every operation opens a
/// fresh connection, the per user datasets are small enough that correctness
/// wins over connection reuse
pub(crate) struct ActivitiesStore {
    path: String,
}

impl ActivitiesStore {
    pub(crate) fn new(path: &str) -> ActivitiesStore {
        ActivitiesStore {
            path: path.to_string(),
        }
    }

    /// Open a fresh connection, bypassing any SQLITE file lock
    fn connect(&self) -> Result<Connection, ActivitiesError> {
        let activities_file = format!("file:{}?immutable=1", self.path);
        let connection = Connection::open_with_flags(
            activities_file,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
        );
        match connection {
            Ok(connect) => Ok(connect),
            Err(err) => {
                error!(
                    "[activities] Failed to open activities database {}: {err:?}",
                    self.path
                );
                Err(ActivitiesError::Connection)
            }
        }
    }

    /// Dump every known table in declared order. Rows that fail to decode are
    /// logged and skipped, tables missing from the database are logged and skipped
    pub(crate) fn dump_all_tables(
        &self,
    ) -> Result<Vec<(String, Vec<Map<String, Value>>)>, ActivitiesError> {
        let connection = self.connect()?;

        let mut tables: Vec<(String, Vec<Map<String, Value>>)> = Vec::new();
        for table in ACTIVITY_TABLES {
            let query = format!("SELECT rowid, * FROM {table}");
            let records_result = query_table(&connection, table, &query, &[]);
            let records = match records_result {
                Ok(result) => result,
                Err(err) => {
                    warn!("[activities] Could not dump table {table}: {err:?}");
                    continue;
                }
            };
            tables.push((table.to_string(), records));
        }

        for view in ACTIVITY_VIEWS {
            debug!("[activities] View {view} has no rowid and is not part of the dump");
        }

        Ok(tables)
    }

    /// Get the last acknowledged activity watermark from the manual sequence table
    pub(crate) fn get_sequence_marker(&self) -> Result<i64, ActivitiesError> {
        let connection = self.connect()?;
        let query = "SELECT Value FROM ManualSequence WHERE \"Key\" = 'Activity'";

        let marker: Result<i64, rusqlite::Error> =
            connection.query_row(query, [], |row| row.get(0));
        match marker {
            Ok(result) => Ok(result),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(ActivitiesError::SequenceNotFound),
            Err(err) => {
                error!("[activities] Failed to query sequence marker: {err:?}");
                Err(ActivitiesError::BadSql)
            }
        }
    }

    /// Get activity records with a change tag above `min_sequence`, most recently
    /// changed first. Zero returns the whole table
    pub(crate) fn iter_activities(
        &self,
        min_sequence: &i64,
    ) -> Result<Vec<Map<String, Value>>, ActivitiesError> {
        let connection = self.connect()?;
        let query = "SELECT rowid, * FROM Activity WHERE ETag > ?1 ORDER BY ETag DESC";
        query_table(
            &connection,
            "Activity",
            query,
            &[min_sequence as &dyn ToSql],
        )
    }
}

/// Run a query and decode every row through the table's schema
fn query_table(
    connection: &Connection,
    table: &str,
    query: &str,
    params: &[&dyn ToSql],
) -> Result<Vec<Map<String, Value>>, ActivitiesError> {
    let statement = connection.prepare(query);
    let mut stmt = match statement {
        Ok(result) => result,
        Err(err) => {
            error!("[activities] Failed to compose query for {table}: {err:?}");
            return Err(ActivitiesError::BadSql);
        }
    };

    let columns: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let rows_result = stmt.query(params);
    let mut rows = match rows_result {
        Ok(result) => result,
        Err(err) => {
            error!("[activities] Failed to run query for {table}: {err:?}");
            return Err(ActivitiesError::BadSql);
        }
    };

    let mut records: Vec<Map<String, Value>> = Vec::new();
    loop {
        let row = match rows.next() {
            Ok(Some(result)) => result,
            Ok(None) => break,
            Err(err) => {
                error!("[activities] Failed to get next {table} row: {err:?}");
                break;
            }
        };

        let mut raw_row: RawRow = Vec::new();
        for (column_index, column) in columns.iter().enumerate() {
            let value_result = row.get(column_index);
            let value: SqlValue = match value_result {
                Ok(result) => result,
                Err(err) => {
                    error!("[activities] Failed to get {table} value for {column}: {err:?}");
                    SqlValue::Null
                }
            };
            raw_row.push((column.to_string(), value));
        }

        match decode_row(table, &raw_row) {
            Ok(result) => records.push(result),
            Err(err) => warn!("[activities] Skipping {table} row that failed to decode: {err:?}"),
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::ActivitiesStore;
    use rusqlite::Connection;
    use serde_json::Value;
    use std::env::temp_dir;
    use std::fs::create_dir_all;

    fn create_test_db(name: &str) -> String {
        let base = format!("{}/winactivities-tests", temp_dir().display());
        create_dir_all(&base).unwrap();
        let path = format!("{base}/{name}-{}.db", uuid::Uuid::new_v4());

        let connection = Connection::open(&path).unwrap();
        connection
            .execute_batch(
                "CREATE TABLE Activity (
                    Id BLOB,
                    AppId TEXT,
                    PackageIdHash TEXT,
                    AppActivityId TEXT,
                    ActivityType INT,
                    ActivityStatus INT,
                    ParentActivityId BLOB,
                    Tag TEXT,
                    \"Group\" TEXT,
                    MatchId TEXT,
                    LastModifiedTime INT,
                    ExpirationTime INT,
                    Payload BLOB,
                    Priority INT,
                    IsLocalOnly INT,
                    PlatformDeviceId TEXT,
                    CreatedInCloud INT,
                    StartTime INT,
                    EndTime INT,
                    LastModifiedOnClient INT,
                    GroupAppActivityId TEXT,
                    ClipboardPayload TEXT,
                    EnterpriseId TEXT,
                    OriginalPayload TEXT,
                    OriginalLastModifiedOnClient INT,
                    ETag INT
                 );
                 CREATE TABLE ManualSequence (\"Key\" TEXT, Value INT);
                 INSERT INTO ManualSequence VALUES ('Activity', 100);
                 INSERT INTO Activity VALUES (
                    X'ABCD',
                    '[{\"application\":\"notepad.exe\"}]',
                    'hash', 'ECB32AF3', 5, 1,
                    X'0011', NULL, NULL, NULL,
                    1574819646, 1606441646,
                    '{\"type\":\"UserEngaged\"}',
                    1, 0, 'device', 0,
                    1574819640, 0, 1574819646,
                    '', NULL, '', NULL, 0, 100
                 );",
            )
            .unwrap();
        path
    }

    fn add_activity(path: &str, etag: i64) {
        let connection = Connection::open(path).unwrap();
        let query = format!(
            "INSERT INTO Activity VALUES (
                X'1122', '[{{\"application\":\"cmd.exe\"}}]',
                'hash2', 'FFB32AF3', 6, 1,
                X'0011', NULL, NULL, NULL,
                1574819700, 1606441700,
                '{{}}', 1, 0, 'device', 0,
                1574819700, 0, 1574819700,
                '', NULL, '', NULL, 0, {etag}
             )"
        );
        connection.execute(&query, []).unwrap();
    }

    #[test]
    fn test_iter_activities() {
        let path = create_test_db("iter");
        let store = ActivitiesStore::new(&path);

        let records = store.iter_activities(&50).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["ETag"], Value::from(100));
        assert_eq!(records[0]["IsLocalOnly"], Value::from(0));

        let records = store.iter_activities(&150).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_iter_activities_ordering() {
        let path = create_test_db("order");
        add_activity(&path, 300);
        add_activity(&path, 200);

        let store = ActivitiesStore::new(&path);
        let records = store.iter_activities(&0).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["ETag"], Value::from(300));
        assert_eq!(records[1]["ETag"], Value::from(200));
        assert_eq!(records[2]["ETag"], Value::from(100));
    }

    #[test]
    fn test_get_sequence_marker() {
        let path = create_test_db("marker");
        let store = ActivitiesStore::new(&path);

        let marker = store.get_sequence_marker().unwrap();
        assert_eq!(marker, 100);
    }

    #[test]
    fn test_get_sequence_marker_missing() {
        let path = create_test_db("marker_missing");
        let connection = Connection::open(&path).unwrap();
        connection
            .execute("DELETE FROM ManualSequence", [])
            .unwrap();

        let store = ActivitiesStore::new(&path);
        let result = store.get_sequence_marker();
        assert!(result.is_err());
    }

    #[test]
    fn test_dump_all_tables() {
        let path = create_test_db("dump");
        let store = ActivitiesStore::new(&path);

        let tables = store.dump_all_tables().unwrap();
        // Only the tables present in the database are dumped
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].0, "Activity");
        assert_eq!(tables[0].1.len(), 1);
        assert_eq!(tables[1].0, "ManualSequence");
        assert_eq!(tables[1].1[0]["Key"], Value::from("Activity"));
        assert_eq!(tables[1].1[0]["Value"], Value::from(100));
    }

    #[test]
    fn test_connect_missing_database() {
        let store = ActivitiesStore::new("not-a-real-database.db");
        let result = store.iter_activities(&0);
        assert!(result.is_err());
    }
}
