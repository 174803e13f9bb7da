use rusqlite::Connection;
use std::env::temp_dir;
use std::fs::{create_dir_all, write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use winactivities_core::core::{parse_database, parse_volume};
use winactivities_core::structs::options::ActivitiesOptions;

fn create_activities_db(path: &str) {
    let connection = Connection::open(path).unwrap();
    connection
        .execute_batch(
            "CREATE TABLE Activity (
                Id BLOB, AppId TEXT, PackageIdHash TEXT, AppActivityId TEXT,
                ActivityType INT, ActivityStatus INT, ParentActivityId BLOB,
                Tag TEXT, \"Group\" TEXT, MatchId TEXT,
                LastModifiedTime INT, ExpirationTime INT, Payload BLOB,
                Priority INT, IsLocalOnly INT, PlatformDeviceId TEXT,
                CreatedInCloud INT, StartTime INT, EndTime INT,
                LastModifiedOnClient INT, GroupAppActivityId TEXT,
                ClipboardPayload TEXT, EnterpriseId TEXT, OriginalPayload TEXT,
                OriginalLastModifiedOnClient INT, ETag INT
             );
             CREATE TABLE ActivityOperation (
                OperationOrder INT, Id BLOB, OperationType INT, AppId TEXT,
                PackageIdHash TEXT, AppActivityId TEXT, ActivityType INT,
                ParentActivityId BLOB, Tag TEXT, \"Group\" TEXT, MatchId TEXT,
                LastModifiedTime INT, ExpirationTime INT, Payload BLOB,
                Priority INT, CreatedTime INT, Attachments TEXT,
                PlatformDeviceId TEXT, CreatedInCloud INT, StartTime INT,
                EndTime INT, LastModifiedOnClient INT, CorrelationVector TEXT,
                GroupAppActivityId TEXT, ClipboardPayload TEXT, EnterpriseId TEXT,
                OriginalPayload TEXT, OriginalLastModifiedOnClient INT, ETag INT
             );
             CREATE TABLE Activity_PackageId (
                ActivityId BLOB, Platform TEXT, PackageName TEXT, ExpirationTime INT
             );
             CREATE TABLE ManualSequence (\"Key\" TEXT, Value INT);
             INSERT INTO ManualSequence VALUES ('Activity', 100);
             INSERT INTO Activity VALUES (
                X'ABCD', '[{\"application\":\"notepad.exe\"}]', 'hash',
                'ECB32AF3', 5, 1, X'0011', NULL, NULL, NULL,
                1574819646, 1606441646, '{\"type\":\"UserEngaged\"}',
                1, 0, 'device', 0, 1574819640, 0, 1574819646,
                '', NULL, '', NULL, 0, 100
             );
             INSERT INTO Activity_PackageId VALUES (
                X'ABCD', 'x_exe_path', 'C:\\Windows\\notepad.exe', 1606441646
             );",
        )
        .unwrap();
}

fn unique_root(name: &str) -> String {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}/winactivities-tester/{name}-{suffix}", temp_dir().display())
}

/// Build a volume where only alice has CDP settings and an activities database
fn setup_volume(name: &str) -> String {
    let root = unique_root(name);
    let cdp = format!("{root}/Users/alice/AppData/Local/ConnectedDevicesPlatform");
    create_dir_all(format!("{cdp}/id-1")).unwrap();
    create_dir_all(format!("{root}/Users/bob")).unwrap();
    write(
        format!("{cdp}/CDPGlobalSettings.cdp"),
        "\u{feff}{\"ActivityStoreInfo\":[{\"stableUserId\":\"id-1\",\"minRowId\":0}]}",
    )
    .unwrap();
    create_activities_db(&format!("{cdp}/id-1/ActivitiesCache.db"));
    root
}

#[test]
fn test_parse_volume() {
    let root = setup_volume("volume");
    let staging = format!("{root}/staging");
    let options = ActivitiesOptions {
        sequence: 0,
        dump_db: false,
        template: None,
        temp_dir: Some(staging.clone()),
        cleanup: false,
    };

    parse_volume(&root, &options).unwrap();

    // Only alice contributed an identity, bob has no CDP settings
    assert!(Path::new(&format!("{staging}/alice-id-1/ActivitiesCache.db")).is_file());
    assert!(!Path::new(&format!("{staging}/bob-id-1")).exists());
}

#[test]
fn test_parse_volume_dump() {
    let root = setup_volume("volume_dump");
    let staging = format!("{root}/staging");
    let options = ActivitiesOptions {
        sequence: 0,
        dump_db: true,
        template: None,
        temp_dir: Some(staging),
        cleanup: true,
    };

    parse_volume(&root, &options).unwrap();
}

#[test]
fn test_parse_volume_without_users() {
    let root = unique_root("volume_empty");
    create_dir_all(&root).unwrap();
    let options = ActivitiesOptions {
        sequence: 0,
        dump_db: false,
        template: None,
        temp_dir: None,
        cleanup: false,
    };

    parse_volume(&root, &options).unwrap();
}

#[test]
fn test_parse_database() {
    let root = unique_root("database");
    create_dir_all(&root).unwrap();
    let database = format!("{root}/ActivitiesCache.db");
    create_activities_db(&database);

    let options = ActivitiesOptions {
        sequence: 0,
        dump_db: false,
        template: None,
        temp_dir: None,
        cleanup: false,
    };
    parse_database(&database, &options).unwrap();
}

#[test]
fn test_parse_database_template() {
    let root = unique_root("database_template");
    create_dir_all(&root).unwrap();
    let database = format!("{root}/ActivitiesCache.db");
    create_activities_db(&database);

    let options = ActivitiesOptions {
        sequence: 0,
        dump_db: true,
        template: Some(String::from("{_table} {AppActivityId} {ETag}")),
        temp_dir: None,
        cleanup: false,
    };
    parse_database(&database, &options).unwrap();
}
