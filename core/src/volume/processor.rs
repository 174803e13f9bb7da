use super::{
    discovery::{list_users, resolve_identities},
    error::VolumeError,
    staging::StagingManager,
};
use crate::artifacts::activities::{error::ActivitiesError, store::ActivitiesStore};
use crate::output::records::write_record;
use crate::structs::options::ActivitiesOptions;
use log::{error, info, warn};
use serde_json::{Map, Value};

/// Walk a volume for every (user, identity) pair and decode each staged
/// activities database. One pair is fully staged and decoded before the next
/// begins, and a failed pair never aborts the run
pub(crate) fn process_volume(source: &str, options: &ActivitiesOptions) -> Result<(), VolumeError> {
    let users = list_users(source);
    if users.is_empty() {
        warn!("[volume] No users discovered on {source}");
        return Ok(());
    }

    let manager = StagingManager::new(&options.temp_dir, options.cleanup);
    for username in users {
        let identities = resolve_identities(source, &username);
        for location in identities.into_values() {
            let identity = &location.identity;
            let set_result = manager.extraction_set(&username, identity);
            let mut set = match set_result {
                Ok(result) => result,
                Err(err) => {
                    error!(
                        "[volume] Could not create staging for {username}-{identity}: {err:?}"
                    );
                    continue;
                }
            };

            set.stage(source, &location.database);
            set.stage(source, &location.wal);
            set.stage(source, &location.shm);

            let database = match set.locate_database() {
                Some(result) => result,
                None => {
                    warn!(
                        "[volume] No activities database staged for user {username} identity {identity}"
                    );
                    continue;
                }
            };

            let status = process_database(&database, Some((&username, identity)), options);
            match status {
                Ok(_) => {}
                Err(err) => {
                    error!("[volume] Failed to parse database for {username}-{identity}: {err:?}");
                }
            }
        }
    }

    manager.finish();
    Ok(())
}

/// Decode one activities database and emit its records
pub(crate) fn process_database(
    path: &str,
    provenance: Option<(&str, &str)>,
    options: &ActivitiesOptions,
) -> Result<(), ActivitiesError> {
    let store = ActivitiesStore::new(path);
    if options.dump_db {
        return dump_records(&store, options);
    }

    // The watermark is informational only, it is never used to resume iteration
    match store.get_sequence_marker() {
        Ok(sequence) => info!("[volume] Activity sequence for {path}: {sequence}"),
        Err(err) => warn!("[volume] Could not get activity sequence for {path}: {err:?}"),
    }

    let records = store.iter_activities(&options.sequence)?;
    for mut record in records {
        if let Some((username, identity)) = provenance {
            record.insert(String::from("_user"), Value::String(username.to_string()));
            record.insert(
                String::from("_identity"),
                Value::String(identity.to_string()),
            );
        }
        write_record(&record, &options.template);
    }
    Ok(())
}

/// Dump every table, tagging each record with its source table
fn dump_records(
    store: &ActivitiesStore,
    options: &ActivitiesOptions,
) -> Result<(), ActivitiesError> {
    let tables = store.dump_all_tables()?;
    for (table, records) in tables {
        for record in records {
            let mut tagged = Map::new();
            tagged.insert(String::from("_table"), Value::String(table.clone()));
            for (key, value) in record {
                tagged.insert(key, value);
            }
            write_record(&tagged, &options.template);
        }
    }
    Ok(())
}
