use super::{error::VolumeError, reader::list_volume_directory, reader::read_volume_file};
use log::{error, info};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Artifact locations for one ConnectedDevicesPlatform identity. Paths are
/// derived from the stable identity id, not read from the settings file
pub(crate) struct IdentityLocation {
    pub(crate) identity: String,
    pub(crate) database: String,
    pub(crate) wal: String,
    pub(crate) shm: String,
}

#[derive(Debug, Deserialize)]
struct CdpGlobalSettings {
    #[serde(rename = "ActivityStoreInfo", default)]
    activity_store_info: Vec<ActivityStoreInfo>,
}

#[derive(Debug, Deserialize)]
struct ActivityStoreInfo {
    #[serde(rename = "stableUserId")]
    stable_user_id: String,
}

/// Get the usernames under the volume's Users directory. A volume without one
/// is a normal outcome (ex: non system volumes) and contributes no users
pub(crate) fn list_users(source: &str) -> Vec<String> {
    let entries_result = list_volume_directory(source, "Users");
    let entries = match entries_result {
        Ok(result) => result,
        Err(err) => {
            info!("[volume] No Users directory found on {source}: {err:?}");
            return Vec::new();
        }
    };

    let mut users: Vec<String> = Vec::new();
    for entry in entries {
        if !entry.is_directory || entry.name == "." || entry.name == ".." {
            continue;
        }
        users.push(entry.name);
    }
    users
}

/// Map a user's identities to their artifact locations by parsing the
/// CDP global settings. Users without settings contribute no identities
pub(crate) fn resolve_identities(
    source: &str,
    username: &str,
) -> BTreeMap<String, IdentityLocation> {
    let mut identities: BTreeMap<String, IdentityLocation> = BTreeMap::new();

    let base = format!("Users/{username}/AppData/Local/ConnectedDevicesPlatform");
    let settings_path = format!("{base}/CDPGlobalSettings.cdp");
    let bytes_result = read_volume_file(source, &settings_path);
    let bytes = match bytes_result {
        Ok(result) => result,
        Err(_err) => {
            info!("[volume] No CDP settings for user {username}");
            return identities;
        }
    };

    let settings_result = parse_settings(&bytes);
    let settings = match settings_result {
        Ok(result) => result,
        Err(err) => {
            error!("[volume] Could not parse CDP settings for user {username}: {err:?}");
            return identities;
        }
    };

    for info in settings.activity_store_info {
        let store = format!("{base}/{}", info.stable_user_id);
        identities.insert(
            info.stable_user_id.clone(),
            IdentityLocation {
                identity: info.stable_user_id,
                database: format!("{store}/ActivitiesCache.db"),
                wal: format!("{store}/ActivitiesCache.db-wal"),
                shm: format!("{store}/ActivitiesCache.db-shm"),
            },
        );
    }
    identities
}

/// The settings file may lead with a UTF-8 BOM
fn parse_settings(data: &[u8]) -> Result<CdpGlobalSettings, VolumeError> {
    let text = String::from_utf8_lossy(data);
    let settings_result = serde_json::from_str(text.trim_start_matches('\u{feff}'));
    match settings_result {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[volume] Failed to parse CDP global settings: {err:?}");
            Err(VolumeError::BadSettings)
        }
    }
}
