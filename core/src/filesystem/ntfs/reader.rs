use super::{sector_reader::SectorReader, setup::setup_ntfs_parser};
use crate::filesystem::{directory::DirectoryEntry, error::FileSystemError};
use log::error;
use ntfs::{
    indexes::NtfsFileNameIndex, structured_values::NtfsFileNamespace, Ntfs, NtfsFile, NtfsReadSeek,
};
use std::{fs::File, io::BufReader};

type NtfsFs = BufReader<SectorReader<File>>;

/// Read a whole file from a live NTFS volume. Path components are relative to the volume root
pub(crate) fn raw_read_file(
    drive_letter: &char,
    components: &[String],
) -> Result<Vec<u8>, FileSystemError> {
    let mut parser = setup_ntfs_parser(drive_letter)?;
    let ntfs_file = resolve_entry(components, &parser.ntfs, &mut parser.fs)?;
    read_file_data(&ntfs_file, &mut parser.fs)
}

/// List the entries of a directory on a live NTFS volume
pub(crate) fn raw_list_directory(
    drive_letter: &char,
    components: &[String],
) -> Result<Vec<DirectoryEntry>, FileSystemError> {
    let mut parser = setup_ntfs_parser(drive_letter)?;
    let ntfs_dir = resolve_entry(components, &parser.ntfs, &mut parser.fs)?;

    let index_result = ntfs_dir.directory_index(&mut parser.fs);
    let index = match index_result {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Failed to get NTFS directory index, error: {err:?}");
            return Err(FileSystemError::IndexDirectory);
        }
    };

    let mut entries: Vec<DirectoryEntry> = Vec::new();
    let mut index_iter = index.entries();
    while let Some(entry_result) = index_iter.next(&mut parser.fs) {
        let entry = match entry_result {
            Ok(result) => result,
            Err(err) => {
                error!("[filesystem] Failed to get NTFS directory entry, error: {err:?}");
                continue;
            }
        };

        let key_result = match entry.key() {
            Some(result) => result,
            None => continue,
        };
        let filename = match key_result {
            Ok(result) => result,
            Err(err) => {
                error!("[filesystem] Failed to get NTFS filename info, error: {err:?}");
                continue;
            }
        };

        // Short DOS names duplicate every long entry
        if filename.namespace() == NtfsFileNamespace::Dos {
            continue;
        }

        entries.push(DirectoryEntry {
            name: filename.name().to_string_lossy(),
            is_directory: filename.is_directory(),
        });
    }

    Ok(entries)
}

/// Walk path components from the volume root down to the requested entry
fn resolve_entry<'a>(
    components: &[String],
    ntfs: &'a Ntfs,
    fs: &mut NtfsFs,
) -> Result<NtfsFile<'a>, FileSystemError> {
    let root_result = ntfs.root_directory(fs);
    let mut current = match root_result {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Failed to get NTFS root directory, error: {err:?}");
            return Err(FileSystemError::RootDirectory);
        }
    };

    for component in components {
        let index_result = current.directory_index(fs);
        let index = match index_result {
            Ok(result) => result,
            Err(err) => {
                error!("[filesystem] Failed to get NTFS index for {component}, error: {err:?}");
                return Err(FileSystemError::IndexDirectory);
            }
        };

        let mut finder = index.finder();
        let entry_option = NtfsFileNameIndex::find(&mut finder, ntfs, fs, component);
        let entry = match entry_option {
            Some(Ok(result)) => result,
            Some(Err(err)) => {
                error!("[filesystem] Failed to look up {component}, error: {err:?}");
                return Err(FileSystemError::IndexDirectory);
            }
            None => return Err(FileSystemError::NotFound),
        };

        let reference = entry.file_reference();
        let next_result = reference.to_file(ntfs, fs);
        current = match next_result {
            Ok(result) => result,
            Err(err) => {
                error!("[filesystem] Failed to open NTFS entry {component}, error: {err:?}");
                return Err(FileSystemError::OpenFile);
            }
        };
    }

    Ok(current)
}

/// Read the whole unnamed $DATA attribute of a resolved file
fn read_file_data(
    ntfs_file: &NtfsFile<'_>,
    fs: &mut NtfsFs,
) -> Result<Vec<u8>, FileSystemError> {
    let data_name = "";
    let data_option = ntfs_file.data(fs, data_name);
    let data_result = match data_option {
        Some(result) => result,
        None => return Err(FileSystemError::NoDataAttributeValue),
    };
    let data_item = match data_result {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Failed to get NTFS $DATA attribute, error: {err:?}");
            return Err(FileSystemError::NoDataAttributeValue);
        }
    };

    let attribute_result = data_item.to_attribute();
    let attribute = match attribute_result {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Failed to get NTFS data attribute, error: {err:?}");
            return Err(FileSystemError::NoDataAttributeValue);
        }
    };

    let value_result = attribute.value(fs);
    let mut value = match value_result {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Failed to get NTFS attribute value, error: {err:?}");
            return Err(FileSystemError::FileData);
        }
    };

    let mut data: Vec<u8> = Vec::new();
    loop {
        let temp_buff_size = 65536;
        let mut temp_buff: Vec<u8> = vec![0u8; temp_buff_size];
        let read_result = value.read(fs, &mut temp_buff);
        let bytes = match read_result {
            Ok(result) => result,
            Err(err) => {
                error!("[filesystem] Failed to read NTFS file data, error: {err:?}");
                return Err(FileSystemError::FileData);
            }
        };

        let finished = 0;
        if bytes == finished {
            break;
        }

        // Make sure our temp buff does not have any extra zeros from the initialization
        if bytes < temp_buff_size {
            temp_buff.truncate(bytes);
        }
        data.append(&mut temp_buff);
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::{raw_list_directory, raw_read_file};

    #[test]
    fn test_raw_list_directory() {
        let components = vec![String::from("Users")];
        let result = raw_list_directory(&'C', &components).unwrap();
        assert!(!result.is_empty());
    }

    #[test]
    fn test_raw_read_file() {
        let components = vec![
            String::from("Windows"),
            String::from("System32"),
            String::from("notepad.exe"),
        ];
        let result = raw_read_file(&'C', &components).unwrap();
        assert!(!result.is_empty());
    }
}
