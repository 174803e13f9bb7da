use super::sector_reader::SectorReader;
use crate::filesystem::error::FileSystemError;
use log::error;
use ntfs::Ntfs;
use std::{fs::File, io::BufReader};

pub(crate) struct NtfsParser {
    pub(crate) ntfs: Ntfs,
    pub(crate) fs: BufReader<SectorReader<File>>,
}

/// Setup NTFS parser by opening drive letter and creating Sector Reader
pub(crate) fn setup_ntfs_parser(drive_letter: &char) -> Result<NtfsParser, FileSystemError> {
    let drive_path = format!("\\\\.\\{drive_letter}:");

    let fs_result = File::open(drive_path);
    let fs = match fs_result {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Failed to open drive: {drive_letter}, error: {err:?}");
            return Err(FileSystemError::OpenFile);
        }
    };

    // Size used for reader setup
    let reader_size = 4096;
    let sector_reader_result = SectorReader::new(fs, reader_size);
    let sector_reader = match sector_reader_result {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Failed to setup sector reader, error: {err:?}");
            return Err(FileSystemError::NtfsSectorReader);
        }
    };

    let mut fs = BufReader::new(sector_reader);

    let ntfs_result = Ntfs::new(&mut fs);
    let ntfs = match ntfs_result {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Failed to start NTFS parser, error: {err:?}");
            return Err(FileSystemError::NtfsNew);
        }
    };

    Ok(NtfsParser { ntfs, fs })
}
