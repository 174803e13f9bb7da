use std::cmp::min;
use std::io::{Error, ErrorKind, Read, Result, Seek, SeekFrom};

/// `Read` and `Seek` wrapper that aligns every access to the sector size.
/// Raw volume handles (ex: \\.\C:) reject reads that do not start on a sector boundary
pub(crate) struct SectorReader<R>
where
    R: Read + Seek,
{
    inner: R,
    sector_size: usize,
    stream_position: u64,
    temp_buf: Vec<u8>,
}

impl<R> SectorReader<R>
where
    R: Read + Seek,
{
    pub(crate) fn new(inner: R, sector_size: usize) -> Result<Self> {
        if !sector_size.is_power_of_two() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "sector size must be a power of two",
            ));
        }

        Ok(Self {
            inner,
            sector_size,
            stream_position: 0,
            temp_buf: Vec::new(),
        })
    }

    fn align_down_to_sector_size(&self, value: u64) -> u64 {
        value / self.sector_size as u64 * self.sector_size as u64
    }

    fn align_up_to_sector_size(&self, value: u64) -> u64 {
        self.align_down_to_sector_size(value + self.sector_size as u64 - 1)
    }
}

impl<R> Read for SectorReader<R>
where
    R: Read + Seek,
{
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let aligned_position = self.align_down_to_sector_size(self.stream_position);
        let start = (self.stream_position - aligned_position) as usize;
        let aligned_length = self.align_up_to_sector_size((start + buf.len()) as u64) as usize;

        self.temp_buf.resize(aligned_length, 0);
        self.inner.seek(SeekFrom::Start(aligned_position))?;
        let bytes_read = self.inner.read(&mut self.temp_buf)?;
        if bytes_read <= start {
            return Ok(0);
        }

        let count = min(bytes_read - start, buf.len());
        buf[..count].copy_from_slice(&self.temp_buf[start..start + count]);
        self.stream_position += count as u64;
        Ok(count)
    }
}

impl<R> Seek for SectorReader<R>
where
    R: Read + Seek,
{
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        match pos {
            SeekFrom::Start(position) => {
                // The actual seek on the raw handle happens lazily in read, already aligned
                self.stream_position = position;
                Ok(position)
            }
            _ => Err(Error::new(
                ErrorKind::InvalidInput,
                "only SeekFrom::Start is supported",
            )),
        }
    }
}
