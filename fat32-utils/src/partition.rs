use std::io;

use derive_more::Display;
use fat32::io::std::FileIO;
use fat32::io::IO;
use mbr_nostd::{MasterBootRecord, PartitionTable};
use thiserror::Error;

const SECTOR_SIZE: u64 = 512;

#[derive(Debug, Display, Error)]
pub enum Error {
    #[display("IO: {_0}")]
    IO(#[from] io::Error),
    #[display("{_0}")]
    String(&'static str),
}

/// Device or image, optionally narrowed to one MBR partition
pub struct Partition {
    io: FileIO,
    offset: u64, // unit byte
}

impl IO for Partition {
    type Error = io::Error;

    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.io.read(self.offset + offset, buf)
    }
}

impl Partition {
    pub fn open(device: &str, partition: Option<usize>) -> Result<Self, Error> {
        let io = FileIO::open(device)?;
        let mut partition_io = Self { io, offset: 0 };
        if let Some(partition) = partition {
            partition_io.set_partition(partition)?;
        }
        Ok(partition_io)
    }

    fn set_partition(&mut self, partition: usize) -> Result<(), Error> {
        let mut buffer = [0u8; SECTOR_SIZE as usize];
        self.io.read(0, &mut buffer)?;
        let mbr = MasterBootRecord::from_bytes(&buffer).map_err(|_| Error::String("Not MBR"))?;
        let entries = mbr.partition_table_entries();
        let entry = entries.get(partition).ok_or(Error::String("Partition out of range"))?;
        if entry.sector_count == 0 {
            return Err(Error::String("Invalid partition"));
        }
        self.offset = entry.logical_block_address as u64 * SECTOR_SIZE;
        trace!("Partition offset {} num-sectors {}", self.offset, entry.sector_count);
        Ok(())
    }
}
