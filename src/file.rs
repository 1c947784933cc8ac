use alloc::vec::Vec;
use core::fmt::Debug;

use crate::cluster::ClusterReader;
use crate::error::{DataError, Error};
use crate::io::IO;
use crate::region::data::entry::DirectoryEntry;
use crate::types::{ClusterID, Descriptor};

pub const MAX_OPEN_FILES: usize = 128;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct OpenFile {
    pub first_cluster: ClusterID,
    pub size: u32,
    pub cursor: u64,
}

impl From<&DirectoryEntry> for OpenFile {
    fn from(entry: &DirectoryEntry) -> Self {
        Self { first_cluster: entry.first_cluster(), size: entry.size(), cursor: 0 }
    }
}

impl OpenFile {
    /// Read up to `buf.len()` bytes from `offset`, returns 0 at or beyond end of file
    pub fn read_at<E: Debug, T: IO<Error = E> + ?Sized>(
        &self,
        reader: &mut ClusterReader<'_, T>,
        cluster_size: u32,
        offset: u64,
        buf: &mut [u8],
    ) -> Result<usize, Error<E>> {
        let size = self.size as u64;
        if offset >= size || buf.is_empty() {
            return Ok(0);
        }
        if !self.first_cluster.valid() {
            return Err(DataError::FATChain(self.first_cluster).into());
        }
        let length = (size - offset).min(buf.len() as u64) as usize;
        let skip = offset / cluster_size as u64;
        let mut cluster_offset = (offset % cluster_size as u64) as u32;
        let mut done = 0;
        for (index, cluster) in reader.clusters(self.first_cluster).enumerate() {
            let cluster = match cluster {
                Ok(cluster) => cluster,
                Err(e) if done > 0 => {
                    warn!("Read of cluster chain {} cut short: {:?}", self.first_cluster, e);
                    return Ok(done);
                }
                Err(e) => return Err(e),
            };
            if (index as u64) < skip {
                continue;
            }
            let remain = (cluster_size - cluster_offset) as usize;
            let count = remain.min(length - done);
            reader.read_at(cluster, cluster_offset, &mut buf[done..done + count])?;
            done += count;
            cluster_offset = 0;
            if done == length {
                return Ok(done);
            }
        }
        warn!("Chain from cluster {} shorter than file size {}", self.first_cluster, size);
        Ok(done)
    }
}

/// Descriptor table, the lowest free slot is reused first
#[derive(Clone, Debug, Default)]
pub(crate) struct OpenFiles {
    files: Vec<Option<OpenFile>>,
}

impl OpenFiles {
    pub fn insert(&mut self, file: OpenFile) -> Option<Descriptor> {
        if let Some(index) = self.files.iter().position(|slot| slot.is_none()) {
            self.files[index] = Some(file);
            return Some(Descriptor::from(index));
        }
        if self.files.len() >= MAX_OPEN_FILES {
            return None;
        }
        self.files.push(Some(file));
        Some(Descriptor::from(self.files.len() - 1))
    }

    pub fn get_mut(&mut self, fd: Descriptor) -> Option<&mut OpenFile> {
        self.files.get_mut(usize::from(fd)).and_then(|slot| slot.as_mut())
    }

    pub fn remove(&mut self, fd: Descriptor) -> Option<OpenFile> {
        self.files.get_mut(usize::from(fd)).and_then(|slot| slot.take())
    }

    pub fn len(&self) -> usize {
        self.files.iter().filter(|slot| slot.is_some()).count()
    }
}
