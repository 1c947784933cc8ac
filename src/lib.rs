#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

#[macro_use]
extern crate hex_literal;
#[macro_use]
extern crate log;

pub mod cluster;
pub mod directory;
mod endian;
pub mod error;
pub mod fat;
pub mod file;
pub mod fs;
pub mod io;
pub mod path;
mod region;
pub mod types;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use cluster::ClusterReader;
use error::{Error, InputError, OperationError};
use fat::FAT;
use file::{OpenFile, OpenFiles};
use fs::Geometry;
use io::Wrap;
pub use region::boot::BootSector;
use region::boot::BOOT_SECTOR_SIZE;
pub use region::data::entry::{DirectoryEntry, FileAttributes, ShortName, Timestamp};
use types::Descriptor;

/// Mounted volume: geometry, resident FAT, current directory and open files
pub struct FAT32<IO> {
    io: IO,
    geometry: Geometry,
    fat: FAT,
    entries: Vec<DirectoryEntry>,
    cwd: Vec<String>,
    files: OpenFiles,
}

impl<E: Debug, IO: io::IO<Error = E>> FAT32<IO> {
    pub fn mount(mut io: IO) -> Result<Self, Error<E>> {
        let mut sector = [0u8; BOOT_SECTOR_SIZE];
        io.wrap().read(0, &mut sector)?;
        let boot_sector = BootSector::decode(&sector);
        if !boot_sector.has_signature() {
            warn!("Boot sector signature missing");
        }
        let geometry = Geometry::try_from(&boot_sector)?;
        debug!("Geometry {:?}", geometry);
        let first_data_sector = geometry.first_data_sector();
        debug!("{} clusters from sector {}", geometry.cluster_count(), first_data_sector);

        let fat = FAT::load(&mut io, &geometry)?;
        let root = geometry.root_cluster;
        debug!("Root directory on cluster {}", root);
        let mut reader = ClusterReader::new(&mut io, &geometry, &fat);
        let entries = path::resolve(&mut reader, root, &[], path::ROOT)?.unwrap_or_default();
        let cwd = vec![path::ROOT.to_string()];
        Ok(Self { io, geometry, fat, entries, cwd, files: OpenFiles::default() })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn fat(&self) -> &FAT {
        &self.fat
    }

    pub fn cluster_reader(&mut self) -> ClusterReader<'_, IO> {
        ClusterReader::new(&mut self.io, &self.geometry, &self.fat)
    }

    /// Entries of the current directory
    pub fn current_directory(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn current_path(&self) -> String {
        path::join(&self.cwd)
    }

    fn lookup(&mut self, path: &str) -> Result<Option<Vec<DirectoryEntry>>, Error<E>> {
        let root = self.geometry.root_cluster;
        let mut reader = ClusterReader::new(&mut self.io, &self.geometry, &self.fat);
        path::resolve(&mut reader, root, &self.entries, path)
    }

    /// Entries of the directory `path` names, relative to current directory,
    /// empty if it does not exist
    pub fn resolve(&mut self, path: &str) -> Result<Vec<DirectoryEntry>, Error<E>> {
        Ok(self.lookup(path)?.unwrap_or_default())
    }

    /// Current directory is left untouched unless `path` names a directory
    pub fn change_directory(&mut self, path: &str) -> Result<(), Error<E>> {
        let entries = self.lookup(path)?.ok_or(OperationError::NotFound)?;
        self.entries = entries;
        self.cwd = path::merge(&self.cwd, path);
        trace!("Current directory {}", self.current_path());
        Ok(())
    }

    /// Like the C `readdir` contract, `None` when `path` does not name a directory
    pub fn list_directory(
        &mut self,
        path: &str,
    ) -> Result<Option<Vec<DirectoryEntry>>, Error<E>> {
        self.lookup(path)
    }

    /// Find the entry `path` names
    pub fn stat(&mut self, path: &str) -> Result<DirectoryEntry, Error<E>> {
        let path = path.trim_end_matches('/');
        let (parent, name) = match path.rsplit_once('/') {
            Some(("", name)) => (path::ROOT, name),
            Some((parent, name)) => (parent, name),
            None => (path::CURRENT, path),
        };
        if name.is_empty() {
            return Err(InputError::EmptyPath.into());
        }
        let entries = self.lookup(parent)?.ok_or(OperationError::NotFound)?;
        let entry = directory::find(&entries, name).ok_or(OperationError::NotFound)?;
        Ok(*entry)
    }

    pub fn open(&mut self, path: &str) -> Result<Descriptor, Error<E>> {
        let entry = self.stat(path)?;
        if entry.is_directory() || entry.is_volume_label() || entry.is_long_name() {
            return Err(OperationError::NotFile.into());
        }
        let fd = self.files.insert(OpenFile::from(&entry));
        let fd = fd.ok_or(OperationError::TooManyOpenFiles)?;
        trace!("Open {} as {} on cluster {}", path, fd, entry.first_cluster());
        Ok(fd)
    }

    pub fn close(&mut self, fd: Descriptor) -> Result<(), Error<E>> {
        match self.files.remove(fd) {
            Some(_) => Ok(()),
            None => Err(OperationError::BadDescriptor.into()),
        }
    }

    /// File size in bytes
    pub fn size(&mut self, fd: Descriptor) -> Result<u32, Error<E>> {
        let file = self.files.get_mut(fd).ok_or(OperationError::BadDescriptor)?;
        Ok(file.size)
    }

    pub fn open_files(&self) -> usize {
        self.files.len()
    }

    /// Read at `offset` without moving the cursor, returns 0 at end of file
    pub fn pread(
        &mut self,
        fd: Descriptor,
        buf: &mut [u8],
        offset: u64,
    ) -> Result<usize, Error<E>> {
        let file = *self.files.get_mut(fd).ok_or(OperationError::BadDescriptor)?;
        let cluster_size = self.geometry.cluster_size();
        let mut reader = ClusterReader::new(&mut self.io, &self.geometry, &self.fat);
        file.read_at(&mut reader, cluster_size, offset, buf)
    }

    /// Read from the cursor and advance it
    pub fn read(&mut self, fd: Descriptor, buf: &mut [u8]) -> Result<usize, Error<E>> {
        let cursor = self.files.get_mut(fd).ok_or(OperationError::BadDescriptor)?.cursor;
        let size = self.pread(fd, buf, cursor)?;
        if let Some(file) = self.files.get_mut(fd) {
            file.cursor += size as u64;
        }
        Ok(size)
    }

    /// Read the whole file from the beginning
    pub fn read_to_end(&mut self, fd: Descriptor) -> Result<Vec<u8>, Error<E>> {
        let size = self.size(fd)? as usize;
        let mut bytes = vec![0u8; size];
        let length = self.pread(fd, &mut bytes, 0)?;
        bytes.truncate(length);
        Ok(bytes)
    }

    pub fn unmount(self) -> IO {
        if self.files.len() > 0 {
            debug!("Unmount with {} files open", self.files.len());
        }
        self.io
    }
}
