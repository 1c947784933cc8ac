//! Synthetic FAT32 images kept in memory

#![allow(dead_code)]

use fat32::io::memory::MemoryIO;
use fat32::{BootSector, DirectoryEntry, FileAttributes};

pub const SECTOR_SIZE: usize = 512;
pub const RESERVED_SECTORS: u16 = 32;
pub const FAT_SIZE: u32 = 100;
pub const FIRST_DATA_SECTOR: usize = 32 + 2 * 100;
pub const END_OF_CHAIN: u32 = 0x0FFF_FFFF;

pub fn boot_sector() -> BootSector {
    BootSector {
        bytes_per_sector: SECTOR_SIZE as u16,
        sectors_per_cluster: 1,
        reserved_sectors: RESERVED_SECTORS,
        number_of_fats: 2,
        total_sectors_16: 0,
        total_sectors_32: (FIRST_DATA_SECTOR + 65525) as u32,
        fat_size_32: FAT_SIZE,
        root_cluster: 2,
        signature: [0x55, 0xAA],
    }
}

/// Only the sectors up to the last used cluster are backed by memory
pub struct Image {
    bytes: Vec<u8>,
}

impl Image {
    pub fn new(boot_sector: BootSector, num_sectors: usize) -> Self {
        let mut bytes = vec![0u8; num_sectors * SECTOR_SIZE];
        let mut sector = [0u8; SECTOR_SIZE];
        boot_sector.encode(&mut sector);
        bytes[..SECTOR_SIZE].copy_from_slice(&sector);
        let mut image = Self { bytes };
        image.set_fat(0, 0x0FFF_FFF8);
        image.set_fat(1, 0xFFFF_FFFF);
        image
    }

    pub fn set_fat(&mut self, cluster: u32, value: u32) {
        for fat in 0..2 {
            let sector = RESERVED_SECTORS as usize + fat * FAT_SIZE as usize;
            let offset = sector * SECTOR_SIZE + cluster as usize * 4;
            self.bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        }
    }

    /// Link clusters in order and terminate the chain
    pub fn chain(&mut self, clusters: &[u32]) {
        for pair in clusters.windows(2) {
            self.set_fat(pair[0], pair[1]);
        }
        if let Some(&last) = clusters.last() {
            self.set_fat(last, END_OF_CHAIN);
        }
    }

    pub fn cluster_mut(&mut self, cluster: u32) -> &mut [u8] {
        let offset = (FIRST_DATA_SECTOR + cluster as usize - 2) * SECTOR_SIZE;
        &mut self.bytes[offset..offset + SECTOR_SIZE]
    }

    pub fn write_entries(&mut self, cluster: u32, entries: &[DirectoryEntry]) {
        let bytes = self.cluster_mut(cluster);
        for (entry, chunk) in entries.iter().zip(bytes.chunks_exact_mut(32)) {
            let mut raw = [0u8; 32];
            entry.encode(&mut raw);
            chunk.copy_from_slice(&raw);
        }
    }

    pub fn write_data(&mut self, clusters: &[u32], data: &[u8]) {
        for (&cluster, chunk) in clusters.iter().zip(data.chunks(SECTOR_SIZE)) {
            self.cluster_mut(cluster)[..chunk.len()].copy_from_slice(chunk);
        }
    }

    pub fn truncate(&mut self, num_sectors: usize) {
        self.bytes.truncate(num_sectors * SECTOR_SIZE);
    }

    pub fn into_io(self) -> MemoryIO {
        MemoryIO::new(self.bytes)
    }
}

pub fn directory(name: &str, cluster: u32) -> DirectoryEntry {
    DirectoryEntry::new(name, FileAttributes::new(true), cluster.into(), 0).unwrap()
}

pub fn file(name: &str, cluster: u32, size: u32) -> DirectoryEntry {
    DirectoryEntry::new(name, FileAttributes::new(false), cluster.into(), size).unwrap()
}

pub fn readme() -> Vec<u8> {
    (0..600u32).map(|i| (i % 251) as u8).collect()
}

/// /
/// ├── DOCS/          cluster 3 -> 9
/// │   ├── A.TXT      cluster 4, "Hello world"
/// │   ├── SUB/       cluster 8
/// │   ├── (12 deleted entries)
/// │   └── B.TXT      cluster 10, second cluster of DOCS
/// ├── README.TXT     cluster 5 -> 6, 600 bytes
/// └── EMPTY/         cluster 7
pub fn image() -> Image {
    let mut image = Image::new(boot_sector(), FIRST_DATA_SECTOR + 16);
    image.chain(&[2]);
    let root = [directory("DOCS", 3), file("README.TXT", 5, 600), directory("EMPTY", 7)];
    image.write_entries(2, &root);

    image.chain(&[3, 9]);
    let mut docs = vec![directory(".", 3), directory("..", 0), file("A.TXT", 4, 11)];
    docs.push(directory("SUB", 8));
    for i in 0..12 {
        docs.push(file(&format!("DEL{}.TXT", i), 11, 1));
    }
    image.write_entries(3, &docs);
    for index in 4..16 {
        image.cluster_mut(3)[index * 32] = 0xE5;
    }
    image.write_entries(9, &[file("B.TXT", 10, 3)]);

    image.chain(&[4]);
    image.write_data(&[4], b"Hello world");
    image.chain(&[5, 6]);
    image.write_data(&[5, 6], &readme());
    image.chain(&[7]);
    image.write_entries(7, &[directory(".", 7), directory("..", 0)]);
    image.chain(&[8]);
    image.write_entries(8, &[directory(".", 8), directory("..", 3)]);
    image.chain(&[10]);
    image.write_data(&[10], b"abc");
    image
}
