use crate::error::DataError;
use crate::region::boot::{BootSector, MIN_FAT32_CLUSTERS};
use crate::types::{ClusterID, SectorID};

/// Volume geometry decoded from the BPB, immutable after mount
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub number_of_fats: u8,
    /// Unit sector
    pub fat_size: u32,
    pub total_sectors: u32,
    pub root_cluster: ClusterID,
}

impl TryFrom<&BootSector> for Geometry {
    type Error = DataError;

    fn try_from(boot_sector: &BootSector) -> Result<Self, DataError> {
        boot_sector.validate()?;
        let geometry = Self {
            bytes_per_sector: boot_sector.bytes_per_sector,
            sectors_per_cluster: boot_sector.sectors_per_cluster,
            reserved_sectors: boot_sector.reserved_sectors,
            number_of_fats: boot_sector.number_of_fats,
            fat_size: boot_sector.fat_size_32,
            total_sectors: boot_sector.total_sectors(),
            root_cluster: ClusterID::from(boot_sector.root_cluster),
        };
        // Root directory region is always empty on FAT32
        let first_data_sector = geometry.first_data_sector();
        if first_data_sector >= geometry.total_sectors as u64 {
            return Err(DataError::Geometry("total sectors"));
        }
        let clusters = geometry.cluster_count();
        if clusters < MIN_FAT32_CLUSTERS {
            return Err(DataError::NotFAT32 { clusters });
        }
        Ok(geometry)
    }
}

impl Geometry {
    pub fn first_data_sector(&self) -> u64 {
        let fat_sectors = self.number_of_fats as u64 * self.fat_size as u64;
        self.reserved_sectors as u64 + fat_sectors
    }

    pub fn cluster_count(&self) -> u32 {
        let data_sectors = (self.total_sectors as u64).saturating_sub(self.first_data_sector());
        (data_sectors / self.sectors_per_cluster as u64) as u32
    }

    pub fn cluster_size(&self) -> u32 {
        self.bytes_per_sector as u32 * self.sectors_per_cluster as u32
    }

    /// Byte offset of the first FAT
    pub fn fat_offset(&self) -> u64 {
        self.reserved_sectors as u64 * self.bytes_per_sector as u64
    }

    /// Length in bytes of a single FAT
    pub fn fat_length(&self) -> usize {
        self.fat_size as usize * self.bytes_per_sector as usize
    }

    /// Caller guarantees cluster is valid
    pub fn cluster_sector(&self, cluster: ClusterID) -> SectorID {
        let num_sectors = cluster.offset() as u64 * self.sectors_per_cluster as u64;
        SectorID::BOOT + self.first_data_sector() + num_sectors
    }
}
