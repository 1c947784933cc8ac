// Boot sector, only the FAT32 BPB fields consumed by the driver

use crate::endian::{put_u16, put_u32, u16_at, u32_at};
use crate::error::DataError;

pub(crate) const BOOT_SECTOR_SIZE: usize = 512;
pub(crate) const MIN_FAT32_CLUSTERS: u32 = 65525;

mod offset {
    pub const BYTES_PER_SECTOR: usize = 11;
    pub const SECTORS_PER_CLUSTER: usize = 13;
    pub const RESERVED_SECTORS: usize = 14;
    pub const NUMBER_OF_FATS: usize = 16;
    pub const TOTAL_SECTORS_16: usize = 19;
    pub const TOTAL_SECTORS_32: usize = 32;
    pub const FAT_SIZE_32: usize = 36;
    pub const ROOT_CLUSTER: usize = 44;
    pub const SIGNATURE: usize = 510;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BootSector {
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub number_of_fats: u8,
    pub total_sectors_16: u16,
    pub total_sectors_32: u32,
    pub fat_size_32: u32,
    pub root_cluster: u32,
    pub signature: [u8; 2],
}

impl BootSector {
    pub fn decode(sector: &[u8; BOOT_SECTOR_SIZE]) -> Self {
        let mut signature = [0u8; 2];
        signature.copy_from_slice(&sector[offset::SIGNATURE..]);
        Self {
            bytes_per_sector: u16_at(sector, offset::BYTES_PER_SECTOR),
            sectors_per_cluster: sector[offset::SECTORS_PER_CLUSTER],
            reserved_sectors: u16_at(sector, offset::RESERVED_SECTORS),
            number_of_fats: sector[offset::NUMBER_OF_FATS],
            total_sectors_16: u16_at(sector, offset::TOTAL_SECTORS_16),
            total_sectors_32: u32_at(sector, offset::TOTAL_SECTORS_32),
            fat_size_32: u32_at(sector, offset::FAT_SIZE_32),
            root_cluster: u32_at(sector, offset::ROOT_CLUSTER),
            signature,
        }
    }

    pub fn encode(&self, sector: &mut [u8; BOOT_SECTOR_SIZE]) {
        put_u16(sector, offset::BYTES_PER_SECTOR, self.bytes_per_sector);
        sector[offset::SECTORS_PER_CLUSTER] = self.sectors_per_cluster;
        put_u16(sector, offset::RESERVED_SECTORS, self.reserved_sectors);
        sector[offset::NUMBER_OF_FATS] = self.number_of_fats;
        put_u16(sector, offset::TOTAL_SECTORS_16, self.total_sectors_16);
        put_u32(sector, offset::TOTAL_SECTORS_32, self.total_sectors_32);
        put_u32(sector, offset::FAT_SIZE_32, self.fat_size_32);
        put_u32(sector, offset::ROOT_CLUSTER, self.root_cluster);
        sector[offset::SIGNATURE..].copy_from_slice(&self.signature);
    }

    pub fn has_signature(&self) -> bool {
        self.signature == hex!("55 AA")
    }

    pub fn total_sectors(&self) -> u32 {
        match self.total_sectors_32 {
            0 => self.total_sectors_16 as u32,
            total => total,
        }
    }

    /// 512 ~ 4096
    pub fn validate(&self) -> Result<(), DataError> {
        let bytes_per_sector = self.bytes_per_sector;
        if !bytes_per_sector.is_power_of_two() || !(512..=4096).contains(&bytes_per_sector) {
            return Err(DataError::Geometry("bytes per sector"));
        }
        if !self.sectors_per_cluster.is_power_of_two() {
            return Err(DataError::Geometry("sectors per cluster"));
        }
        if self.reserved_sectors == 0 {
            return Err(DataError::Geometry("reserved sectors"));
        }
        if self.number_of_fats == 0 {
            return Err(DataError::Geometry("number of FATs"));
        }
        if self.fat_size_32 == 0 {
            return Err(DataError::Geometry("FAT size"));
        }
        if self.root_cluster < 2 {
            return Err(DataError::Geometry("root cluster"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{BootSector, BOOT_SECTOR_SIZE};
    use crate::error::DataError;

    fn boot_sector() -> BootSector {
        BootSector {
            bytes_per_sector: 512,
            sectors_per_cluster: 1,
            reserved_sectors: 32,
            number_of_fats: 2,
            total_sectors_16: 0,
            total_sectors_32: 65525 + 232,
            fat_size_32: 100,
            root_cluster: 2,
            signature: hex!("55 AA"),
        }
    }

    #[test]
    fn test_decode_bpb_offsets() {
        let mut sector = [0u8; BOOT_SECTOR_SIZE];
        sector[11..18].copy_from_slice(&hex!("00 02 08 20 00 02 00"));
        sector[32..48].copy_from_slice(&hex!("00 00 10 00 F1 03 00 00 00 00 00 00 00 00 00 00"));
        sector[44..48].copy_from_slice(&hex!("02 00 00 00"));
        sector[510..].copy_from_slice(&hex!("55 AA"));
        let boot_sector = BootSector::decode(&sector);
        assert_eq!(boot_sector.bytes_per_sector, 512);
        assert_eq!(boot_sector.sectors_per_cluster, 8);
        assert_eq!(boot_sector.reserved_sectors, 32);
        assert_eq!(boot_sector.number_of_fats, 2);
        assert_eq!(boot_sector.total_sectors(), 0x100000);
        assert_eq!(boot_sector.fat_size_32, 0x3F1);
        assert_eq!(boot_sector.root_cluster, 2);
        assert!(boot_sector.has_signature());
    }

    #[test]
    fn test_encode() {
        let mut sector = [0u8; BOOT_SECTOR_SIZE];
        boot_sector().encode(&mut sector);
        assert_eq!(sector[11..17], hex!("00 02 01 20 00 02"));
        assert_eq!(BootSector::decode(&sector), boot_sector());
    }

    #[test]
    fn test_total_sectors_fallback() {
        let boot_sector =
            BootSector { total_sectors_16: 4096, total_sectors_32: 0, ..boot_sector() };
        assert_eq!(boot_sector.total_sectors(), 4096);
    }

    #[test]
    fn test_validate() {
        assert_eq!(boot_sector().validate(), Ok(()));
        let invalid = BootSector { bytes_per_sector: 500, ..boot_sector() };
        assert_eq!(invalid.validate(), Err(DataError::Geometry("bytes per sector")));
        let invalid = BootSector { sectors_per_cluster: 0, ..boot_sector() };
        assert_eq!(invalid.validate(), Err(DataError::Geometry("sectors per cluster")));
        let invalid = BootSector { number_of_fats: 0, ..boot_sector() };
        assert_eq!(invalid.validate(), Err(DataError::Geometry("number of FATs")));
        let invalid = BootSector { root_cluster: 1, ..boot_sector() };
        assert_eq!(invalid.validate(), Err(DataError::Geometry("root cluster")));
    }
}
