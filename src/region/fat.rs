use crate::types::ClusterID;

pub(crate) const ENTRY_SIZE: usize = 4;
/// High 4 bits of a FAT32 entry are reserved
pub(crate) const ENTRY_MASK: u32 = 0x0FFF_FFFF;
pub(crate) const BAD_CLUSTER: u32 = 0x0FFF_FFF7;
pub(crate) const END_OF_CHAIN: u32 = 0x0FFF_FFF8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Entry {
    Free,
    Next(ClusterID),
    Reserved,
    BadCluster,
    Last,
}

impl From<u32> for Entry {
    fn from(value: u32) -> Self {
        match value & ENTRY_MASK {
            0 => Self::Free,
            1 => Self::Reserved,
            BAD_CLUSTER => Self::BadCluster,
            value if value >= END_OF_CHAIN => Self::Last,
            value => Self::Next(value.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Entry;

    #[test]
    fn test_entry() {
        assert_eq!(Entry::from(0), Entry::Free);
        assert_eq!(Entry::from(3), Entry::Next(3.into()));
        assert_eq!(Entry::from(0xF000_0003), Entry::Next(3.into()));
        assert_eq!(Entry::from(0x0FFF_FFF7), Entry::BadCluster);
        assert_eq!(Entry::from(0x0FFF_FFF8), Entry::Last);
        assert_eq!(Entry::from(0xFFFF_FFFF), Entry::Last);
    }
}
