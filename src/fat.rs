use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::{DataError, Error};
use crate::fs::Geometry;
use crate::io::{Wrap, IO};
use crate::region::fat::{Entry, ENTRY_SIZE};
use crate::types::ClusterID;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NextCluster {
    Chained(ClusterID),
    EndOfChain,
}

/// First FAT, resident in memory and read-only after load
#[derive(Clone, Debug)]
pub struct FAT {
    entries: Vec<u32>,
}

impl FAT {
    pub fn load<E: Debug, T: IO<Error = E> + ?Sized>(
        io: &mut T,
        geometry: &Geometry,
    ) -> Result<Self, Error<E>> {
        let mut bytes = vec![0u8; geometry.fat_length()];
        io.wrap().read(geometry.fat_offset(), &mut bytes)?;
        // Entries past the data region never take part in a chain
        let num_entries = bytes.len() / ENTRY_SIZE;
        let num_entries = num_entries.min(geometry.cluster_count() as usize + 2);
        let array = bytes.chunks_exact(ENTRY_SIZE).take(num_entries);
        let entries = array.map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]])).collect();
        debug!("FAT loaded with {} entries", num_entries);
        Ok(Self { entries })
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<u32>) -> Self {
        Self { entries }
    }

    /// Number of entries including the two reserved ones
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= u32::from(ClusterID::FIRST) as usize
    }

    pub fn contains(&self, cluster: ClusterID) -> bool {
        cluster.valid() && (u32::from(cluster) as usize) < self.entries.len()
    }

    pub fn next<E: Debug>(&self, cluster: ClusterID) -> Result<NextCluster, Error<E>> {
        if !self.contains(cluster) {
            return Err(Error::OutOfBounds(cluster));
        }
        match Entry::from(self.entries[u32::from(cluster) as usize]) {
            Entry::Next(next) if self.contains(next) => Ok(NextCluster::Chained(next)),
            Entry::Last => Ok(NextCluster::EndOfChain),
            entry => {
                warn!("Cluster {} links to {:?}", cluster, entry);
                Err(DataError::FATChain(cluster).into())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use alloc::vec;

    use super::{NextCluster, FAT};
    use crate::error::{DataError, Error};

    type Result = core::result::Result<NextCluster, Error<()>>;

    fn fat() -> FAT {
        let last = 0x0FFF_FFF8;
        FAT::from_entries(vec![last, 0xFFFF_FFFF, 0x0FFF_FFFF, 4, 0xF000_0005, last, 0, 9])
    }

    #[test]
    fn test_next() {
        let fat = fat();
        assert_eq!(fat.next::<()>(2.into()), Ok(NextCluster::EndOfChain));
        assert_eq!(fat.next::<()>(3.into()), Ok(NextCluster::Chained(4.into())));
        assert_eq!(fat.next::<()>(4.into()), Ok(NextCluster::Chained(5.into())));
        assert_eq!(fat.next::<()>(5.into()), Ok(NextCluster::EndOfChain));
    }

    #[test]
    fn test_broken_chain() {
        let fat = fat();
        let result: Result = fat.next(6.into());
        assert!(matches!(result, Err(Error::Data(DataError::FATChain(c))) if c == 6.into()));
        let result: Result = fat.next(7.into());
        assert!(matches!(result, Err(Error::Data(DataError::FATChain(c))) if c == 7.into()));
    }

    #[test]
    fn test_out_of_bounds() {
        let fat = fat();
        for cluster in [0u32, 1, 8, 100] {
            let result: Result = fat.next(cluster.into());
            assert!(matches!(result, Err(Error::OutOfBounds(c)) if c == cluster.into()));
        }
    }

    #[test]
    fn test_chain_terminates() {
        let fat = fat();
        for start in 2..fat.len() as u32 {
            let mut cluster = start.into();
            let mut steps = 0;
            while let Ok(NextCluster::Chained(next)) = fat.next::<()>(cluster) {
                assert!(fat.contains(next));
                cluster = next;
                steps += 1;
                assert!(steps < fat.len());
            }
        }
    }
}
