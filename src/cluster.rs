use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::{DataError, Error};
use crate::fat::{NextCluster, FAT};
use crate::fs::Geometry;
use crate::io::{Wrap, IO};
use crate::types::ClusterID;

/// Walks a cluster chain, yields `start` first.
/// A broken link is reported after the cluster holding it has been yielded,
/// a cluster seen twice ends the walk with `ChainLoop`.
pub struct Clusters<'a, E: Debug> {
    fat: &'a FAT,
    start: ClusterID,
    next: Option<ClusterID>,
    visited: BTreeSet<ClusterID>,
    broken: Option<Error<E>>,
}

impl<'a, E: Debug> Clusters<'a, E> {
    pub fn new(fat: &'a FAT, start: ClusterID) -> Self {
        Self { fat, start, next: Some(start), visited: BTreeSet::new(), broken: None }
    }
}

impl<'a, E: Debug> Iterator for Clusters<'a, E> {
    type Item = Result<ClusterID, Error<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.broken.take() {
            return Some(Err(error));
        }
        let cluster = self.next.take()?;
        if !self.fat.contains(cluster) {
            return Some(Err(Error::OutOfBounds(cluster)));
        }
        if !self.visited.insert(cluster) {
            warn!("Cluster {} visited twice in chain from {}", cluster, self.start);
            return Some(Err(DataError::ChainLoop(self.start).into()));
        }
        match self.fat.next(cluster) {
            Ok(NextCluster::Chained(next)) => self.next = Some(next),
            Ok(NextCluster::EndOfChain) => (),
            Err(e) => self.broken = Some(e),
        }
        Some(Ok(cluster))
    }
}

/// Translates cluster numbers into block source reads
pub struct ClusterReader<'a, T: ?Sized> {
    io: &'a mut T,
    geometry: &'a Geometry,
    fat: &'a FAT,
}

impl<'a, E: Debug, T: IO<Error = E> + ?Sized> ClusterReader<'a, T> {
    pub fn new(io: &'a mut T, geometry: &'a Geometry, fat: &'a FAT) -> Self {
        Self { io, geometry, fat }
    }

    pub fn clusters(&self, start: ClusterID) -> Clusters<'a, E> {
        Clusters::new(self.fat, start)
    }

    /// Read `buf.len()` bytes from `offset` within a cluster,
    /// caller guarantees offset + buf.len() <= cluster size
    pub fn read_at(
        &mut self,
        cluster: ClusterID,
        offset: u32,
        buf: &mut [u8],
    ) -> Result<(), Error<E>> {
        if !self.fat.contains(cluster) {
            return Err(Error::OutOfBounds(cluster));
        }
        let sector_id = self.geometry.cluster_sector(cluster);
        let sector_size = self.geometry.bytes_per_sector;
        trace!("Read cluster {} at sector {} offset {}", cluster, sector_id, offset);
        let position = u64::from(sector_id) * sector_size as u64 + offset as u64;
        self.io.wrap().read(position, buf)
    }

    pub fn read_cluster(&mut self, cluster: ClusterID) -> Result<Vec<u8>, Error<E>> {
        let mut bytes = vec![0u8; self.geometry.cluster_size() as usize];
        self.read_at(cluster, 0, &mut bytes)?;
        Ok(bytes)
    }

    /// Append every cluster of the chain to `bytes` in chain order.
    /// On failure `bytes` keeps all clusters read so far.
    pub fn read_chain(&mut self, start: ClusterID, bytes: &mut Vec<u8>) -> Result<(), Error<E>> {
        let cluster_size = self.geometry.cluster_size() as usize;
        for cluster in self.clusters(start) {
            let cluster = cluster?;
            let length = bytes.len();
            bytes.resize(length + cluster_size, 0);
            if let Err(e) = self.read_at(cluster, 0, &mut bytes[length..]) {
                bytes.truncate(length);
                return Err(e);
            }
        }
        Ok(())
    }
}
