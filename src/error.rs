use core::fmt::Debug;

use thiserror::Error;

use crate::types::ClusterID;

/// On-disk structures are inconsistent with FAT32
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("Not FAT32 filesystem, only {clusters} clusters")]
    NotFAT32 { clusters: u32 },
    #[error("Invalid geometry, {0}")]
    Geometry(&'static str),
    #[error("Broken FAT chain at cluster {0}")]
    FATChain(ClusterID),
    #[error("FAT chain loops from cluster {0}")]
    ChainLoop(ClusterID),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("No such file or directory")]
    NotFound,
    #[error("Not a file")]
    NotFile,
    #[error("Bad file descriptor")]
    BadDescriptor,
    #[error("Too many open files")]
    TooManyOpenFiles,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Empty path")]
    EmptyPath,
}

#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum Error<E: Debug> {
    #[error("IO({0:?})")]
    IO(E),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Operation(#[from] OperationError),
    #[error(transparent)]
    Input(#[from] InputError),
    /// Cluster number outside the loaded FAT, a caller contract violation
    #[error("Cluster {0} out of FAT bounds")]
    OutOfBounds(ClusterID),
}

impl<E: Debug> Error<E> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Operation(OperationError::NotFound))
    }
}
