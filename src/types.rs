use derive_more::{Display, From, Into};

#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct SectorID(u64);

impl SectorID {
    pub(crate) const BOOT: Self = Self(0);
}

impl<I: Into<u64>> core::ops::Add<I> for SectorID {
    type Output = Self;

    fn add(self, rhs: I) -> Self {
        Self(self.0 + rhs.into())
    }
}

#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct ClusterID(u32);

impl ClusterID {
    pub const FIRST: Self = Self(2);

    pub fn valid(&self) -> bool {
        self.0 >= Self::FIRST.0
    }

    /// Index into the data region, i.e. cluster number minus 2
    pub(crate) fn offset(self) -> u32 {
        self.0 - Self::FIRST.0
    }
}

/// Opaque handle returned by `FAT32::open`
#[derive(Copy, Clone, Debug, Display, From, Into, Eq, Hash, PartialEq)]
pub struct Descriptor(usize);
