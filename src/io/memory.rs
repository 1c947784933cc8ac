use alloc::vec::Vec;

use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("Read {length} bytes at {offset} beyond image of {size} bytes")]
pub struct OutOfRange {
    pub offset: u64,
    pub length: usize,
    pub size: usize,
}

/// Whole image kept in memory
#[derive(Clone, Debug, Default)]
pub struct MemoryIO {
    bytes: Vec<u8>,
}

impl MemoryIO {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

impl super::IO for MemoryIO {
    type Error = OutOfRange;

    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        let error = OutOfRange { offset, length: buf.len(), size: self.bytes.len() };
        let start = usize::try_from(offset).map_err(|_| error)?;
        let end = start.checked_add(buf.len()).ok_or(error)?;
        let bytes = self.bytes.get(start..end).ok_or(error)?;
        buf.copy_from_slice(bytes);
        Ok(())
    }
}
