pub mod memory;
#[cfg(feature = "std")]
pub mod std;

use core::fmt::Debug;

use crate::error::Error;

/// Byte addressable block source the volume is read from
pub trait IO {
    type Error: Debug;

    /// Fill `buf` with bytes starting from byte `offset`,
    /// fails on seek error or short read
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: IO + ?Sized> IO for &mut T {
    type Error = T::Error;

    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(offset, buf)
    }
}

pub(crate) struct Wrapper<'a, T: ?Sized>(&'a mut T);

impl<'a, E: Debug, T: IO<Error = E> + ?Sized> Wrapper<'a, T> {
    pub fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Error<E>> {
        self.0.read(offset, buf).map_err(|e| Error::IO(e))
    }
}

pub(crate) trait Wrap: IO {
    fn wrap(&mut self) -> Wrapper<'_, Self> {
        Wrapper(self)
    }
}

impl<T: IO + ?Sized> Wrap for T {}
