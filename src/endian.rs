// Little endian field accessors for on-disk records.
// Callers guarantee offset + size <= bytes.len()

macro_rules! define {
    ($read:ident, $write:ident, $type:ty) => {
        #[inline]
        pub(crate) fn $read(bytes: &[u8], offset: usize) -> $type {
            const SIZE: usize = core::mem::size_of::<$type>();
            let mut array = [0u8; SIZE];
            array.copy_from_slice(&bytes[offset..offset + SIZE]);
            <$type>::from_le_bytes(array)
        }

        #[inline]
        pub(crate) fn $write(bytes: &mut [u8], offset: usize, value: $type) {
            const SIZE: usize = core::mem::size_of::<$type>();
            bytes[offset..offset + SIZE].copy_from_slice(&value.to_le_bytes());
        }
    };
}

define!(u16_at, put_u16, u16);
define!(u32_at, put_u32, u32);

#[cfg(test)]
mod test {
    #[test]
    fn test_little_endian() {
        let mut bytes = [0u8; 8];
        super::put_u32(&mut bytes, 2, 0x0FFFFFF8);
        assert_eq!(bytes, hex!("00 00 F8 FF FF 0F 00 00"));
        assert_eq!(super::u32_at(&bytes, 2), 0x0FFFFFF8);
        assert_eq!(super::u16_at(&bytes, 4), 0x0FFF);
    }
}
