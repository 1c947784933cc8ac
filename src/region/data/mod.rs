pub(crate) mod entry;

pub(crate) const ENTRY_SIZE: usize = 32;
pub(crate) type RawEntry = [u8; ENTRY_SIZE];

/// Entry slot is free and so are all the following ones
const END_OF_DIRECTORY: u8 = 0x00;
/// Entry slot is free
const DELETED: u8 = 0xE5;
/// Stands for a leading 0xE5 name byte
pub(crate) const KANJI_E5: u8 = 0x05;

#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct RawEntryType(u8);

impl RawEntryType {
    pub(crate) fn new(entry: &RawEntry) -> Self {
        Self(entry[0])
    }

    pub(crate) fn in_use(&self) -> bool {
        !self.is_end_of_directory() && self.0 != DELETED
    }

    pub(crate) fn is_end_of_directory(&self) -> bool {
        self.0 == END_OF_DIRECTORY
    }
}
