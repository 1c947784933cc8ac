use bitfield::bitfield;
#[cfg(feature = "chrono")]
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{RawEntry, KANJI_E5};
use crate::endian::{put_u16, put_u32, u16_at, u32_at};
use crate::types::ClusterID;

pub const NAME_SIZE: usize = 11;
const BASE_SIZE: usize = 8;
/// Every byte of a short name may expand to two UTF-8 bytes, plus the dot
pub const MAX_SHORT_NAME_SIZE: usize = NAME_SIZE * 2 + 1;

pub type ShortName = heapless::String<MAX_SHORT_NAME_SIZE>;

mod offset {
    pub const ATTRIBUTES: usize = 11;
    pub const CREATION_TIME: usize = 14;
    pub const CREATION_DATE: usize = 16;
    pub const ACCESS_DATE: usize = 18;
    pub const FIRST_CLUSTER_HIGH: usize = 20;
    pub const WRITE_TIME: usize = 22;
    pub const WRITE_DATE: usize = 24;
    pub const FIRST_CLUSTER_LOW: usize = 26;
    pub const FILE_SIZE: usize = 28;
}

bitfield! {
    /// FAT date in high 16 bits, FAT time in low 16 bits
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Timestamp(u32);
    year_offset, set_year_offset: 31, 25;
    pub month, set_month: 24, 21;
    pub day, set_day: 20, 16;
    pub hour, set_hour: 15, 11;
    pub minute, set_minute: 10, 5;
    pub double_second, set_double_second: 4, 0;
}

impl Timestamp {
    pub fn new(date: u16, time: u16) -> Self {
        Self((date as u32) << 16 | time as u32)
    }

    pub fn date(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub fn time(&self) -> u16 {
        self.0 as u16
    }

    pub fn year(&self) -> u32 {
        self.year_offset() + 1980
    }

    pub fn second(&self) -> u32 {
        self.double_second() * 2
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<Timestamp> for NaiveDateTime {
    type Error = ();

    fn try_from(timestamp: Timestamp) -> Result<Self, ()> {
        let year = timestamp.year() as i32;
        let date = NaiveDate::from_ymd_opt(year, timestamp.month(), timestamp.day()).ok_or(())?;
        let (hour, minute, second) = (timestamp.hour(), timestamp.minute(), timestamp.second());
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or(())?;
        Ok(NaiveDateTime::new(date, time))
    }
}

bitfield! {
    #[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
    pub struct FileAttributes(u8);
    pub read_only, set_read_only: 0, 0;
    pub hidden, set_hidden: 1, 1;
    pub system, set_system: 2, 2;
    pub volume_id, set_volume_id: 3, 3;
    pub directory, set_directory: 4, 4;
    pub archive, set_archive: 5, 5;
}

impl FileAttributes {
    const LONG_NAME: u8 = 0x0F;

    pub fn new(directory: bool) -> Self {
        let mut attributes = Self::default();
        if directory {
            attributes.set_directory(1);
        } else {
            attributes.set_archive(1);
        }
        attributes
    }

    pub fn is_long_name(&self) -> bool {
        (self.0 & 0x3F) == Self::LONG_NAME
    }
}

impl From<u8> for FileAttributes {
    fn from(byte: u8) -> Self {
        Self(byte)
    }
}

impl From<FileAttributes> for u8 {
    fn from(attributes: FileAttributes) -> u8 {
        attributes.0
    }
}

/// Short (8.3) directory entry
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: [u8; NAME_SIZE],
    pub attributes: FileAttributes,
    pub created: Timestamp,
    /// Date only, time part always zero
    pub accessed: Timestamp,
    pub modified: Timestamp,
    first_cluster: ClusterID,
    size: u32,
}

fn push_bytes(name: &mut ShortName, bytes: &[u8]) {
    let length = bytes.iter().rposition(|&b| b != b' ').map(|i| i + 1).unwrap_or(0);
    for &byte in &bytes[..length] {
        name.push(char::from(byte)).ok();
    }
}

impl DirectoryEntry {
    /// Accepts "NAME.EXT", "NAME", "." or "..", returns None if not a valid 8.3 name
    pub fn new(
        name: &str,
        attributes: FileAttributes,
        first_cluster: ClusterID,
        size: u32,
    ) -> Option<Self> {
        let mut bytes = [b' '; NAME_SIZE];
        let (base, extension) = match name {
            "." | ".." => (name, ""),
            _ => name.rsplit_once('.').unwrap_or((name, "")),
        };
        if base.is_empty() || base.len() > BASE_SIZE || extension.len() > NAME_SIZE - BASE_SIZE {
            return None;
        }
        if !name.is_ascii() || name.contains(' ') {
            return None;
        }
        bytes[..base.len()].copy_from_slice(base.as_bytes());
        bytes[BASE_SIZE..BASE_SIZE + extension.len()].copy_from_slice(extension.as_bytes());
        let timestamp = Timestamp::default();
        Some(Self {
            name: bytes,
            attributes,
            created: timestamp,
            accessed: timestamp,
            modified: timestamp,
            first_cluster,
            size,
        })
    }

    pub fn decode(entry: &RawEntry) -> Self {
        let mut name = [0u8; NAME_SIZE];
        name.copy_from_slice(&entry[..NAME_SIZE]);
        if name[0] == KANJI_E5 {
            name[0] = 0xE5;
        }
        let high = u16_at(entry, offset::FIRST_CLUSTER_HIGH) as u32;
        let low = u16_at(entry, offset::FIRST_CLUSTER_LOW) as u32;
        Self {
            name,
            attributes: FileAttributes(entry[offset::ATTRIBUTES]),
            created: Timestamp::new(
                u16_at(entry, offset::CREATION_DATE),
                u16_at(entry, offset::CREATION_TIME),
            ),
            accessed: Timestamp::new(u16_at(entry, offset::ACCESS_DATE), 0),
            modified: Timestamp::new(
                u16_at(entry, offset::WRITE_DATE),
                u16_at(entry, offset::WRITE_TIME),
            ),
            first_cluster: ClusterID::from(high << 16 | low),
            size: u32_at(entry, offset::FILE_SIZE),
        }
    }

    pub fn encode(&self, entry: &mut RawEntry) {
        entry.fill(0);
        entry[..NAME_SIZE].copy_from_slice(&self.name);
        if entry[0] == 0xE5 {
            entry[0] = KANJI_E5;
        }
        entry[offset::ATTRIBUTES] = self.attributes.0;
        put_u16(entry, offset::CREATION_TIME, self.created.time());
        put_u16(entry, offset::CREATION_DATE, self.created.date());
        put_u16(entry, offset::ACCESS_DATE, self.accessed.date());
        let cluster = u32::from(self.first_cluster);
        put_u16(entry, offset::FIRST_CLUSTER_HIGH, (cluster >> 16) as u16);
        put_u16(entry, offset::WRITE_TIME, self.modified.time());
        put_u16(entry, offset::WRITE_DATE, self.modified.date());
        put_u16(entry, offset::FIRST_CLUSTER_LOW, cluster as u16);
        put_u32(entry, offset::FILE_SIZE, self.size);
    }

    pub fn raw_name(&self) -> &[u8; NAME_SIZE] {
        &self.name
    }

    /// Base name without trailing spaces
    pub fn name(&self) -> ShortName {
        let mut name = ShortName::new();
        push_bytes(&mut name, &self.name[..BASE_SIZE]);
        name
    }

    /// Extension without trailing spaces
    pub fn extension(&self) -> ShortName {
        let mut extension = ShortName::new();
        push_bytes(&mut extension, &self.name[BASE_SIZE..]);
        extension
    }

    /// Name with all spaces removed and no dot, "A       TXT" becomes "ATXT"
    pub fn short_name(&self) -> ShortName {
        let mut name = ShortName::new();
        for &byte in self.name.iter().filter(|&&b| b != b' ') {
            name.push(char::from(byte)).ok();
        }
        name
    }

    /// "A.TXT" form
    pub fn display_name(&self) -> ShortName {
        let mut name = self.name();
        if self.name[BASE_SIZE..].iter().any(|&b| b != b' ') {
            name.push('.').ok();
            push_bytes(&mut name, &self.name[BASE_SIZE..]);
        }
        name
    }

    /// Case sensitive, either the short name or the display name
    pub fn matches(&self, name: &str) -> bool {
        self.short_name().as_str() == name || self.display_name().as_str() == name
    }

    pub fn first_cluster(&self) -> ClusterID {
        self.first_cluster
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_directory(&self) -> bool {
        self.attributes.directory() > 0 && !self.attributes.is_long_name()
    }

    pub fn is_long_name(&self) -> bool {
        self.attributes.is_long_name()
    }

    pub fn is_volume_label(&self) -> bool {
        self.attributes.volume_id() > 0 && !self.attributes.is_long_name()
    }
}
