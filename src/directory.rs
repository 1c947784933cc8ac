use alloc::vec::Vec;
use core::fmt::Debug;

use crate::cluster::ClusterReader;
use crate::error::Error;
use crate::io::IO;
use crate::region::data::entry::DirectoryEntry;
use crate::region::data::{RawEntry, RawEntryType, ENTRY_SIZE};
use crate::types::ClusterID;

/// Decode 32-byte records in order, stopping at the end-of-directory mark
/// and skipping deleted entries. Trailing partial record is ignored.
pub fn decode(bytes: &[u8]) -> Vec<DirectoryEntry> {
    let mut entries = Vec::new();
    for chunk in bytes.chunks_exact(ENTRY_SIZE) {
        let mut raw: RawEntry = [0u8; ENTRY_SIZE];
        raw.copy_from_slice(chunk);
        let entry_type = RawEntryType::new(&raw);
        if entry_type.is_end_of_directory() {
            break;
        }
        if !entry_type.in_use() {
            continue;
        }
        entries.push(DirectoryEntry::decode(&raw));
    }
    entries
}

/// Read and decode the whole cluster chain of a directory.
/// A chain cut short after at least one cluster yields the entries read so far.
pub fn read<E: Debug, T: IO<Error = E> + ?Sized>(
    reader: &mut ClusterReader<'_, T>,
    cluster: ClusterID,
) -> Result<Vec<DirectoryEntry>, Error<E>> {
    let mut bytes = Vec::new();
    match reader.read_chain(cluster, &mut bytes) {
        Ok(()) => (),
        Err(e) if !bytes.is_empty() => {
            let length = bytes.len();
            warn!("Directory on cluster {} truncated after {} bytes: {:?}", cluster, length, e);
        }
        Err(e) => return Err(e),
    }
    Ok(decode(&bytes))
}

/// First entry in record order whose name matches exactly
pub fn find<'a>(entries: &'a [DirectoryEntry], name: &str) -> Option<&'a DirectoryEntry> {
    entries.iter().find(|entry| entry.matches(name))
}

#[cfg(test)]
mod test {
    use alloc::vec::Vec;

    use super::{decode, find};
    use crate::region::data::entry::{DirectoryEntry, FileAttributes};
    use crate::region::data::ENTRY_SIZE;

    fn encode(entries: &[(&str, bool, u32, u32)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for &(name, directory, cluster, size) in entries {
            let attributes = FileAttributes::new(directory);
            let entry = DirectoryEntry::new(name, attributes, cluster.into(), size).unwrap();
            let mut raw = [0u8; ENTRY_SIZE];
            entry.encode(&mut raw);
            bytes.extend_from_slice(&raw);
        }
        bytes
    }

    #[test]
    fn test_empty_directory() {
        let mut bytes = [0u8; 512];
        bytes[32..43].copy_from_slice(b"GHOST   TXT");
        assert!(decode(&bytes).is_empty());
    }

    #[test]
    fn test_skip_deleted() {
        let mut bytes = encode(&[("GONE.TXT", false, 3, 10), ("KEEP.TXT", false, 4, 20)]);
        bytes[0] = 0xE5;
        bytes.resize(512, 0);
        let entries = decode(&bytes);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].short_name().as_str(), "KEEPTXT");
        assert_eq!(entries[0].size(), 20);
    }

    #[test]
    fn test_stop_at_end_of_directory() {
        let mut bytes = encode(&[("A", true, 3, 0), ("B", true, 4, 0), ("C", true, 5, 0)]);
        bytes[ENTRY_SIZE] = 0;
        let entries = decode(&bytes);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name().as_str(), "A");
    }

    #[test]
    fn test_find() {
        let bytes = encode(&[
            (".", true, 7, 0),
            ("..", true, 0, 0),
            ("DOCS", true, 9, 0),
            ("A.TXT", false, 10, 5),
            ("DOCS", true, 11, 0),
        ]);
        let entries = decode(&bytes);
        let find_by_name = |name: &str| find(&entries, name).map(|entry| entry.first_cluster());
        assert_eq!(find_by_name("DOCS"), Some(9.into()));
        assert_eq!(find_by_name("ATXT"), Some(10.into()));
        assert_eq!(find_by_name("A.TXT"), Some(10.into()));
        assert_eq!(find_by_name("."), Some(7.into()));
        assert_eq!(find_by_name(".."), Some(0.into()));
        assert_eq!(find_by_name("docs"), None);
        assert_eq!(find_by_name("MISSING"), None);
        assert!(find(&entries, "A.TXT").map(|e| !e.is_directory()).unwrap());
    }
}
