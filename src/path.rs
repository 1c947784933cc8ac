//! Path tokenizing, merging and resolution against directory entry sets

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::cluster::ClusterReader;
use crate::directory;
use crate::error::Error;
use crate::io::IO;
use crate::region::data::entry::DirectoryEntry;
use crate::types::ClusterID;

pub const ROOT: &str = "/";
pub const CURRENT: &str = ".";
pub const PARENT: &str = "..";

/// Split on `/`, a leading `/` becomes the `"/"` token, empty segments are dropped
pub fn tokenize(path: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    if path.starts_with('/') {
        tokens.push(ROOT.to_string());
    }
    let segments = path.split('/').filter(|segment| !segment.is_empty());
    tokens.extend(segments.map(|segment| segment.to_string()));
    tokens
}

/// Apply `path` to absolute `base` tokens without touching disk.
/// `..` never climbs above root.
pub fn merge(base: &[String], path: &str) -> Vec<String> {
    let mut tokens = base.to_vec();
    for token in tokenize(path) {
        if token == ROOT {
            tokens.clear();
            tokens.push(token);
        } else if token == PARENT {
            if tokens.last().map(|last| last != ROOT).unwrap_or(false) {
                tokens.pop();
            }
        } else if token != CURRENT {
            tokens.push(token);
        }
    }
    tokens
}

/// Render absolute tokens as "/a/b"
pub fn join(tokens: &[String]) -> String {
    let mut path = String::new();
    for token in tokens.iter().filter(|token| token.as_str() != ROOT) {
        path.push('/');
        path.push_str(token);
    }
    if path.is_empty() {
        path.push_str(ROOT);
    }
    path
}

/// Walk `path` token by token starting from `entries`, returns entries of the
/// terminal directory, or `None` if any token does not name a directory.
/// An existing directory without live entries yields `Some` of an empty set.
pub fn resolve<E: Debug, T: IO<Error = E> + ?Sized>(
    reader: &mut ClusterReader<'_, T>,
    root: ClusterID,
    entries: &[DirectoryEntry],
    path: &str,
) -> Result<Option<Vec<DirectoryEntry>>, Error<E>> {
    let mut entries = entries.to_vec();
    for token in tokenize(path) {
        let found = match token.as_str() {
            ROOT => None,
            name => directory::find(&entries, name),
        };
        let cluster = match found {
            _ if token == ROOT => root,
            Some(entry) if entry.first_cluster().valid() => {
                if !entry.is_directory() {
                    trace!("{} is not a directory", token);
                    return Ok(None);
                }
                entry.first_cluster()
            }
            // Root directory has no dot entries, and dot-dot of its children points to 0
            _ if token == CURRENT || token == PARENT => root,
            _ => {
                trace!("{} not found", token);
                return Ok(None);
            }
        };
        trace!("Token {} on cluster {}", token, cluster);
        entries = directory::read(reader, cluster)?;
    }
    Ok(Some(entries))
}
