use std::io;

use chrono::NaiveDateTime;
use fat32::error::{Error, OperationError};
use fat32::FAT32;

use crate::partition::Partition;

pub fn list(fat32: &mut FAT32<Partition>, path: &str) -> Result<(), Error<io::Error>> {
    let entries = fat32.list_directory(path)?.ok_or(OperationError::NotFound)?;
    for entry in entries.iter().filter(|entry| !entry.is_long_name()) {
        let attrs = entry.attributes;
        print!("{}", if attrs.directory() > 0 { "d" } else { "-" });
        print!("{}", if attrs.read_only() > 0 { "r" } else { "-" });
        print!("{}", if attrs.system() > 0 { "s" } else { "-" });
        print!("{}", if attrs.hidden() > 0 { "h" } else { "-" });
        print!("{}", if attrs.archive() > 0 { "a" } else { "-" });
        print!(" {:10}", entry.size());
        match NaiveDateTime::try_from(entry.modified) {
            Ok(datetime) => print!(" {}", datetime.format("%Y-%m-%d %H:%M:%S")),
            Err(_) => print!(" {:19}", "-"),
        }
        print!(" {:>8}", entry.first_cluster());
        if entry.is_directory() {
            println!(" {}/", entry.display_name());
        } else {
            println!(" {}", entry.display_name());
        }
    }
    Ok(())
}
