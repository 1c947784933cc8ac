use std::io;
use std::io::Write;

use fat32::error::Error;
use fat32::FAT32;

use crate::partition::Partition;

pub fn cat(fat32: &mut FAT32<Partition>, path: &str) -> Result<(), Error<io::Error>> {
    let fd = fat32.open(path)?;
    let mut stdout = io::stdout();
    let mut buf = [0u8; 512];
    loop {
        let size = fat32.read(fd, &mut buf)?;
        if size == 0 {
            break;
        }
        stdout.write_all(&buf[..size]).map_err(Error::IO)?;
    }
    fat32.close(fd)
}
