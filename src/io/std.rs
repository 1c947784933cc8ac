use std::fs;
use std::io::prelude::*;
use std::io::SeekFrom;
use std::path::Path;

/// Block source backed by an image file or a block device, opened read-only
#[derive(Debug)]
pub struct FileIO {
    file: fs::File,
}

impl FileIO {
    pub fn open<P: AsRef<Path>>(filepath: P) -> std::io::Result<Self> {
        let file = fs::File::options().read(true).open(filepath)?;
        Ok(Self { file })
    }
}

impl super::IO for FileIO {
    type Error = std::io::Error;

    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(buf)
    }
}

impl From<fs::File> for FileIO {
    fn from(file: fs::File) -> Self {
        Self { file }
    }
}
