use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crc::{crc32, Hasher32};
use sha1::{Digest, Sha1};

const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomDigest {
    pub size: u64,
    pub crc32: u32,
    pub sha1: String,
}

impl RomDigest {
    pub fn from_reader<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut crc = crc32::Digest::new(crc32::IEEE);
        let mut hasher = Sha1::new();
        let mut size = 0;

        let mut buf = vec![0; CHUNK_SIZE];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            crc.write(&buf[..n]);
            hasher.update(&buf[..n]);
            size += n as u64;
        }

        Ok(Self {
            size,
            crc32: crc.sum32(),
            sha1: format!("{:x}", hasher.finalize()),
        })
    }

    pub fn from_path(path: &Path) -> io::Result<Self> {
        let mut f = File::open(path)?;
        Self::from_reader(&mut f)
    }
}
