use std::io::{self, Read, Seek, SeekFrom, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

/// Positioned access to small byte windows of a ROM image.
pub trait WindowExt: Read + Seek {
    fn read_window(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        self.read_exact(buf)
    }

    fn read_u8_at(&mut self, offset: u64) -> io::Result<u8> {
        self.seek(SeekFrom::Start(offset))?;
        self.read_u8()
    }
}

impl<T> WindowExt for T where T: Read + Seek {}

pub trait WindowWriteExt: Write + Seek {
    fn write_window(&mut self, offset: u64, data: &[u8]) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        self.write_all(data)?;
        self.flush()
    }

    fn write_u8_at(&mut self, offset: u64, value: u8) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        self.write_u8(value)?;
        self.flush()
    }
}

impl<T> WindowWriteExt for T where T: Write + Seek {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_window() {
        let mut rom = Cursor::new(vec![0u8, 1, 2, 3, 4, 5]);
        let mut buf = [0u8; 2];
        rom.read_window(3, &mut buf).unwrap();
        assert_eq!(buf, [3, 4]);
        assert_eq!(rom.read_u8_at(5).unwrap(), 5);
    }

    #[test]
    fn test_read_window_past_end() {
        let mut rom = Cursor::new(vec![0u8; 4]);
        let mut buf = [0u8; 2];
        let err = rom.read_window(3, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_write_window_keeps_length() {
        let mut rom = Cursor::new(vec![0u8; 6]);
        rom.write_window(2, &[0x25, 0x63]).unwrap();
        rom.write_u8_at(5, 0xFF).unwrap();
        assert_eq!(rom.into_inner(), vec![0, 0, 0x25, 0x63, 0, 0xFF]);
    }
}
