//! 顺序字节读写器
//!
//! 资源编解码层只按字节顺序读写，不暴露 seek。

use crate::error::{CodecError, Result};
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io::{ErrorKind, Read, Write};

/// 顺序读取器
pub struct ByteReader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// 读取一个无符号字节，流提前结束时返回 `TruncatedInput`
    pub fn get_u8(&mut self) -> Result<u8> {
        match self.inner.read_u8() {
            Ok(value) => {
                self.offset += 1;
                Ok(value)
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(CodecError::TruncatedInput {
                offset: self.offset,
                wanted: "u8",
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// 已消耗的字节数
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// 顺序写入器
pub struct ByteWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> ByteWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// 写入一个无符号字节
    pub fn put_u8(&mut self, value: u8) -> Result<()> {
        self.inner.write_u8(value)?;
        self.written += 1;
        Ok(())
    }

    /// 已写入的字节数
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_tracks_offset() {
        let mut reader = ByteReader::new(Cursor::new(vec![1u8, 2, 3]));
        assert_eq!(reader.get_u8().unwrap(), 1);
        assert_eq!(reader.get_u8().unwrap(), 2);
        assert_eq!(reader.offset(), 2);
    }

    #[test]
    fn test_read_past_end_is_truncated() {
        let mut reader = ByteReader::new(Cursor::new(vec![7u8]));
        reader.get_u8().unwrap();
        match reader.get_u8() {
            Err(CodecError::TruncatedInput { offset, wanted }) => {
                assert_eq!(offset, 1);
                assert_eq!(wanted, "u8");
            }
            other => panic!("期望 TruncatedInput, 实际为 {other:?}"),
        }
    }

    #[test]
    fn test_writer_counts_bytes() {
        let mut writer = ByteWriter::new(Vec::new());
        writer.put_u8(0xAB).unwrap();
        writer.put_u8(0x01).unwrap();
        assert_eq!(writer.written(), 2);
        assert_eq!(writer.into_inner(), vec![0xAB, 0x01]);
    }
}
