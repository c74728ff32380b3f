use std::path::Path;

use crate::Error;

/// The buffer ended before a fixed-size field could be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("needed {needed} bytes at offset {offset}, only {available} remain")]
pub struct Truncated {
    pub offset: usize,
    pub needed: usize,
    pub available: usize,
}

/// Sequential little-endian reader over a fully buffered file.
pub(crate) struct ByteCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// fail early if `needed` bytes are not available, without consuming anything
    pub(crate) fn ensure(&self, needed: usize) -> Result<(), Truncated> {
        if needed > self.remaining() {
            Err(Truncated {
                offset: self.offset,
                needed,
                available: self.remaining(),
            })
        } else {
            Ok(())
        }
    }

    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8], Truncated> {
        self.ensure(len)?;
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], Truncated> {
        let mut arr = [0; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, Truncated> {
        Ok(self.array::<1>()?[0])
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, Truncated> {
        self.array().map(u16::from_le_bytes)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, Truncated> {
        self.array().map(u32::from_le_bytes)
    }

    pub(crate) fn read_u64(&mut self) -> Result<u64, Truncated> {
        self.array().map(u64::from_le_bytes)
    }
}

/// convert a packed little-endian `f32` buffer, ignoring a trailing partial value
pub(crate) fn bytes_to_f32s(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Read a whole artifact into memory. A missing file is reported as
/// [`Error::MissingFile`] rather than a generic io error.
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::MissingFile(path.to_path_buf())
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
