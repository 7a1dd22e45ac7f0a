//! Fixed-capacity receive buffer.

use std::io::{self, Read};

use bytes::Bytes;

use crate::Error;

/// Receive buffer with a hard capacity.
///
/// The full capacity is allocated up front, fallibly. Reads only ever land
/// in the unfilled tail, and only the filled prefix is ever handed out.
#[derive(Debug)]
pub struct ResponseBuffer {
    data: Vec<u8>,
    filled: usize,
}

impl ResponseBuffer {
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| Error::AllocationFailed { size: capacity })?;
        data.resize(capacity, 0);

        Ok(Self { data, filled: 0 })
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.filled
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// The bytes received so far.
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.filled]
    }

    /// Issue one `read` into the unfilled tail.
    ///
    /// Returns the number of bytes added; `0` means end of stream, or a
    /// full buffer.
    pub fn fill_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<usize> {
        if self.is_full() {
            return Ok(0);
        }

        let tail = &mut self.data[self.filled..];
        let n = reader.read(tail)?.min(tail.len());
        self.filled += n;
        Ok(n)
    }

    /// Cut the buffer down to the filled bytes.
    pub fn into_bytes(mut self) -> Bytes {
        self.data.truncate(self.filled);
        Bytes::from(self.data)
    }
}
