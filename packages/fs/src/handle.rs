//! Per-open read state.

use std::io::Write;

use bytes::Bytes;

use crate::FsError;

/// The body of one open, plus a read cursor.
///
/// Created by [`HttpFs::open`](crate::HttpFs::open). Only reads move the
/// cursor. Releasing consumes the handle, so a released handle cannot be
/// read.
#[derive(Debug)]
pub struct OpenHandle {
    body: Bytes,
    offset: usize,
}

impl OpenHandle {
    pub fn new(body: Bytes) -> Self {
        Self { body, offset: 0 }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Current cursor position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left between the cursor and the end of the body.
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.offset)
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Copy up to `count` bytes from the cursor into `dst`.
    ///
    /// Returns the number of bytes copied; `0` at the end of the body, as
    /// often as it is asked.
    ///
    /// When `dst` fails the cursor stays put, but `dst` may already hold
    /// part of the chunk. A retry copies the whole chunk again.
    pub fn read<W: Write + ?Sized>(&mut self, count: usize, dst: &mut W) -> Result<usize, FsError> {
        let chunk = self.read_at(self.offset, count);
        if chunk.is_empty() {
            return Ok(0);
        }

        dst.write_all(chunk).map_err(FsError::CopyOut)?;

        let n = chunk.len();
        self.offset += n;
        Ok(n)
    }

    /// Up to `count` bytes starting at `offset`, without moving the cursor.
    pub fn read_at(&self, offset: usize, count: usize) -> &[u8] {
        if offset >= self.body.len() {
            return &[];
        }
        let end = offset.saturating_add(count).min(self.body.len());
        &self.body[offset..end]
    }
}
