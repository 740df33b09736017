//! Little-endian argument encoding and decoding.
//!
//! [`WireWriter`] appends arguments to a growable buffer; [`WireReader`]
//! walks a received payload with a running cursor. Both follow the same
//! layout rules:
//!
//! - scalars are 4 bytes, little endian
//! - string lengths include the terminating NUL; the decoded text excludes it
//! - strings and arrays are zero-padded to the next 4-byte boundary, and no
//!   pad is written (or consumed) when the unpadded length is already a
//!   multiple of 4
//!
//! Reads are bounds-checked up front: a failed read returns
//! [`ProtocolError::Truncated`] without advancing the cursor.

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    errors::{ProtocolError, Result},
    Fixed, ObjectId,
};

/// Round a byte length up to the next 4-byte boundary.
const fn padded(len: usize) -> usize {
    (len + 3) & !3
}

/// Appends protocol arguments to a payload buffer.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    /// Create an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self { buf: BytesMut::new() }
    }

    /// Bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append an unsigned 32-bit value.
    pub fn put_uint(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    /// Append a signed 32-bit value.
    pub fn put_int(&mut self, value: i32) {
        self.buf.put_i32_le(value);
    }

    /// Append a 24.8 fixed-point value.
    pub fn put_fixed(&mut self, value: Fixed) {
        self.buf.put_i32_le(value.raw());
    }

    /// Append an object id.
    pub fn put_object(&mut self, id: ObjectId) {
        self.buf.put_u32_le(id.0);
    }

    /// Append a nullable object reference; `None` encodes as 0.
    pub fn put_nullable_object(&mut self, id: Option<ObjectId>) {
        self.buf.put_u32_le(id.map_or(0, |id| id.0));
    }

    /// Append a length-prefixed, NUL-terminated, padded string.
    pub fn put_string(&mut self, text: &str) {
        let total = text.len() + 1; // length includes the NUL
        self.put_uint(total as u32);
        self.buf.put_slice(text.as_bytes());
        self.buf.put_u8(0);
        self.pad(total);
    }

    /// Append a nullable string; `None` encodes as length 0 with no body.
    pub fn put_nullable_string(&mut self, text: Option<&str>) {
        match text {
            Some(text) => self.put_string(text),
            None => self.put_uint(0),
        }
    }

    /// Append a length-prefixed, padded byte array.
    pub fn put_array(&mut self, data: &[u8]) {
        self.put_uint(data.len() as u32);
        self.buf.put_slice(data);
        self.pad(data.len());
    }

    fn pad(&mut self, unpadded: usize) {
        self.buf.put_bytes(0, padded(unpadded) - unpadded);
    }

    /// Freeze the accumulated payload.
    #[must_use]
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Walks a received payload, decoding arguments at a running cursor.
#[derive(Debug)]
pub struct WireReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    /// Start reading at the beginning of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current cursor position.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left after the cursor.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Whether the whole payload has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        if self.remaining() < needed {
            return Err(ProtocolError::Truncated {
                offset: self.offset,
                needed,
                available: self.remaining(),
            });
        }
        let chunk = &self.data[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(chunk)
    }

    /// Read an unsigned 32-bit value.
    pub fn get_uint(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a signed 32-bit value.
    pub fn get_int(&mut self) -> Result<i32> {
        self.get_uint().map(|v| v as i32)
    }

    /// Read a 24.8 fixed-point value.
    pub fn get_fixed(&mut self) -> Result<Fixed> {
        self.get_int().map(Fixed::from_raw)
    }

    /// Read an object id.
    pub fn get_object(&mut self) -> Result<ObjectId> {
        self.get_uint().map(ObjectId)
    }

    /// Read a nullable object reference; 0 decodes to `None`.
    pub fn get_nullable_object(&mut self) -> Result<Option<ObjectId>> {
        let raw = self.get_uint()?;
        Ok((raw != 0).then_some(ObjectId(raw)))
    }

    /// Read a non-null string.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::NullString`] when the length prefix is 0,
    /// [`ProtocolError::InvalidString`] on invalid UTF-8,
    /// [`ProtocolError::Truncated`] when the payload ends early.
    pub fn get_string(&mut self) -> Result<String> {
        self.string_body()?.ok_or(ProtocolError::NullString)
    }

    /// Read a nullable string; a length prefix of 0 decodes to `None`.
    pub fn get_nullable_string(&mut self) -> Result<Option<String>> {
        self.string_body()
    }

    fn string_body(&mut self) -> Result<Option<String>> {
        let total = self.get_uint()? as usize;
        if total == 0 {
            return Ok(None);
        }
        // The cursor advances over the padding, the text excludes the NUL.
        let chunk = self.take(padded(total))?;
        let text = std::str::from_utf8(&chunk[..total - 1])
            .map_err(|_| ProtocolError::InvalidString)?;
        Ok(Some(text.to_owned()))
    }

    /// Read a byte array.
    pub fn get_array(&mut self) -> Result<Vec<u8>> {
        let len = self.get_uint()? as usize;
        let chunk = self.take(padded(len))?;
        Ok(chunk[..len].to_vec())
    }
}
