//! OTS wire primitives
//!
//! Layout rules shared by every proof structure:
//! - varuint: little-endian base-128, high bit (0x80) = continuation
//! - varbytes: varuint length followed by raw bytes
//! - bool: one byte, 0xff = true

use crate::error::DeserializationError;

/// Write side of the OTS binary format
#[derive(Debug, Default, Clone)]
pub struct Serializer {
    buf: Vec<u8>,
}

impl Serializer {
    /// Create an empty serializer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a single byte
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Write raw bytes without a length prefix
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write an unsigned varint
    pub fn write_varuint(&mut self, mut value: u64) {
        if value == 0 {
            self.buf.push(0x00);
            return;
        }

        while value != 0 {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            self.buf.push(byte);
        }
    }

    /// Write a varuint length prefix followed by the bytes
    pub fn write_varbytes(&mut self, bytes: &[u8]) {
        self.write_varuint(bytes.len() as u64);
        self.write_bytes(bytes);
    }

    /// Write a boolean as 0xff / 0x00
    pub fn write_bool(&mut self, value: bool) {
        self.write_byte(if value { 0xff } else { 0x00 });
    }

    /// Bytes written so far
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the serializer and return the output buffer
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Read side of the OTS binary format
///
/// Every read is bounds-checked; a short buffer yields
/// [`DeserializationError::UnexpectedEof`] rather than a partial value.
#[derive(Debug, Clone)]
pub struct Deserializer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Deserializer<'a> {
    /// Create a deserializer over `data`
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read offset
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Read a single byte
    pub fn read_byte(&mut self) -> Result<u8, DeserializationError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(DeserializationError::UnexpectedEof {
                needed: 1,
                remaining: 0,
            })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read exactly `len` bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DeserializationError> {
        if self.remaining() < len {
            return Err(DeserializationError::UnexpectedEof {
                needed: len,
                remaining: self.remaining(),
            });
        }

        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Read an unsigned varint
    pub fn read_varuint(&mut self) -> Result<u64, DeserializationError> {
        let mut value: u64 = 0;
        let mut shift = 0u32;

        loop {
            let byte = self.read_byte()?;
            let bits = u64::from(byte & 0x7f);

            if shift > 63 || (shift == 63 && bits > 1) {
                return Err(DeserializationError::VaruintOverflow);
            }

            value |= bits << shift;

            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Read a length-prefixed byte string bounded by `min..=max`
    pub fn read_varbytes(&mut self, max: usize, min: usize) -> Result<&'a [u8], DeserializationError> {
        let len = self.read_varuint()?;

        if len > max as u64 {
            return Err(DeserializationError::VarbytesTooLong { len, max });
        }
        let len = len as usize;
        if len < min {
            return Err(DeserializationError::VarbytesTooShort { len, min });
        }

        self.read_bytes(len)
    }

    /// Read a boolean
    ///
    /// 0xff is true; every other byte, not only 0x00, reads as false.
    pub fn read_bool(&mut self) -> Result<bool, DeserializationError> {
        Ok(self.read_byte()? == 0xff)
    }

    /// Consume `expected` and fail if the stream does not start with it
    pub fn assert_magic(&mut self, expected: &[u8]) -> Result<(), DeserializationError> {
        let actual = self
            .read_bytes(expected.len())
            .map_err(|_| DeserializationError::BadMagic)?;

        if actual != expected {
            return Err(DeserializationError::BadMagic);
        }
        Ok(())
    }

    /// Fail if any bytes are left unread
    pub fn assert_eof(&self) -> Result<(), DeserializationError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(DeserializationError::TrailingBytes(n)),
        }
    }
}
