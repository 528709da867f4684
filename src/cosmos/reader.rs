//! Protobuf wire-format reader
//!
//! Covers the subset needed to walk Cosmos SDK `TxBody` and `AuthInfo`
//! bytes: varints, length-delimited fields, fixed32/64 and legacy groups.

use crate::errors::{DecodeError, DecodeResult};

/// Protobuf wire types
pub const WIRE_VARINT: u32 = 0;
pub const WIRE_FIXED64: u32 = 1;
pub const WIRE_BYTES: u32 = 2;
pub const WIRE_START_GROUP: u32 = 3;
pub const WIRE_END_GROUP: u32 = 4;
pub const WIRE_FIXED32: u32 = 5;

/// Deepest nesting of groups or messages accepted before decoding fails
pub const MAX_NESTING_DEPTH: usize = 100;

const MAX_VARINT_LEN: usize = 10;

/// Cursor over a protobuf encoded buffer.
///
/// A reader created with [`BinaryReader::take`] only sees the declared
/// length of a nested message, while error offsets stay relative to the
/// outermost buffer.
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    buf: &'a [u8],
    pos: usize,
    origin: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        BinaryReader {
            buf,
            pos: 0,
            origin: 0,
        }
    }

    /// Absolute offset of the cursor
    pub fn offset(&self) -> usize {
        self.origin + self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn ensure_available(&self, needed: usize) -> DecodeResult<()> {
        if needed > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.offset(),
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    fn next_byte(&mut self) -> DecodeResult<u8> {
        self.ensure_available(1)?;
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(b)
    }

    /// Varint of at most 5 bytes
    pub fn uint32(&mut self) -> DecodeResult<u32> {
        let start = self.offset();
        let mut value: u32 = 0;
        for shift in (0..32).step_by(7) {
            let b = self.next_byte()?;
            value |= ((b & 0x7f) as u32) << shift;
            if b & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodeError::MalformedVarint { offset: start })
    }

    /// Negative values are sign extended to ten bytes on the wire, so the
    /// full 64-bit varint is read and truncated.
    pub fn int32(&mut self) -> DecodeResult<i32> {
        let (lo, _) = self.varint64()?;
        Ok(lo as i32)
    }

    pub fn int64(&mut self) -> DecodeResult<i64> {
        Ok(self.uint64()? as i64)
    }

    pub fn uint64(&mut self) -> DecodeResult<u64> {
        let (lo, hi) = self.varint64()?;
        Ok(lo as u64 | (hi as u64) << 32)
    }

    pub fn bool(&mut self) -> DecodeResult<bool> {
        let (lo, hi) = self.varint64()?;
        Ok(lo != 0 || hi != 0)
    }

    /// Length-prefixed raw bytes
    pub fn bytes(&mut self) -> DecodeResult<&'a [u8]> {
        let len = self.uint32()? as usize;
        self.ensure_available(len)?;
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..self.pos])
    }

    pub fn string(&mut self) -> DecodeResult<String> {
        let offset = self.offset();
        let raw = self.bytes()?;
        String::from_utf8(raw.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    /// Split off a reader over the next `len` bytes and advance past them
    pub fn take(&mut self, len: usize) -> DecodeResult<BinaryReader<'a>> {
        self.ensure_available(len)?;
        let inner = BinaryReader {
            buf: &self.buf[self.pos..self.pos + len],
            pos: 0,
            origin: self.offset(),
        };
        self.pos += len;
        Ok(inner)
    }

    /// Split off the reader for a length-delimited nested message
    pub fn message(&mut self) -> DecodeResult<BinaryReader<'a>> {
        let len = self.uint32()? as usize;
        self.take(len)
    }

    pub fn skip(&mut self, len: usize) -> DecodeResult<()> {
        self.ensure_available(len)?;
        self.pos += len;
        Ok(())
    }

    /// Consume a varint without decoding it
    pub fn skip_varint(&mut self) -> DecodeResult<()> {
        let start = self.offset();
        for _ in 0..MAX_VARINT_LEN {
            if self.next_byte()? & 0x80 == 0 {
                return Ok(());
            }
        }
        Err(DecodeError::MalformedVarint { offset: start })
    }

    /// Skip a field body of the given wire type. The closing tag of a group
    /// is not checked against its field number, use [`Self::skip_field`]
    /// when the opening tag is known.
    pub fn skip_type(&mut self, wire_type: u32) -> DecodeResult<()> {
        match wire_type {
            WIRE_START_GROUP => self.skip_group(None),
            other => self.skip_scalar(other),
        }
    }

    /// Skip the body of the field whose `tag` was just read
    pub fn skip_field(&mut self, tag: u32) -> DecodeResult<()> {
        match tag & 7 {
            WIRE_START_GROUP => self.skip_group(Some(tag >> 3)),
            other => self.skip_scalar(other),
        }
    }

    fn skip_scalar(&mut self, wire_type: u32) -> DecodeResult<()> {
        match wire_type {
            WIRE_VARINT => self.skip_varint(),
            WIRE_FIXED64 => self.skip(8),
            WIRE_BYTES => {
                let len = self.uint32()? as usize;
                self.skip(len)
            }
            WIRE_FIXED32 => self.skip(4),
            other => Err(DecodeError::UnsupportedWireType {
                wire_type: other,
                offset: self.offset(),
            }),
        }
    }

    /// Groups are walked with an explicit stack of open field numbers,
    /// innermost last.
    fn skip_group(&mut self, field: Option<u32>) -> DecodeResult<()> {
        let mut open = vec![field];
        while let Some(&expected) = open.last() {
            let offset = self.offset();
            let tag = self.uint32()?;
            match tag & 7 {
                WIRE_START_GROUP => {
                    if open.len() >= MAX_NESTING_DEPTH {
                        return Err(DecodeError::RecursionLimit { offset });
                    }
                    open.push(Some(tag >> 3));
                }
                WIRE_END_GROUP => {
                    let found = tag >> 3;
                    if let Some(expected) = expected.filter(|expected| *expected != found) {
                        return Err(DecodeError::UnmatchedEndGroup {
                            offset,
                            expected,
                            found,
                        });
                    }
                    open.pop();
                }
                other => self.skip_scalar(other)?,
            }
        }
        Ok(())
    }

    /// 64-bit varint accumulated as two 32-bit halves.
    ///
    /// The first four bytes fill `lo`; the fifth contributes its low nibble
    /// to `lo` and bits 4..7 to `hi`; bytes six to ten fill the rest of `hi`.
    fn varint64(&mut self) -> DecodeResult<(u32, u32)> {
        let start = self.offset();
        let mut lo: u32 = 0;
        let mut hi: u32 = 0;

        for shift in (0..28).step_by(7) {
            let b = self.next_byte()?;
            lo |= ((b & 0x7f) as u32) << shift;
            if b & 0x80 == 0 {
                return Ok((lo, hi));
            }
        }

        let b = self.next_byte()?;
        lo |= ((b & 0x0f) as u32) << 28;
        hi = ((b & 0x70) as u32) >> 4;
        if b & 0x80 == 0 {
            return Ok((lo, hi));
        }

        for shift in (3..32).step_by(7) {
            let b = self.next_byte()?;
            hi |= ((b & 0x7f) as u32) << shift;
            if b & 0x80 == 0 {
                return Ok((lo, hi));
            }
        }

        Err(DecodeError::MalformedVarint { offset: start })
    }
}
