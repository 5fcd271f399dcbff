//! Field-level primitives shared by every packet.
//!
//! | Primitive | Encoding                                                       |
//! |-----------|----------------------------------------------------------------|
//! | byte      | 1 raw byte                                                     |
//! | VarInt    | 7 bits per byte, least significant group first, 0x80 = more    |
//! | string    | VarInt byte length, then UTF-8 bytes                           |

use std::io::Write;

use crate::error::{PacketError, Result};

/// Longest VarInt encoding of an `i32`.
pub const VARINT_MAX_BYTES: usize = 5;

/// Writes packet fields in order.
pub struct PacketWriter<W: Write> {
    writer: W,
}

impl<W: Write> PacketWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.writer.write_all(&[value])?;
        Ok(())
    }

    pub fn write_varint(&mut self, value: i32) -> Result<()> {
        let mut buf = [0u8; VARINT_MAX_BYTES];
        let len = encode_varint(value, &mut buf);
        self.writer.write_all(&buf[..len])?;
        Ok(())
    }

    /// Write a string, rejecting values longer than `limit` characters.
    pub fn write_string(&mut self, field: &'static str, value: &str, limit: usize) -> Result<()> {
        let chars = value.chars().count();
        if chars > limit {
            return Err(PacketError::field_too_long(field, limit, chars));
        }
        let len = i32::try_from(value.len())
            .map_err(|_| PacketError::field_too_long(field, limit, chars))?;
        self.write_varint(len)?;
        self.writer.write_all(value.as_bytes())?;
        Ok(())
    }
}

/// Encode a VarInt into `buf`, returning the number of bytes used.
pub fn encode_varint(value: i32, buf: &mut [u8; VARINT_MAX_BYTES]) -> usize {
    // Negative values use the two's complement bit pattern (always 5 bytes).
    let mut rest = value as u32;
    let mut len = 0;
    loop {
        let byte = (rest & 0x7f) as u8;
        rest >>= 7;
        if rest == 0 {
            buf[len] = byte;
            return len + 1;
        }
        buf[len] = byte | 0x80;
        len += 1;
    }
}

/// Number of bytes the VarInt encoding of `value` takes.
pub fn varint_len(value: i32) -> usize {
    let mut buf = [0u8; VARINT_MAX_BYTES];
    encode_varint(value, &mut buf)
}

/// Reads packet fields in order from a byte slice.
#[derive(Debug)]
pub struct PacketReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PacketReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_byte(&mut self, field: &'static str) -> Result<u8> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(PacketError::truncated(field))?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_varint(&mut self, field: &'static str) -> Result<i32> {
        let mut value: u32 = 0;
        for shift in 0..VARINT_MAX_BYTES {
            let byte = self.read_byte(field)?;
            value |= u32::from(byte & 0x7f) << (7 * shift);
            if byte & 0x80 == 0 {
                return Ok(value as i32);
            }
        }
        Err(PacketError::VarIntTooLong)
    }

    /// Read a string, rejecting values longer than `limit` characters.
    pub fn read_string(&mut self, field: &'static str, limit: usize) -> Result<String> {
        let len = self.read_varint(field)?;
        let len = usize::try_from(len).map_err(|_| PacketError::truncated(field))?;
        // Four bytes per character is the widest UTF-8 encoding.
        if len > limit * 4 {
            return Err(PacketError::field_too_long(field, limit, len));
        }
        if self.remaining() < len {
            return Err(PacketError::truncated(field));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        let value = std::str::from_utf8(bytes)
            .map_err(|_| PacketError::InvalidUtf8 { field })?
            .to_string();
        let chars = value.chars().count();
        if chars > limit {
            return Err(PacketError::field_too_long(field, limit, chars));
        }
        Ok(value)
    }

    /// Read a string that must equal a protocol constant.
    pub fn expect_string(&mut self, field: &'static str, expected: &'static str) -> Result<()> {
        let actual = self.read_string(field, expected.chars().count())?;
        if actual != expected {
            return Err(PacketError::UnexpectedConstant {
                field,
                expected,
                actual,
            });
        }
        Ok(())
    }
}
