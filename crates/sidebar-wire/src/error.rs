//! Error types for packet encoding and decoding.

use thiserror::Error;

/// Errors that can occur when building or parsing a packet.
#[derive(Debug, Error)]
pub enum PacketError {
    /// A string field exceeds its protocol limit.
    #[error("field {field} is {actual} characters, limit is {limit}")]
    FieldTooLong {
        field: &'static str,
        limit: usize,
        actual: usize,
    },

    /// Input ended before the packet was complete.
    #[error("packet truncated while reading {field}")]
    Truncated { field: &'static str },

    /// A VarInt ran past five bytes.
    #[error("VarInt is longer than 5 bytes")]
    VarIntTooLong,

    /// A string field is not valid UTF-8.
    #[error("field {field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    /// An action byte outside the known set.
    #[error("unknown {packet} action {action}")]
    UnknownAction { packet: &'static str, action: i32 },

    /// A fixed string constant has an unexpected value.
    #[error("field {field} must be {expected:?}, got {actual:?}")]
    UnexpectedConstant {
        field: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// Packet id not handled by this crate.
    #[error("unknown packet id 0x{id:02X}")]
    UnknownPacket { id: i32 },

    /// Bytes left over after the last field.
    #[error("{count} trailing bytes after packet 0x{id:02X}")]
    TrailingBytes { id: i32, count: usize },

    /// Frame length outside the protocol range.
    #[error("frame of {size} bytes exceeds limit of {limit}")]
    FrameTooLarge { size: usize, limit: usize },

    /// I/O error from the underlying writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for packet operations.
pub type Result<T> = std::result::Result<T, PacketError>;

impl PacketError {
    pub fn field_too_long(field: &'static str, limit: usize, actual: usize) -> Self {
        Self::FieldTooLong {
            field,
            limit,
            actual,
        }
    }

    pub fn truncated(field: &'static str) -> Self {
        Self::Truncated { field }
    }
}
