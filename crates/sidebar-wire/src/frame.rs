//! Length-prefixed framing for sidebar packets.
//!
//! A frame is `VarInt(len) ++ VarInt(id) ++ payload`, where `len` covers the
//! id and the payload. Frames are neither compressed nor batched.

use crate::buffer::{PacketReader, VARINT_MAX_BYTES, encode_varint, varint_len};
use crate::error::{PacketError, Result};
use crate::packets::Packet;

/// Largest body a three-byte length prefix can describe.
pub const MAX_FRAME_SIZE: usize = 2_097_151;

/// Encode `packet` as one complete frame.
pub fn encode_frame(packet: &Packet) -> Result<Vec<u8>> {
    let payload = packet.encode()?;
    let id = packet.id();
    let body_len = varint_len(id) + payload.len();
    if body_len > MAX_FRAME_SIZE {
        return Err(PacketError::FrameTooLarge {
            size: body_len,
            limit: MAX_FRAME_SIZE,
        });
    }

    let mut buf = [0u8; VARINT_MAX_BYTES];
    let mut frame = Vec::with_capacity(VARINT_MAX_BYTES + body_len);
    // Bounded by MAX_FRAME_SIZE above.
    let len = encode_varint(body_len as i32, &mut buf);
    frame.extend_from_slice(&buf[..len]);
    let len = encode_varint(id, &mut buf);
    frame.extend_from_slice(&buf[..len]);
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Decode one frame from the front of `buf`.
///
/// Returns `Ok(Some((consumed, packet)))` once a complete frame is
/// available and `Ok(None)` while the buffer is incomplete.
pub fn decode_frame(buf: &[u8]) -> Result<Option<(usize, Packet)>> {
    let Some((prefix_len, body_len)) = peek_length(buf)? else {
        return Ok(None);
    };
    if body_len > MAX_FRAME_SIZE {
        return Err(PacketError::FrameTooLarge {
            size: body_len,
            limit: MAX_FRAME_SIZE,
        });
    }
    let total = prefix_len + body_len;
    if buf.len() < total {
        return Ok(None);
    }

    let body = &buf[prefix_len..total];
    let mut input = PacketReader::new(body);
    let id = input.read_varint("packet_id")?;
    let packet = Packet::decode(id, &body[input.position()..])?;
    Ok(Some((total, packet)))
}

/// Decode every frame in `buf`, failing on a trailing partial frame.
pub fn decode_frames(mut buf: &[u8]) -> Result<Vec<Packet>> {
    let mut packets = Vec::new();
    while !buf.is_empty() {
        let Some((consumed, packet)) = decode_frame(buf)? else {
            return Err(PacketError::truncated("frame"));
        };
        packets.push(packet);
        buf = &buf[consumed..];
    }
    Ok(packets)
}

fn peek_length(buf: &[u8]) -> Result<Option<(usize, usize)>> {
    let mut value: u32 = 0;
    for (idx, byte) in buf.iter().take(VARINT_MAX_BYTES).enumerate() {
        value |= u32::from(byte & 0x7f) << (7 * idx);
        if byte & 0x80 == 0 {
            let len = usize::try_from(value as i32).map_err(|_| PacketError::truncated("frame_length"))?;
            return Ok(Some((idx + 1, len)));
        }
    }
    if buf.len() >= VARINT_MAX_BYTES {
        return Err(PacketError::VarIntTooLong);
    }
    Ok(None)
}
