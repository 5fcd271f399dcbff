//! Wire encoders for the legacy sidebar scoreboard.
//!
//! Four packets drive the sidebar: an objective holding the title, a display
//! packet that pins it to the sidebar, one score per line and one team per
//! line whose prefix and suffix carry the visible text.
//!
//! # Example
//!
//! ```
//! use sidebar_wire::{Packet, TeamPacket, decode_frame, encode_frame};
//!
//! let packet = Packet::from(TeamPacket::create("0", "§aOnline players", "§a: 12", "§0"));
//! let frame = encode_frame(&packet).unwrap();
//! let (consumed, decoded) = decode_frame(&frame).unwrap().unwrap();
//! assert_eq!(consumed, frame.len());
//! assert_eq!(decoded, packet);
//! ```

pub mod buffer;
pub mod error;
pub mod frame;
pub mod packets;

pub use buffer::{PacketReader, PacketWriter};
pub use error::{PacketError, Result};
pub use frame::{MAX_FRAME_SIZE, decode_frame, decode_frames, encode_frame};
pub use packets::{
    AFFIX_LIMIT, DISPLAY_NAME_LIMIT, DISPLAY_OBJECTIVE_ID, DisplayObjectivePacket, ENTRY_LIMIT,
    OBJECTIVE_ID, OBJECTIVE_NAME_LIMIT, ObjectiveAction, ObjectivePacket, Packet, SCORE_ID,
    ScoreAction, ScorePacket, TEAM_ID, TEAM_NAME_LIMIT, TITLE_LIMIT, TeamAction, TeamPacket,
};
