//! The four sidebar packets and their ids.

mod objective;
mod score;
mod team;

use serde::Serialize;

use crate::buffer::{PacketReader, PacketWriter};
use crate::error::{PacketError, Result};

pub use objective::{
    DISPLAY_TYPE_INTEGER, DisplayObjectivePacket, OBJECTIVE_NAME_LIMIT, ObjectiveAction,
    ObjectivePacket, SIDEBAR_POSITION, TITLE_LIMIT,
};
pub use score::{ENTRY_LIMIT, ScoreAction, ScorePacket};
pub use team::{
    AFFIX_LIMIT, COLLISION_NEVER, DISPLAY_NAME_LIMIT, NAME_TAG_ALWAYS, TEAM_COLOR_RESET,
    TEAM_NAME_LIMIT, TeamAction, TeamPacket,
};

pub const OBJECTIVE_ID: i32 = 0x3B;
pub const SCORE_ID: i32 = 0x3C;
pub const DISPLAY_OBJECTIVE_ID: i32 = 0x3D;
pub const TEAM_ID: i32 = 0x3E;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "packet", content = "fields", rename_all = "snake_case")]
pub enum Packet {
    Objective(ObjectivePacket),
    DisplayObjective(DisplayObjectivePacket),
    Score(ScorePacket),
    Team(TeamPacket),
}

impl Packet {
    pub fn id(&self) -> i32 {
        match self {
            Self::Objective(_) => OBJECTIVE_ID,
            Self::DisplayObjective(_) => DISPLAY_OBJECTIVE_ID,
            Self::Score(_) => SCORE_ID,
            Self::Team(_) => TEAM_ID,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Objective(_) => "objective",
            Self::DisplayObjective(_) => "display_objective",
            Self::Score(_) => "score",
            Self::Team(_) => "team",
        }
    }

    /// Write the payload (without id or length) to `out`.
    ///
    /// Every field is validated as it is written; a failure may leave a
    /// partial payload in `out`.
    pub fn write_to<W: std::io::Write>(&self, out: &mut PacketWriter<W>) -> Result<()> {
        match self {
            Self::Objective(packet) => packet.write(out),
            Self::DisplayObjective(packet) => packet.write(out),
            Self::Score(packet) => packet.write(out),
            Self::Team(packet) => packet.write(out),
        }
    }

    /// Encode the payload into a new buffer.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = PacketWriter::new(Vec::new());
        self.write_to(&mut out)?;
        Ok(out.into_inner())
    }

    /// Parse a payload previously produced by [`Packet::encode`].
    pub fn decode(id: i32, payload: &[u8]) -> Result<Self> {
        let mut input = PacketReader::new(payload);
        let packet = match id {
            OBJECTIVE_ID => Self::Objective(ObjectivePacket::read(&mut input)?),
            DISPLAY_OBJECTIVE_ID => Self::DisplayObjective(DisplayObjectivePacket::read(&mut input)?),
            SCORE_ID => Self::Score(ScorePacket::read(&mut input)?),
            TEAM_ID => Self::Team(TeamPacket::read(&mut input)?),
            other => return Err(PacketError::UnknownPacket { id: other }),
        };
        if input.remaining() > 0 {
            return Err(PacketError::TrailingBytes {
                id,
                count: input.remaining(),
            });
        }
        Ok(packet)
    }
}

impl From<ObjectivePacket> for Packet {
    fn from(packet: ObjectivePacket) -> Self {
        Self::Objective(packet)
    }
}

impl From<DisplayObjectivePacket> for Packet {
    fn from(packet: DisplayObjectivePacket) -> Self {
        Self::DisplayObjective(packet)
    }
}

impl From<ScorePacket> for Packet {
    fn from(packet: ScorePacket) -> Self {
        Self::Score(packet)
    }
}

impl From<TeamPacket> for Packet {
    fn from(packet: TeamPacket) -> Self {
        Self::Team(packet)
    }
}
