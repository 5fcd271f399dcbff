//! Score packet (`0x3C`).
//!
//! | Field          | Type   | Present       |
//! |----------------|--------|---------------|
//! | entry-name     | string | always (≤40)  |
//! | action         | VarInt | always        |
//! | objective-name | string | Change (≤16)  |
//! | value          | VarInt | Change        |

use std::io::Write;

use serde::Serialize;

use super::objective::OBJECTIVE_NAME_LIMIT;
use crate::buffer::{PacketReader, PacketWriter};
use crate::error::{PacketError, Result};

pub const ENTRY_LIMIT: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScoreAction {
    Change { objective: String, value: i32 },
    Remove,
}

impl ScoreAction {
    pub fn id(&self) -> i32 {
        match self {
            Self::Change { .. } => 0,
            Self::Remove => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorePacket {
    pub entry: String,
    #[serde(flatten)]
    pub action: ScoreAction,
}

impl ScorePacket {
    pub fn change(entry: impl Into<String>, objective: impl Into<String>, value: i32) -> Self {
        Self {
            entry: entry.into(),
            action: ScoreAction::Change {
                objective: objective.into(),
                value,
            },
        }
    }

    pub fn remove(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            action: ScoreAction::Remove,
        }
    }

    pub(crate) fn write<W: Write>(&self, out: &mut PacketWriter<W>) -> Result<()> {
        out.write_string("entry", &self.entry, ENTRY_LIMIT)?;
        out.write_varint(self.action.id())?;
        if let ScoreAction::Change { objective, value } = &self.action {
            out.write_string("objective_name", objective, OBJECTIVE_NAME_LIMIT)?;
            out.write_varint(*value)?;
        }
        Ok(())
    }

    pub(crate) fn read(input: &mut PacketReader<'_>) -> Result<Self> {
        let entry = input.read_string("entry", ENTRY_LIMIT)?;
        let action = match input.read_varint("action")? {
            0 => ScoreAction::Change {
                objective: input.read_string("objective_name", OBJECTIVE_NAME_LIMIT)?,
                value: input.read_varint("value")?,
            },
            1 => ScoreAction::Remove,
            other => {
                return Err(PacketError::UnknownAction {
                    packet: "score",
                    action: other,
                });
            }
        };
        Ok(Self { entry, action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_layout() {
        let mut out = PacketWriter::new(Vec::new());
        ScorePacket::change("§3", "board", 3)
            .write(&mut out)
            .unwrap();
        assert_eq!(
            out.into_inner(),
            vec![0x03, 0xc2, 0xa7, b'3', 0x00, 0x05, b'b', b'o', b'a', b'r', b'd', 0x03]
        );
    }

    #[test]
    fn test_remove_layout() {
        let mut out = PacketWriter::new(Vec::new());
        ScorePacket::remove("Kills").write(&mut out).unwrap();
        assert_eq!(out.into_inner(), b"\x05Kills\x01");
    }

    #[test]
    fn test_entry_limit() {
        let mut out = PacketWriter::new(Vec::new());
        let err = ScorePacket::remove("e".repeat(41))
            .write(&mut out)
            .unwrap_err();
        assert!(matches!(
            err,
            PacketError::FieldTooLong {
                field: "entry",
                limit: 40,
                actual: 41
            }
        ));
    }
}
