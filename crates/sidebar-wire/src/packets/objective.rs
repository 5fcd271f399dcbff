//! Objective and display-objective packets.
//!
//! Objective (`0x3B`):
//!
//! | Field          | Type   | Present            |
//! |----------------|--------|--------------------|
//! | objective-name | string | always (≤16)       |
//! | action         | byte   | always             |
//! | title          | string | Create/Update (≤32)|
//! | display-type   | string | Create/Update      |
//!
//! DisplayObjective (`0x3D`): position byte, objective-name string.

use std::io::Write;

use serde::Serialize;

use crate::buffer::{PacketReader, PacketWriter};
use crate::error::{PacketError, Result};

pub const OBJECTIVE_NAME_LIMIT: usize = 16;
pub const TITLE_LIMIT: usize = 32;

/// Render type of the objective's values.
pub const DISPLAY_TYPE_INTEGER: &str = "integer";

/// Display position of the sidebar.
pub const SIDEBAR_POSITION: u8 = 1;

/// Objective mutation and its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ObjectiveAction {
    Create { title: String },
    Delete,
    Update { title: String },
}

impl ObjectiveAction {
    pub fn id(&self) -> u8 {
        match self {
            Self::Create { .. } => 0,
            Self::Delete => 1,
            Self::Update { .. } => 2,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Create { title } | Self::Update { title } => Some(title),
            Self::Delete => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectivePacket {
    pub name: String,
    #[serde(flatten)]
    pub action: ObjectiveAction,
}

impl ObjectivePacket {
    pub fn create(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: ObjectiveAction::Create {
                title: title.into(),
            },
        }
    }

    pub fn update(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: ObjectiveAction::Update {
                title: title.into(),
            },
        }
    }

    pub fn delete(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: ObjectiveAction::Delete,
        }
    }

    pub(crate) fn write<W: Write>(&self, out: &mut PacketWriter<W>) -> Result<()> {
        out.write_string("objective_name", &self.name, OBJECTIVE_NAME_LIMIT)?;
        out.write_byte(self.action.id())?;
        if let Some(title) = self.action.title() {
            out.write_string("title", title, TITLE_LIMIT)?;
            out.write_string("display_type", DISPLAY_TYPE_INTEGER, DISPLAY_TYPE_INTEGER.len())?;
        }
        Ok(())
    }

    pub(crate) fn read(input: &mut PacketReader<'_>) -> Result<Self> {
        let name = input.read_string("objective_name", OBJECTIVE_NAME_LIMIT)?;
        let action = match input.read_byte("action")? {
            0 => ObjectiveAction::Create {
                title: read_titled(input)?,
            },
            1 => ObjectiveAction::Delete,
            2 => ObjectiveAction::Update {
                title: read_titled(input)?,
            },
            other => {
                return Err(PacketError::UnknownAction {
                    packet: "objective",
                    action: i32::from(other),
                });
            }
        };
        Ok(Self { name, action })
    }
}

fn read_titled(input: &mut PacketReader<'_>) -> Result<String> {
    let title = input.read_string("title", TITLE_LIMIT)?;
    input.expect_string("display_type", DISPLAY_TYPE_INTEGER)?;
    Ok(title)
}

/// Shows an objective at a display position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayObjectivePacket {
    pub position: u8,
    pub name: String,
}

impl DisplayObjectivePacket {
    /// Show `name` in the sidebar.
    pub fn sidebar(name: impl Into<String>) -> Self {
        Self {
            position: SIDEBAR_POSITION,
            name: name.into(),
        }
    }

    pub(crate) fn write<W: Write>(&self, out: &mut PacketWriter<W>) -> Result<()> {
        out.write_byte(self.position)?;
        out.write_string("objective_name", &self.name, OBJECTIVE_NAME_LIMIT)
    }

    pub(crate) fn read(input: &mut PacketReader<'_>) -> Result<Self> {
        let position = input.read_byte("position")?;
        let name = input.read_string("objective_name", OBJECTIVE_NAME_LIMIT)?;
        Ok(Self { position, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(packet: &ObjectivePacket) -> Vec<u8> {
        let mut out = PacketWriter::new(Vec::new());
        packet.write(&mut out).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_create_layout() {
        let bytes = encode(&ObjectivePacket::create("board", "My Board"));
        let mut expected = b"\x05board\x00\x08My Board".to_vec();
        expected.extend_from_slice(b"\x07integer");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_delete_has_no_title() {
        let bytes = encode(&ObjectivePacket::delete("board"));
        assert_eq!(bytes, b"\x05board\x01");
    }

    #[test]
    fn test_title_limit() {
        let mut out = PacketWriter::new(Vec::new());
        let err = ObjectivePacket::update("board", "t".repeat(33))
            .write(&mut out)
            .unwrap_err();
        assert!(matches!(err, PacketError::FieldTooLong { field: "title", .. }));
    }

    #[test]
    fn test_unknown_action() {
        let bytes = b"\x05board\x07";
        let err = ObjectivePacket::read(&mut PacketReader::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            PacketError::UnknownAction {
                packet: "objective",
                action: 7
            }
        ));
    }

    #[test]
    fn test_display_sidebar_layout() {
        let mut out = PacketWriter::new(Vec::new());
        DisplayObjectivePacket::sidebar("board")
            .write(&mut out)
            .unwrap();
        assert_eq!(out.into_inner(), b"\x01\x05board");
    }
}
