//! Team packet (`0x3E`).
//!
//! | Field               | Type     | Present              |
//! |---------------------|----------|----------------------|
//! | team-name           | string   | always (≤16)         |
//! | action              | byte     | always               |
//! | display-name        | string   | always (≤32)         |
//! | prefix              | string   | always (≤16)         |
//! | suffix              | string   | always (≤16)         |
//! | name-tag-visibility | string   | always, `"always"`   |
//! | collision-rule      | string   | always, `"never"`    |
//! | team-color          | string   | always, `"reset"`    |
//! | entry count         | VarInt   | Create/Update        |
//! | entries             | string[] | Create/Update (≤40)  |

use std::io::Write;

use serde::Serialize;

use super::score::ENTRY_LIMIT;
use crate::buffer::{PacketReader, PacketWriter};
use crate::error::{PacketError, Result};

pub const TEAM_NAME_LIMIT: usize = 16;
pub const DISPLAY_NAME_LIMIT: usize = 32;
pub const AFFIX_LIMIT: usize = 16;

pub const NAME_TAG_ALWAYS: &str = "always";
pub const COLLISION_NEVER: &str = "never";
pub const TEAM_COLOR_RESET: &str = "reset";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamAction {
    Create,
    Remove,
    Update,
}

impl TeamAction {
    pub fn id(self) -> u8 {
        match self {
            Self::Create => 0,
            Self::Remove => 1,
            Self::Update => 2,
        }
    }

    fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(Self::Create),
            1 => Ok(Self::Remove),
            2 => Ok(Self::Update),
            other => Err(PacketError::UnknownAction {
                packet: "team",
                action: i32::from(other),
            }),
        }
    }

    fn has_entries(self) -> bool {
        !matches!(self, Self::Remove)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamPacket {
    pub name: String,
    pub action: TeamAction,
    pub display_name: String,
    pub prefix: String,
    pub suffix: String,
    /// Written only for Create and Update.
    pub entries: Vec<String>,
}

impl TeamPacket {
    /// A team whose display name equals its name, holding one entry.
    pub fn create(
        name: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        entry: impl Into<String>,
    ) -> Self {
        Self::with_action(TeamAction::Create, name, prefix, suffix, entry)
    }

    pub fn update(
        name: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        entry: impl Into<String>,
    ) -> Self {
        Self::with_action(TeamAction::Update, name, prefix, suffix, entry)
    }

    pub fn remove(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            action: TeamAction::Remove,
            prefix: String::new(),
            suffix: String::new(),
            entries: Vec::new(),
        }
    }

    fn with_action(
        action: TeamAction,
        name: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        entry: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            action,
            prefix: prefix.into(),
            suffix: suffix.into(),
            entries: vec![entry.into()],
        }
    }

    pub(crate) fn write<W: Write>(&self, out: &mut PacketWriter<W>) -> Result<()> {
        out.write_string("team_name", &self.name, TEAM_NAME_LIMIT)?;
        out.write_byte(self.action.id())?;
        out.write_string("display_name", &self.display_name, DISPLAY_NAME_LIMIT)?;
        out.write_string("prefix", &self.prefix, AFFIX_LIMIT)?;
        out.write_string("suffix", &self.suffix, AFFIX_LIMIT)?;
        out.write_string("name_tag_visibility", NAME_TAG_ALWAYS, NAME_TAG_ALWAYS.len())?;
        out.write_string("collision_rule", COLLISION_NEVER, COLLISION_NEVER.len())?;
        out.write_string("team_color", TEAM_COLOR_RESET, TEAM_COLOR_RESET.len())?;
        if self.action.has_entries() {
            let count = i32::try_from(self.entries.len())
                .map_err(|_| PacketError::field_too_long("entries", 1, self.entries.len()))?;
            out.write_varint(count)?;
            for entry in &self.entries {
                out.write_string("entry", entry, ENTRY_LIMIT)?;
            }
        }
        Ok(())
    }

    pub(crate) fn read(input: &mut PacketReader<'_>) -> Result<Self> {
        let name = input.read_string("team_name", TEAM_NAME_LIMIT)?;
        let action = TeamAction::from_id(input.read_byte("action")?)?;
        let display_name = input.read_string("display_name", DISPLAY_NAME_LIMIT)?;
        let prefix = input.read_string("prefix", AFFIX_LIMIT)?;
        let suffix = input.read_string("suffix", AFFIX_LIMIT)?;
        input.expect_string("name_tag_visibility", NAME_TAG_ALWAYS)?;
        input.expect_string("collision_rule", COLLISION_NEVER)?;
        input.expect_string("team_color", TEAM_COLOR_RESET)?;

        let mut entries = Vec::new();
        if action.has_entries() {
            let count = input.read_varint("entry_count")?;
            let count = usize::try_from(count).map_err(|_| PacketError::truncated("entry_count"))?;
            // Every entry takes at least one byte.
            if count > input.remaining() {
                return Err(PacketError::truncated("entries"));
            }
            for _ in 0..count {
                entries.push(input.read_string("entry", ENTRY_LIMIT)?);
            }
        }

        Ok(Self {
            name,
            action,
            display_name,
            prefix,
            suffix,
            entries,
        })
    }
}
