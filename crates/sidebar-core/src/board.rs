//! Per-viewer sidebar with 15 addressable line slots.
//!
//! Each occupied slot is backed by one score entry and one team. The team's
//! prefix and suffix carry the visible text, so a line can hold up to two
//! 16-character fields with its formatting carried across the split.
//!
//! Every operation validates and encodes all of its packets before the first
//! one is sent; a rejected call sends nothing.

use std::fmt;
use std::sync::Arc;

use sidebar_text::{Formatting, segment};
use sidebar_wire::{
    AFFIX_LIMIT, DisplayObjectivePacket, ENTRY_LIMIT, ObjectivePacket, Packet, PacketError,
    ScorePacket, TITLE_LIMIT, TeamPacket, encode_frame,
};
use tracing::debug;

use crate::error::BoardError;
use crate::viewer::{Transport, ViewerId};

type Result<T> = std::result::Result<T, BoardError>;

/// Number of line slots on a sidebar.
pub const SLOT_COUNT: usize = 15;

/// Name of the single objective each board owns.
pub const OBJECTIVE_NAME: &str = "board";

/// Longest plain line: prefix plus suffix.
pub const LINE_LIMIT: usize = 2 * AFFIX_LIMIT;

/// Longest keyed line: prefix plus score entry.
pub const KEY_LIMIT: usize = AFFIX_LIMIT + ENTRY_LIMIT;

/// What a slot currently displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotMode {
    Empty,
    /// Text split over the team prefix and suffix.
    Plain,
    /// A pinned label with a value updated through the suffix.
    Keyed,
}

/// Client-visible state of one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSlot {
    raw_text: Option<String>,
    static_key: Option<String>,
    entry: Option<String>,
    has_been_created: bool,
}

impl LineSlot {
    pub fn mode(&self) -> SlotMode {
        match (&self.entry, &self.static_key) {
            (None, _) => SlotMode::Empty,
            (Some(_), None) => SlotMode::Plain,
            (Some(_), Some(_)) => SlotMode::Keyed,
        }
    }

    /// Last text drawn (plain) or the full key (keyed).
    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    /// Team prefix pinned by a keyed line.
    pub fn static_key(&self) -> Option<&str> {
        self.static_key.as_deref()
    }

    /// Score entry committed for this slot.
    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    /// Whether the slot's team exists on the client.
    pub fn has_been_created(&self) -> bool {
        self.has_been_created
    }
}

/// A keyed line: a static label whose value is updated separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedLine {
    pub index: usize,
    pub key: String,
}

impl KeyedLine {
    pub fn new(index: usize, key: impl Into<String>) -> Self {
        Self {
            index,
            key: key.into(),
        }
    }
}

/// An encoded packet ready for delivery.
struct Frame {
    packet: &'static str,
    bytes: Vec<u8>,
}

/// Sidebar state for a single viewer.
pub struct Board {
    viewer: ViewerId,
    transport: Arc<dyn Transport>,
    objective_created: bool,
    slots: [LineSlot; SLOT_COUNT],
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("viewer", &self.viewer)
            .field("objective_created", &self.objective_created)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl Board {
    /// An empty board. Nothing is sent until the first operation.
    pub fn new(viewer: ViewerId, transport: Arc<dyn Transport>) -> Self {
        Self {
            viewer,
            transport,
            objective_created: false,
            slots: std::array::from_fn(|_| LineSlot::default()),
        }
    }

    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    pub fn has_objective(&self) -> bool {
        self.objective_created
    }

    pub fn line(&self, index: usize) -> Option<&LineSlot> {
        self.slots.get(index)
    }

    pub fn slot_mode(&self, index: usize) -> Option<SlotMode> {
        self.line(index).map(LineSlot::mode)
    }

    /// Indices of occupied slots in ascending order.
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.mode() != SlotMode::Empty)
            .map(|(index, _)| index)
    }

    /// Create or update the objective title, then show it in the sidebar.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        check_length("title", title, TITLE_LIMIT)?;

        let objective = if self.objective_created {
            ObjectivePacket::update(OBJECTIVE_NAME, title)
        } else {
            ObjectivePacket::create(OBJECTIVE_NAME, title)
        };
        let objective = encode(objective)?;
        let display = encode(DisplayObjectivePacket::sidebar(OBJECTIVE_NAME))?;

        self.deliver(&objective)?;
        self.objective_created = true;
        self.deliver(&display)
    }

    /// Draw plain text on a line, splitting it over the team prefix and suffix.
    pub fn set_line(&mut self, index: usize, text: &str) -> Result<()> {
        let entry = plain_entry(index)?;
        if self.slots[index].mode() == SlotMode::Keyed {
            return Err(BoardError::KeyedLine { index });
        }
        let len = check_length("line", text, LINE_LIMIT)?;

        let split = segment(text, AFFIX_LIMIT)?;
        let max = split.max_raw_len(AFFIX_LIMIT, AFFIX_LIMIT);
        if len > max {
            return Err(BoardError::LineTooLong { index, max });
        }

        let slot = &self.slots[index];
        let score = match slot.entry {
            None => Some(encode(ScorePacket::change(
                &entry,
                OBJECTIVE_NAME,
                score_value(index),
            ))?),
            Some(_) => None,
        };
        let team = if slot.has_been_created {
            TeamPacket::update(index.to_string(), &split.head, split.suffix(), &entry)
        } else {
            TeamPacket::create(index.to_string(), &split.head, split.suffix(), &entry)
        };
        let team = encode(team)?;

        if let Some(score) = score {
            self.deliver(&score)?;
            self.slots[index].entry = Some(entry);
        }
        self.deliver(&team)?;

        let slot = &mut self.slots[index];
        slot.has_been_created = true;
        slot.raw_text = Some(text.to_string());
        Ok(())
    }

    /// Pin a static key on a line; its value is set later with
    /// [`Board::set_value`].
    ///
    /// Keys longer than a score entry pin their first field as the team
    /// prefix and use the carried formatting plus the rest as the entry.
    pub fn create_line(&mut self, line: &KeyedLine) -> Result<()> {
        let index = check_index(line.index)?;
        let key = line.key.as_str();
        let len = check_length("key", key, KEY_LIMIT)?;

        let (prefix, entry) = if len > ENTRY_LIMIT {
            let split = segment(key, AFFIX_LIMIT)?;
            let max = split.max_raw_len(AFFIX_LIMIT, ENTRY_LIMIT);
            if len > max {
                return Err(BoardError::LineTooLong { index, max });
            }
            let entry = split.suffix();
            (split.head, entry)
        } else {
            sidebar_text::tokens(key)?;
            (String::new(), key.to_string())
        };

        if let Some(other) = self
            .slots
            .iter()
            .enumerate()
            .find(|(other, slot)| *other != index && slot.entry.as_deref() == Some(entry.as_str()))
            .map(|(other, _)| other)
        {
            return Err(BoardError::DuplicateEntry { entry, other });
        }

        let score = encode(ScorePacket::change(
            &entry,
            OBJECTIVE_NAME,
            score_value(index),
        ))?;
        let team = encode(TeamPacket::create(index.to_string(), &prefix, "", &entry))?;

        if self.slots[index].mode() != SlotMode::Empty {
            self.remove_line(index)?;
        }

        self.deliver(&score)?;
        self.slots[index] = LineSlot {
            raw_text: Some(key.to_string()),
            static_key: Some(prefix),
            entry: Some(entry),
            has_been_created: false,
        };
        self.deliver(&team)?;
        self.slots[index].has_been_created = true;
        Ok(())
    }

    /// Show a pre-formatted value after a keyed line's static key.
    pub fn set_value(&mut self, index: usize, value: &str) -> Result<()> {
        let index = check_index(index)?;
        let slot = &self.slots[index];
        let (Some(prefix), Some(entry)) = (&slot.static_key, &slot.entry) else {
            return Err(BoardError::MissingStaticKey { index });
        };
        check_length("value", value, AFFIX_LIMIT)?;
        sidebar_text::tokens(value)?;

        let team = if slot.has_been_created {
            TeamPacket::update(index.to_string(), prefix, value, entry)
        } else {
            TeamPacket::create(index.to_string(), prefix, value, entry)
        };
        let team = encode(team)?;

        self.deliver(&team)?;
        self.slots[index].has_been_created = true;
        Ok(())
    }

    /// Format `value` with `formatter`, then [`Board::set_value`].
    pub fn set_value_with<T, F>(&mut self, index: usize, value: &T, formatter: F) -> Result<()>
    where
        T: ?Sized,
        F: FnOnce(&T) -> String,
    {
        let formatted = formatter(value);
        self.set_value(index, &formatted)
    }

    /// Remove a line's team and score entry.
    pub fn remove_line(&mut self, index: usize) -> Result<()> {
        let index = check_index(index)?;
        let slot = &self.slots[index];
        let Some(entry) = &slot.entry else {
            return Err(BoardError::UnknownLine { index });
        };

        let team = if slot.has_been_created {
            Some(encode(TeamPacket::remove(index.to_string()))?)
        } else {
            None
        };
        let score = encode(ScorePacket::remove(entry))?;

        if let Some(team) = team {
            self.deliver(&team)?;
            self.slots[index].has_been_created = false;
        }
        self.deliver(&score)?;
        self.slots[index] = LineSlot::default();
        Ok(())
    }

    /// Remove plain lines at `count` and above.
    ///
    /// Keyed lines are left alone.
    pub fn truncate_lines(&mut self, count: usize) -> Result<()> {
        for index in count..SLOT_COUNT {
            if self.slots[index].mode() == SlotMode::Plain {
                self.remove_line(index)?;
            }
        }
        Ok(())
    }

    /// Remove every line and the objective. Calling it again sends nothing.
    pub fn destroy(&mut self) -> Result<()> {
        for index in 0..SLOT_COUNT {
            if self.slots[index].mode() != SlotMode::Empty {
                self.remove_line(index)?;
            }
        }

        if self.objective_created {
            let delete = encode(ObjectivePacket::delete(OBJECTIVE_NAME))?;
            let display = encode(DisplayObjectivePacket::sidebar(OBJECTIVE_NAME))?;
            self.deliver(&delete)?;
            self.objective_created = false;
            self.deliver(&display)?;
        }
        Ok(())
    }

    fn deliver(&self, frame: &Frame) -> Result<()> {
        self.transport
            .send(self.viewer, &frame.bytes)
            .map_err(PacketError::from)?;
        debug!(
            viewer = %self.viewer,
            packet = frame.packet,
            bytes = frame.bytes.len(),
            "sent packet"
        );
        Ok(())
    }
}

fn encode(packet: impl Into<Packet>) -> Result<Frame> {
    let packet = packet.into();
    let bytes = encode_frame(&packet)?;
    Ok(Frame {
        packet: packet.name(),
        bytes,
    })
}

fn check_index(index: usize) -> Result<usize> {
    if index < SLOT_COUNT {
        Ok(index)
    } else {
        Err(BoardError::InvalidIndex { index })
    }
}

/// Character count of `text`, rejected above `limit`.
fn check_length(field: &'static str, text: &str, limit: usize) -> Result<usize> {
    let len = text.chars().count();
    if len > limit {
        return Err(BoardError::text_too_long(field, limit, len));
    }
    Ok(len)
}

/// Score entry of a plain line: the escape token at the slot's ordinal.
fn plain_entry(index: usize) -> Result<String> {
    check_index(index)?;
    Formatting::from_index(index)
        .map(Formatting::token)
        .ok_or(BoardError::InvalidIndex { index })
}

fn score_value(index: usize) -> i32 {
    // Slots are bounded by SLOT_COUNT.
    index as i32
}
