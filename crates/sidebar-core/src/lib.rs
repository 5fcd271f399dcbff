//! Per-viewer sidebar boards.
//!
//! A [`Board`] manages the 15 line slots of one viewer and sends the packets
//! that keep the client in sync. [`BoardRegistry`] owns one board per
//! attached viewer and [`RedrawDriver`] refreshes them from a
//! [`ContentSource`] on a fixed cadence.
//!
//! The host supplies three collaborators: a [`ViewerDirectory`] that knows
//! who is online, a [`ContentSource`] with each viewer's text and a
//! [`Transport`] that delivers encoded frames.

pub mod board;
pub mod config;
pub mod driver;
pub mod error;
pub mod registry;
pub mod viewer;

pub use board::{Board, KEY_LIMIT, KeyedLine, LINE_LIMIT, LineSlot, OBJECTIVE_NAME, SLOT_COUNT, SlotMode};
pub use config::{AnimationSettings, SidebarConfig};
pub use driver::{DriverHandle, RedrawDriver, TickReport};
pub use error::{BoardError, ConfigError, ErrorKind, RegistryError};
pub use registry::{BoardRegistry, SharedBoard, lock_board};
pub use viewer::{ContentSource, Transport, ViewerDirectory, ViewerId};
