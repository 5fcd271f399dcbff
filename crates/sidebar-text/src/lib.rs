//! Text handling for the legacy sidebar protocol.
//!
//! The client renders inline formatting through 2-character escape tokens
//! (`§` followed by a code character). This crate provides:
//!
//! - The escape-code table and its color/style classification
//! - Translation of user-facing codes (`&c`) into protocol codes (`§c`)
//! - The color-continuity segmenter used to split a line across the
//!   prefix/suffix fields of a team
//! - The highlight animation generator
//!
//! # Example
//!
//! ```
//! use sidebar_text::{segment, translate_alternate_codes};
//!
//! let line = translate_alternate_codes('&', "&aOnline players: &e&l128 &7/ 500");
//! let split = segment(&line, 16).unwrap();
//!
//! assert_eq!(split.head, "§aOnline players");
//! assert_eq!(split.suffix(), "§a: §e§l128 §7/ 500");
//! ```

mod animation;
mod error;
mod escape;
mod segment;

pub use animation::{DEFAULT_COOLDOWN, HighlightAnimation, WRAP_COOLDOWN};
pub use error::{EscapeError, Result};
pub use escape::{
    ActiveFormat, FormatKind, Formatting, MARKER, classify, strip, tokens,
    translate_alternate_codes,
};
pub use segment::{Segment, segment};
