//! Color-continuity splitting.
//!
//! A line longer than one field is cut at a fixed budget. The formatting in
//! effect at the cut is re-emitted at the start of the remainder so that the
//! two halves render exactly like the unsplit text.

use crate::error::Result;
use crate::escape::{ActiveFormat, Formatting, MARKER, scan_tokens};

/// Result of splitting a line at a character budget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    /// At most `budget` characters, never ending inside a token.
    pub head: String,
    /// Color then style in effect at the end of `head`. Empty when there is no tail.
    pub carry_prefix: String,
    /// Raw remainder after the cut, without the carry prefix.
    pub tail: String,
    /// 1 when the cut moved left to keep a token whole, else 0.
    pub lag: usize,
}

impl Segment {
    /// The remainder as delivered downstream (`carry_prefix + tail`).
    pub fn suffix(&self) -> String {
        if self.tail.is_empty() {
            return String::new();
        }
        let mut out = String::with_capacity(self.carry_prefix.len() + self.tail.len());
        out.push_str(&self.carry_prefix);
        out.push_str(&self.tail);
        out
    }

    /// Character length of [`Segment::suffix`].
    pub fn suffix_len(&self) -> usize {
        if self.tail.is_empty() {
            0
        } else {
            self.carry_prefix.chars().count() + self.tail.chars().count()
        }
    }

    pub fn is_split(&self) -> bool {
        !self.tail.is_empty()
    }

    /// Largest raw length whose suffix still fits in `suffix_limit` characters.
    pub fn max_raw_len(&self, budget: usize, suffix_limit: usize) -> usize {
        (budget - self.lag + suffix_limit).saturating_sub(self.carry_prefix.chars().count())
    }
}

/// Split `raw` after at most `budget` characters.
///
/// If the character at `budget - 1` is a marker, the cut moves one character
/// left so the token lands whole in the tail. The head is then scanned from
/// its end for the closest color token and the closest style token, which
/// become the carry prefix.
///
/// # Errors
///
/// Fails with an [`EscapeError`](crate::EscapeError) when `raw` contains a
/// malformed token anywhere, even past the cut.
pub fn segment(raw: &str, budget: usize) -> Result<Segment> {
    let chars: Vec<char> = raw.chars().collect();
    scan_tokens(&chars)?;

    if chars.len() <= budget || budget == 0 {
        return Ok(Segment {
            head: raw.to_string(),
            ..Segment::default()
        });
    }

    let lag = usize::from(chars[budget - 1] == MARKER);
    let cut = budget - lag;
    let head = &chars[..cut];

    let mut active = ActiveFormat::default();
    // Tokens are validated, so a marker inside head always has its payload
    // inside head as well (the lag rule keeps the last marker out).
    for idx in (0..head.len().saturating_sub(1)).rev() {
        if head[idx] != MARKER {
            continue;
        }
        let Some(format) = Formatting::from_code(head[idx + 1]) else {
            continue;
        };
        if active.remember(format) {
            break;
        }
    }

    Ok(Segment {
        head: head.iter().collect(),
        carry_prefix: active.to_prefix(),
        tail: chars[cut..].iter().collect(),
        lag,
    })
}
