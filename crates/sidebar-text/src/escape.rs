//! Escape-code table and token scanning.
//!
//! A formatting directive is the marker `§` followed by one code character.
//! Codes `0`-`9` and `a`-`f` select one of the 16 colors; `k`-`o` select a
//! decoration and `r` resets. The client lowercases codes before lookup, so
//! uppercase codes are accepted as well.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EscapeError, Result};

/// The protocol escape marker (section sign, U+00A7).
pub const MARKER: char = '\u{a7}';

/// Category of an escape code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// One of the 16 colors. A color also clears any active decoration.
    Color,
    /// A decoration (obfuscated, bold, strikethrough, underline, italic) or reset.
    Style,
}

/// A legal escape code, in protocol order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatting {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

impl Formatting {
    /// Every code in protocol order (colors first, reset last).
    pub const ALL: [Formatting; 22] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
        Self::Obfuscated,
        Self::Bold,
        Self::Strikethrough,
        Self::Underline,
        Self::Italic,
        Self::Reset,
    ];

    /// Code character written after the marker.
    pub fn code(self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
            Self::Obfuscated => 'k',
            Self::Bold => 'l',
            Self::Strikethrough => 'm',
            Self::Underline => 'n',
            Self::Italic => 'o',
            Self::Reset => 'r',
        }
    }

    /// Look up a code character (case-insensitive).
    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        Self::ALL.into_iter().find(|format| format.code() == code)
    }

    /// Code at the given ordinal, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether this code is a color or a style.
    pub fn kind(self) -> FormatKind {
        match self {
            Self::Obfuscated
            | Self::Bold
            | Self::Strikethrough
            | Self::Underline
            | Self::Italic
            | Self::Reset => FormatKind::Style,
            _ => FormatKind::Color,
        }
    }

    pub fn is_color(self) -> bool {
        self.kind() == FormatKind::Color
    }

    /// Protocol name (`"gold"`, `"dark_aqua"`, `"reset"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "dark_blue",
            Self::DarkGreen => "dark_green",
            Self::DarkAqua => "dark_aqua",
            Self::DarkRed => "dark_red",
            Self::DarkPurple => "dark_purple",
            Self::Gold => "gold",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Aqua => "aqua",
            Self::Red => "red",
            Self::LightPurple => "light_purple",
            Self::Yellow => "yellow",
            Self::White => "white",
            Self::Obfuscated => "obfuscated",
            Self::Bold => "bold",
            Self::Strikethrough => "strikethrough",
            Self::Underline => "underline",
            Self::Italic => "italic",
            Self::Reset => "reset",
        }
    }

    /// Look up a code by its protocol name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(name))
    }

    /// The 2-character escape token for this code.
    pub fn token(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Formatting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MARKER}{}", self.code())
    }
}

impl FromStr for Formatting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim();
        Self::from_name(needle)
            .or_else(|| {
                let mut chars = needle.chars();
                match (chars.next(), chars.next()) {
                    (Some(code), None) => Self::from_code(code),
                    _ => None,
                }
            })
            .ok_or_else(|| format!("unknown formatting code: {s}"))
    }
}

/// Classify an escape payload character.
///
/// # Errors
///
/// Returns [`EscapeError::InvalidEscapeCode`] when `code` is not in the table.
/// The reported position is 0; use [`tokens`] for positional errors.
pub fn classify(code: char) -> Result<FormatKind> {
    Formatting::from_code(code)
        .map(Formatting::kind)
        .ok_or(EscapeError::InvalidEscapeCode { code, position: 0 })
}

/// Scan every escape token in `text`.
///
/// Returns `(position, code)` pairs, where `position` is the character index
/// of the marker.
///
/// # Errors
///
/// Fails on a marker followed by an unknown code, or a marker ending the text.
pub fn tokens(text: &str) -> Result<Vec<(usize, Formatting)>> {
    let chars: Vec<char> = text.chars().collect();
    scan_tokens(&chars)
}

pub(crate) fn scan_tokens(chars: &[char]) -> Result<Vec<(usize, Formatting)>> {
    let mut found = Vec::new();
    let mut idx = 0;
    while idx < chars.len() {
        if chars[idx] != MARKER {
            idx += 1;
            continue;
        }
        let Some(&code) = chars.get(idx + 1) else {
            return Err(EscapeError::DanglingMarker { position: idx });
        };
        let format = Formatting::from_code(code)
            .ok_or(EscapeError::InvalidEscapeCode { code, position: idx })?;
        found.push((idx, format));
        idx += 2;
    }
    Ok(found)
}

/// Remove every escape token, leaving the visible characters.
///
/// # Errors
///
/// Fails on malformed tokens, like [`tokens`].
pub fn strip(text: &str) -> Result<String> {
    let chars: Vec<char> = text.chars().collect();
    let found = scan_tokens(&chars)?;
    let mut out = String::with_capacity(text.len());
    let mut skip = found.iter().map(|(pos, _)| *pos).peekable();
    let mut idx = 0;
    while idx < chars.len() {
        if skip.peek() == Some(&idx) {
            skip.next();
            idx += 2;
            continue;
        }
        out.push(chars[idx]);
        idx += 1;
    }
    Ok(out)
}

/// Replace a user-facing marker with the protocol marker.
///
/// Only `marker` followed by a legal code is rewritten, and the code is
/// lowercased. Any other occurrence of `marker` is kept as typed.
pub fn translate_alternate_codes(marker: char, text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == marker
            && let Some(format) = chars.peek().and_then(|next| Formatting::from_code(*next))
        {
            chars.next();
            out.push(MARKER);
            out.push(format.code());
            continue;
        }
        out.push(c);
    }
    out
}

/// Formatting in effect at a cursor position.
///
/// Holds at most one color and one style, the ones closest to the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveFormat {
    pub color: Option<Formatting>,
    pub style: Option<Formatting>,
}

impl ActiveFormat {
    /// Record a token, keeping the first one seen per category.
    ///
    /// Returns true once both categories are filled.
    pub fn remember(&mut self, format: Formatting) -> bool {
        let slot = match format.kind() {
            FormatKind::Color => &mut self.color,
            FormatKind::Style => &mut self.style,
        };
        if slot.is_none() {
            *slot = Some(format);
        }
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.color.is_some() && self.style.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.style.is_none()
    }

    /// Re-emit the remembered tokens, color first.
    pub fn to_prefix(&self) -> String {
        let mut out = String::with_capacity(4);
        for format in [self.color, self.style].into_iter().flatten() {
            out.push(MARKER);
            out.push(format.code());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_sixteen_colors_and_six_styles() {
        let colors = Formatting::ALL.iter().filter(|f| f.is_color()).count();
        assert_eq!(colors, 16);
        assert_eq!(Formatting::ALL.len() - colors, 6);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify('0'), Ok(FormatKind::Color));
        assert_eq!(classify('f'), Ok(FormatKind::Color));
        assert_eq!(classify('F'), Ok(FormatKind::Color));
        for code in ['k', 'l', 'm', 'n', 'o', 'r'] {
            assert_eq!(classify(code), Ok(FormatKind::Style), "code {code}");
        }
        assert!(matches!(
            classify('p'),
            Err(EscapeError::InvalidEscapeCode { code: 'p', .. })
        ));
        assert!(classify('g').is_err());
        assert!(classify(MARKER).is_err());
    }

    #[test]
    fn test_from_index_matches_protocol_order() {
        assert_eq!(Formatting::from_index(0), Some(Formatting::Black));
        assert_eq!(Formatting::from_index(14), Some(Formatting::Yellow));
        assert_eq!(Formatting::from_index(21), Some(Formatting::Reset));
        assert_eq!(Formatting::from_index(22), None);
        assert_eq!(Formatting::Gold.to_string(), "§6");
    }

    #[test]
    fn test_from_str_accepts_names_and_codes() {
        assert_eq!("gold".parse::<Formatting>(), Ok(Formatting::Gold));
        assert_eq!("DARK_AQUA".parse::<Formatting>(), Ok(Formatting::DarkAqua));
        assert_eq!("l".parse::<Formatting>(), Ok(Formatting::Bold));
        assert!("sparkly".parse::<Formatting>().is_err());
    }

    #[test]
    fn test_tokens_positions() {
        let found = tokens("§aHi §lthere").unwrap();
        assert_eq!(found, vec![(0, Formatting::Green), (5, Formatting::Bold)]);
    }

    #[test]
    fn test_tokens_rejects_unknown_and_dangling() {
        assert_eq!(
            tokens("ab§zc"),
            Err(EscapeError::InvalidEscapeCode {
                code: 'z',
                position: 2
            })
        );
        assert_eq!(
            tokens("abc§"),
            Err(EscapeError::DanglingMarker { position: 3 })
        );
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip("§6Gold §lbold§r").unwrap(), "Gold bold");
        assert_eq!(strip("plain").unwrap(), "plain");
    }

    #[test]
    fn test_translate_alternate_codes() {
        assert_eq!(translate_alternate_codes('&', "&6Gold"), "§6Gold");
        assert_eq!(translate_alternate_codes('&', "&LBold"), "§lBold");
        assert_eq!(translate_alternate_codes('&', "Tom & Jerry"), "Tom & Jerry");
        assert_eq!(translate_alternate_codes('&', "&&a"), "&§a");
        assert_eq!(translate_alternate_codes('&', "end&"), "end&");
    }

    #[test]
    fn test_active_format_keeps_first_seen() {
        let mut active = ActiveFormat::default();
        assert!(!active.remember(Formatting::Red));
        assert!(!active.remember(Formatting::Blue));
        assert!(active.remember(Formatting::Bold));
        assert_eq!(active.color, Some(Formatting::Red));
        assert_eq!(active.to_prefix(), "§c§l");
    }
}
