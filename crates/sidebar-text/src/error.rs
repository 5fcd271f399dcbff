//! Error types for escape-code handling.

use thiserror::Error;

/// Errors raised while reading escape tokens out of display text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    /// A marker is followed by a character outside the code table.
    #[error("invalid escape code '{code}' at position {position}")]
    InvalidEscapeCode { code: char, position: usize },

    /// The text ends with a marker that has no payload.
    #[error("escape marker at position {position} has no code")]
    DanglingMarker { position: usize },
}

/// Result type alias for escape-code operations.
pub type Result<T> = std::result::Result<T, EscapeError>;

impl EscapeError {
    /// Character position of the offending token.
    pub fn position(&self) -> usize {
        match self {
            Self::InvalidEscapeCode { position, .. } | Self::DanglingMarker { position } => {
                *position
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EscapeError::InvalidEscapeCode {
            code: 'z',
            position: 3,
        };
        assert_eq!(format!("{err}"), "invalid escape code 'z' at position 3");

        let err = EscapeError::DanglingMarker { position: 9 };
        assert_eq!(format!("{err}"), "escape marker at position 9 has no code");
        assert_eq!(err.position(), 9);
    }
}
