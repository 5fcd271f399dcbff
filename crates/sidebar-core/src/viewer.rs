//! Viewer identity and the collaborators a host provides.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one connected viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewerId(Uuid);

impl ViewerId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// A fresh random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ViewerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Answers whether a viewer is currently connected.
pub trait ViewerDirectory: Send + Sync {
    fn is_online(&self, viewer: ViewerId) -> bool;
}

/// Supplies the title and lines to draw for a viewer.
///
/// Both are raw text using the configured alternate color marker. Lines are
/// listed top to bottom.
pub trait ContentSource: Send + Sync {
    fn title(&self, viewer: ViewerId) -> String;

    fn lines(&self, viewer: ViewerId) -> Vec<String>;
}

/// Delivers encoded frames to a viewer's connection.
pub trait Transport: Send + Sync {
    fn send(&self, viewer: ViewerId, frame: &[u8]) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_hyphenated_uuid() {
        let id = ViewerId::new(Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_random_ids_differ() {
        assert_ne!(ViewerId::random(), ViewerId::random());
    }
}
