//! Error types for boards, the registry and configuration.

use std::path::PathBuf;

use sidebar_text::EscapeError;
use sidebar_wire::PacketError;
use thiserror::Error;

use crate::viewer::ViewerId;

/// Coarse classification of [`BoardError`] for callers that only branch on
/// the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    LineTooLong,
    MissingStaticKey,
    UnknownLine,
    PacketBuildFailure,
    InvalidEscapeCode,
}

/// Errors raised by [`Board`](crate::Board) operations.
///
/// Validation errors are raised before anything is sent.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("line index {index} is outside 0..=14")]
    InvalidIndex { index: usize },

    #[error("{field} is {actual} characters, limit is {limit}")]
    TextTooLong {
        field: &'static str,
        limit: usize,
        actual: usize,
    },

    #[error("due to colors, line {index} cannot be longer than {max} characters")]
    LineTooLong { index: usize, max: usize },

    #[error("line {index} has no static key")]
    MissingStaticKey { index: usize },

    #[error("line {index} does not exist")]
    UnknownLine { index: usize },

    #[error("line {index} is keyed; use set_value or remove it first")]
    KeyedLine { index: usize },

    #[error("entry {entry:?} is already used by line {other}")]
    DuplicateEntry { entry: String, other: usize },

    #[error(transparent)]
    InvalidEscape(#[from] EscapeError),

    #[error("failed to build or send packet: {0}")]
    PacketBuild(#[from] PacketError),
}

impl BoardError {
    pub(crate) fn text_too_long(field: &'static str, limit: usize, actual: usize) -> Self {
        Self::TextTooLong {
            field,
            limit,
            actual,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIndex { .. }
            | Self::TextTooLong { .. }
            | Self::KeyedLine { .. }
            | Self::DuplicateEntry { .. } => ErrorKind::InvalidArgument,
            Self::LineTooLong { .. } => ErrorKind::LineTooLong,
            Self::MissingStaticKey { .. } => ErrorKind::MissingStaticKey,
            Self::UnknownLine { .. } => ErrorKind::UnknownLine,
            Self::InvalidEscape(_) => ErrorKind::InvalidEscapeCode,
            Self::PacketBuild(_) => ErrorKind::PacketBuildFailure,
        }
    }
}

/// Errors raised by [`BoardRegistry`](crate::BoardRegistry).
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("viewer {0} is not online")]
    ViewerOffline(ViewerId),

    #[error("board for viewer {viewer}: {source}")]
    Board {
        viewer: ViewerId,
        #[source]
        source: BoardError,
    },
}

/// Errors raised while loading [`SidebarConfig`](crate::SidebarConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}
