/*!
 * Error types for the ccinspect library.
 *
 * Decode faults are raised when a command code that the protocol enumerates
 * exhaustively has no table entry. Character-table misses never reach this
 * module; they are substituted with a placeholder glyph at lookup time.
 */

use std::fmt;

use thiserror::Error;

use crate::caption_time::CaptionTime;

/// Where a code event was addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// CEA-608 channel 1-4
    Line21Channel(u8),
    /// CEA-708 service 1-16
    DtvccService(u8),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line21Channel(channel) => write!(f, "Line 21 channel {}", channel),
            Self::DtvccService(service) => write!(f, "DTVCC service {}", service),
        }
    }
}

/// Errors raised while turning code events into caption elements
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A command code missing from a fully enumerated table
    #[error("Unrecognized {table} code 0x{code:02X} on {origin} at {time}")]
    UnrecognizedCode {
        /// Name of the table that missed
        table: &'static str,
        /// Offending code
        code: u8,
        /// Channel or service the event was addressed to
        origin: Origin,
        /// Timestamp of the event
        time: CaptionTime,
    },

    /// Line 21 code-kind discriminant outside the known set
    #[error("Unknown Line 21 code type: {0}")]
    UnknownLine21Kind(u8),

    /// DTVCC type discriminant outside the known set
    #[error("Unknown DTVCC data type: {0}")]
    UnknownDtvccType(u8),

    /// Line 21 channel number outside 1-4
    #[error("Line 21 channel {0} is out of range (1-4)")]
    ChannelOutOfRange(u8),

    /// DTVCC service number outside 1-16
    #[error("DTVCC service {0} is out of range (1-16)")]
    ServiceOutOfRange(u8),

    /// Command payload shorter than its layout requires
    #[error("Truncated {command} payload: expected {expected} bytes, got {actual}")]
    TruncatedPayload {
        /// Mnemonic of the command being decoded
        command: &'static str,
        /// Bytes required by the layout
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Malformed event log
    #[error("Event log error at line {line}: {message}")]
    EventLog {
        /// 1-based line number
        line: usize,
        /// Parser message
        message: String,
    },

    /// Decode fault surfaced by the engine
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            Self::File(error.to_string())
        } else {
            Self::Config(error.to_string())
        }
    }
}
