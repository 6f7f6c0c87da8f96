//! Device status record
//!
//! The status is persisted as a single line:
//! ```text
//! status: idling
//! status: busy (<reason>)
//! ```

use std::fmt;
use thiserror::Error;

use crate::Command;

const RECORD_PREFIX: &str = "status: ";
const IDLING: &str = "idling";
const BUSY_OPEN: &str = "busy (";

/// Errors that can occur while parsing a status record
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StatusParseError {
    #[error("Status record is empty")]
    Empty,

    #[error("Missing 'status: ' prefix in record: {0:?}")]
    MissingPrefix(String),

    #[error("Unknown status value: {0:?}")]
    UnknownValue(String),
}

/// Current state of the telescope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceStatus {
    /// No action in progress
    Idling,
    /// An action is in progress; the reason names it
    Busy(String),
}

impl DeviceStatus {
    /// Busy status for a command's action, if the command has one
    pub fn busy_for(command: Command) -> Option<Self> {
        command.busy_reason().map(|reason| DeviceStatus::Busy(reason.to_owned()))
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, DeviceStatus::Busy(_))
    }

    /// Render the full persisted record, including the trailing newline
    pub fn to_record(&self) -> String {
        format!("{}{}\n", RECORD_PREFIX, self)
    }

    /// Parse a persisted record. Surrounding whitespace is ignored.
    pub fn parse_record(record: &str) -> Result<Self, StatusParseError> {
        let record = record.trim();
        if record.is_empty() {
            return Err(StatusParseError::Empty);
        }

        let value = record
            .strip_prefix(RECORD_PREFIX)
            .ok_or_else(|| StatusParseError::MissingPrefix(record.to_owned()))?
            .trim();

        if value == IDLING {
            return Ok(DeviceStatus::Idling);
        }

        match value.strip_prefix(BUSY_OPEN).and_then(|v| v.strip_suffix(')')) {
            Some(reason) => Ok(DeviceStatus::Busy(reason.to_owned())),
            None => Err(StatusParseError::UnknownValue(value.to_owned())),
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceStatus::Idling => f.write_str(IDLING),
            DeviceStatus::Busy(reason) => write!(f, "{}{})", BUSY_OPEN, reason),
        }
    }
}
