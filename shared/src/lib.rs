//! Scope Shared Protocol Types
//!
//! This crate provides the command vocabulary, the persisted status record
//! format and the reply encoding shared by the command server and the client.

pub mod command;
pub mod protocol;
pub mod status;

// Re-export commonly used types at crate root
pub use command::{validate, Command, Request};
pub use status::{DeviceStatus, StatusParseError};

/// Default connection parameters for the system
pub mod defaults {
    /// Address the server binds to and the client connects to
    pub const SERVER_ADDRESS: &str = "192.168.29.50";

    /// TCP port of the command server
    pub const PORT: u16 = 12345;

    /// Maximum length of one command message in bytes
    pub const MAX_MESSAGE_LENGTH: usize = 256;

    /// File holding the telescope status record
    pub const STATUS_FILE: &str = "status.txt";

    /// Simulated duration of the slewing actions (gohome, goflatscreen, pointing)
    pub const MOTION_SECS: u64 = 15;

    /// Simulated duration of a tracking mode change
    pub const TRACKING_SECS: u64 = 5;
}
