//! Command vocabulary and validation
//!
//! A command message is UTF-8 text whose first whitespace-delimited token
//! selects the command. Trailing tokens are carried along untouched.

use std::fmt;

/// A telescope command identified by the leading token of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Slew to the home position
    GoHome,
    /// Slew to the flatfield screen
    GoFlatscreen,
    /// Point at the target object
    Pointing,
    /// Report the current status record
    Status,
    /// Change the tracking mode
    Tracking,
    /// Anything outside the vocabulary, empty input or undecodable bytes
    Invalid,
}

impl Command {
    /// Every valid command, in protocol order
    pub const VOCABULARY: [Command; 5] = [
        Command::GoHome,
        Command::GoFlatscreen,
        Command::Pointing,
        Command::Status,
        Command::Tracking,
    ];

    /// Map a token to a command. Matching is exact and case-sensitive.
    pub fn from_token(token: &str) -> Self {
        match token {
            "gohome" => Command::GoHome,
            "goflatscreen" => Command::GoFlatscreen,
            "pointing" => Command::Pointing,
            "status" => Command::Status,
            "tracking" => Command::Tracking,
            _ => Command::Invalid,
        }
    }

    /// Wire token of the command
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::GoHome => "gohome",
            Command::GoFlatscreen => "goflatscreen",
            Command::Pointing => "pointing",
            Command::Status => "status",
            Command::Tracking => "tracking",
            Command::Invalid => "invalid",
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Command::Invalid)
    }

    /// Reason recorded in the status file while this command's action runs.
    ///
    /// `None` for commands that never mark the device busy.
    pub fn busy_reason(&self) -> Option<&'static str> {
        match self {
            Command::GoHome => Some("moving to home position"),
            Command::GoFlatscreen => Some("moving to flatfield screen"),
            Command::Pointing => Some("pointing target object"),
            Command::Tracking => Some("changing tracking mode"),
            Command::Status | Command::Invalid => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A received message together with the command it selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub command: Command,
    /// Decoded message text, echoed back to the client verbatim
    pub text: String,
}

impl Request {
    pub fn is_valid(&self) -> bool {
        self.command.is_valid()
    }

    /// Tokens after the command token
    pub fn args(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace().skip(1)
    }
}

/// Validate a raw command message.
///
/// Bytes that are not UTF-8 yield [`Command::Invalid`]; the echoed text is
/// then a lossy decoding so the client still sees what arrived.
pub fn validate(raw: &[u8]) -> Request {
    match std::str::from_utf8(raw) {
        Ok(text) => {
            let command = text
                .split_whitespace()
                .next()
                .map(Command::from_token)
                .unwrap_or(Command::Invalid);
            Request {
                command,
                text: text.to_owned(),
            }
        }
        Err(_) => Request {
            command: Command::Invalid,
            text: String::from_utf8_lossy(raw).into_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_valid() {
        for command in Command::VOCABULARY {
            let request = validate(command.as_str().as_bytes());
            assert_eq!(request.command, command);
            assert!(request.is_valid());
        }
    }

    #[test]
    fn test_trailing_arguments_ignored() {
        let request = validate(b"tracking fast");
        assert_eq!(request.command, Command::Tracking);
        assert_eq!(request.args().collect::<Vec<_>>(), vec!["fast"]);
        assert_eq!(request.text, "tracking fast");

        let request = validate(b"pointing  10:42:00 +41:16:09\n");
        assert_eq!(request.command, Command::Pointing);
        assert_eq!(request.args().count(), 2);
    }

    #[test]
    fn test_leading_whitespace_skipped() {
        assert_eq!(validate(b"  \tgohome").command, Command::GoHome);
    }

    #[test]
    fn test_invalid_commands() {
        for raw in [
            &b"explode"[..],
            b"",
            b"   ",
            b"\n",
            b"Status",
            b"GOHOME",
            b"go home",
            b"statusx",
            b"invalid",
        ] {
            let request = validate(raw);
            assert_eq!(request.command, Command::Invalid, "{:?}", raw);
            assert!(!request.is_valid());
        }
    }

    #[test]
    fn test_non_utf8_is_invalid() {
        let request = validate(&[0x73, 0x74, 0xff, 0xfe]);
        assert_eq!(request.command, Command::Invalid);
        assert!(request.text.starts_with("st"));
    }

    #[test]
    fn test_invalid_text_echoed_verbatim() {
        let request = validate(b"explode now");
        assert_eq!(request.text, "explode now");
    }

    #[test]
    fn test_busy_reasons() {
        assert_eq!(Command::GoHome.busy_reason(), Some("moving to home position"));
        assert_eq!(
            Command::GoFlatscreen.busy_reason(),
            Some("moving to flatfield screen")
        );
        assert_eq!(Command::Pointing.busy_reason(), Some("pointing target object"));
        assert_eq!(Command::Tracking.busy_reason(), Some("changing tracking mode"));
        assert_eq!(Command::Status.busy_reason(), None);
        assert_eq!(Command::Invalid.busy_reason(), None);
    }
}
