//! Wire encoding for command messages and server replies
//!
//! There is no framing: a client writes one message of at most the
//! configured length and the server answers with plain UTF-8 text:
//! ```text
//! reply 1 (always):   following command received:\n<text>\n
//!                     command is invalid!\n<text>
//! reply 2 (status):   status: idling\n
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use thiserror::Error;

use crate::{DeviceStatus, Request};

/// Header of the acknowledgement for a valid command
pub const RECEIVED_HEADER: &str = "following command received:\n";

/// Header of the reply for an invalid command
pub const INVALID_HEADER: &str = "command is invalid!\n";

/// Status reply when no record has ever been written
pub const STATUS_UNKNOWN: &str = "status: unknown\n";

/// Errors that can occur while building a command message
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Command message is empty")]
    EmptyMessage,

    #[error("Message too large: {size} bytes (max: {max})")]
    MessageTooLarge { size: usize, max: usize },
}

/// Join command tokens into a single message, checking it fits in `max_len` bytes
pub fn encode_command<S: AsRef<str>>(tokens: &[S], max_len: usize) -> Result<Bytes, ProtocolError> {
    let message = tokens
        .iter()
        .map(|t| -> &str { t.as_ref() })
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if message.is_empty() {
        return Err(ProtocolError::EmptyMessage);
    }
    if message.len() > max_len {
        return Err(ProtocolError::MessageTooLarge {
            size: message.len(),
            max: max_len,
        });
    }

    Ok(Bytes::from(message))
}

/// Build the acknowledgement sent for every non-empty message
pub fn encode_ack(request: &Request) -> Bytes {
    let mut buf = BytesMut::with_capacity(RECEIVED_HEADER.len() + request.text.len() + 1);
    if request.is_valid() {
        buf.put_slice(RECEIVED_HEADER.as_bytes());
        buf.put_slice(request.text.as_bytes());
        buf.put_u8(b'\n');
    } else {
        buf.put_slice(INVALID_HEADER.as_bytes());
        buf.put_slice(request.text.as_bytes());
    }
    buf.freeze()
}

/// Build the second reply of a `status` request from the stored record
pub fn encode_status(status: Option<&DeviceStatus>) -> Bytes {
    match status {
        Some(status) => Bytes::from(status.to_record()),
        None => Bytes::from_static(STATUS_UNKNOWN.as_bytes()),
    }
}

/// Build the `status` reply sent when the record cannot be read
pub fn encode_status_unavailable(cause: &str) -> Bytes {
    Bytes::from(format!("status: unavailable ({})\n", cause))
}
