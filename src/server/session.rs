//! Per-connection command session

use crate::command::{CommandExecutor, CommandResult};
use crate::error::ServerError;
use bytes::Bytes;
use scope_shared::{protocol, validate, Command};
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Peer closed without sending anything
    PeerClosed,
    /// Message was not a valid command
    Rejected,
    /// Valid command was executed
    Executed(CommandResult),
}

/// One client connection carrying exactly one command.
///
/// Lifecycle: await command, validate, acknowledge, execute (valid commands
/// only), close. The session is consumed by [`CommandSession::run`].
pub struct CommandSession<S> {
    stream: S,
    peer: SocketAddr,
    max_length: usize,
}

impl<S> CommandSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S, peer: SocketAddr, max_length: usize) -> Self {
        Self {
            stream,
            peer,
            max_length,
        }
    }

    /// Process the connection's command and close it
    pub async fn run(mut self, executor: &CommandExecutor) -> Result<SessionOutcome, ServerError> {
        let mut buf = vec![0u8; self.max_length];
        let n = self
            .stream
            .read(&mut buf)
            .await
            .map_err(ServerError::transport(self.peer))?;

        if n == 0 {
            debug!("Client {} closed without sending a command", self.peer);
            return Ok(SessionOutcome::PeerClosed);
        }

        let request = validate(&buf[..n]);
        info!("Message received from client {}: {}", self.peer, request.text);

        self.send(protocol::encode_ack(&request)).await?;

        if !request.is_valid() {
            warn!("Invalid command from {}: {:?}", self.peer, request.text);
            self.close().await;
            return Ok(SessionOutcome::Rejected);
        }

        let result = match request.command {
            Command::Status => {
                let result = executor.execute(Command::Status).await;
                let reply = match &result {
                    CommandResult::Status(status) => protocol::encode_status(status.as_ref()),
                    other => protocol::encode_status_unavailable(
                        other.message().unwrap_or("no status available"),
                    ),
                };
                self.send(reply).await?;
                self.close().await;
                result
            }
            command => {
                // No further replies: let the client see EOF while the action runs
                self.close().await;
                executor.execute(command).await
            }
        };

        Ok(SessionOutcome::Executed(result))
    }

    async fn send(&mut self, reply: Bytes) -> Result<(), ServerError> {
        self.stream
            .write_all(&reply)
            .await
            .map_err(ServerError::transport(self.peer))
    }

    /// Shut down the write side; the peer may already be gone
    async fn close(&mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!("Shutdown of {} failed: {}", self.peer, e);
        }
    }
}
