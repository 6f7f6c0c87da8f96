//! TCP accept loop

use super::session::CommandSession;
use crate::command::CommandExecutor;
use crate::config::ServerConfig;
use crate::error::ServerError;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

/// Pause after a failed accept so a persistent error does not spin the loop
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Accepts client connections and runs one session task per connection
pub struct CommandServer {
    listener: TcpListener,
    executor: Arc<CommandExecutor>,
    max_length: usize,
    /// Present when the number of concurrent sessions is capped
    admission: Option<Arc<Semaphore>>,
}

impl CommandServer {
    /// Bind the listening socket
    pub async fn bind(
        config: &ServerConfig,
        executor: Arc<CommandExecutor>,
    ) -> Result<Self, ServerError> {
        let listener = TcpListener::bind((config.address.as_str(), config.port))
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.bind_addr(),
                source,
            })?;

        Ok(Self {
            listener,
            executor,
            max_length: config.max_length,
            admission: config
                .max_connections
                .map(|n| Arc::new(Semaphore::new(n.min(Semaphore::MAX_PERMITS)))),
        })
    }

    /// Address the server is listening on
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever
    pub async fn run(self) {
        loop {
            // With a cap, wait for a free slot before taking the next connection
            let permit = match &self.admission {
                Some(admission) => admission.clone().acquire_owned().await.ok(),
                None => None,
            };

            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
            };
            info!("Connection from: {}", peer);

            let executor = self.executor.clone();
            let max_length = self.max_length;
            tokio::spawn(async move {
                let _permit = permit;
                let session = CommandSession::new(stream, peer, max_length);

                match session.run(&executor).await {
                    Ok(outcome) => debug!("Connection {} finished: {:?}", peer, outcome),
                    Err(e) => warn!("{}", e),
                }
            });
        }
    }
}
