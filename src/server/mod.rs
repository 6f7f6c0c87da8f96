//! Command server
//!
//! This module handles:
//! - Binding the listening socket
//! - Spawning one session task per accepted connection
//! - The one-command-per-connection protocol

mod listener;
mod session;

pub use listener::CommandServer;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandExecutor;
    use crate::config::ServerConfig;
    use crate::error::ServerError;
    use crate::mount::{ActionDurations, SimulatedMount};
    use crate::store::{MemoryStatusStore, StatusStore};
    use scope_shared::DeviceStatus;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::time::{sleep, timeout};

    fn loopback_config(max_connections: Option<usize>) -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".into(),
            port: 0,
            max_connections,
            ..Default::default()
        }
    }

    async fn start(
        durations: ActionDurations,
        max_connections: Option<usize>,
    ) -> (SocketAddr, Arc<MemoryStatusStore>) {
        let store = Arc::new(MemoryStatusStore::with_status(DeviceStatus::Idling));
        let executor = Arc::new(CommandExecutor::new(
            store.clone(),
            Arc::new(SimulatedMount::new(durations)),
        ));

        let server = CommandServer::bind(&loopback_config(max_connections), executor)
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.run());
        (addr, store)
    }

    fn quick() -> ActionDurations {
        ActionDurations {
            motion: Duration::from_millis(50),
            tracking: Duration::from_millis(50),
        }
    }

    /// Send one message and read until the server closes the write side
    async fn send(addr: SocketAddr, message: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(message.as_bytes()).await.unwrap();

        let mut replies = Vec::new();
        stream.read_to_end(&mut replies).await.unwrap();
        String::from_utf8(replies).unwrap()
    }

    #[tokio::test]
    async fn test_status_on_idling_store() {
        let (addr, _store) = start(quick(), None).await;

        let replies = send(addr, "status").await;

        assert_eq!(replies, "following command received:\nstatus\nstatus: idling\n");
    }

    #[tokio::test]
    async fn test_tracking_busy_then_idle() {
        let durations = ActionDurations {
            motion: Duration::from_millis(50),
            tracking: Duration::from_millis(500),
        };
        let (addr, _store) = start(durations, None).await;

        let ack = send(addr, "tracking fast").await;
        assert_eq!(ack, "following command received:\ntracking fast\n");

        // The ack precedes the busy write, so give the action a moment to start
        let mut saw_busy = false;
        for _ in 0..20 {
            let replies = send(addr, "status").await;
            if replies.contains("status: busy (changing tracking mode)\n") {
                saw_busy = true;
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }
        assert!(saw_busy, "status never reported the tracking change");

        sleep(Duration::from_millis(700)).await;
        assert_eq!(
            send(addr, "status").await,
            "following command received:\nstatus\nstatus: idling\n"
        );
    }

    #[tokio::test]
    async fn test_invalid_command_closes_without_mutation() {
        let (addr, store) = start(quick(), None).await;

        let replies = send(addr, "explode").await;

        assert_eq!(replies, "command is invalid!\nexplode");
        assert_eq!(store.read().await.unwrap(), Some(DeviceStatus::Idling));
    }

    #[tokio::test]
    async fn test_empty_connection_gets_no_reply() {
        let (addr, _store) = start(quick(), None).await;

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.shutdown().await.unwrap();
        let mut replies = Vec::new();
        stream.read_to_end(&mut replies).await.unwrap();
        assert!(replies.is_empty());

        // Other connections are unaffected
        assert_eq!(
            send(addr, "status").await,
            "following command received:\nstatus\nstatus: idling\n"
        );
    }

    #[tokio::test]
    async fn test_responsive_during_long_action() {
        let durations = ActionDurations {
            motion: Duration::from_secs(3),
            tracking: Duration::from_secs(3),
        };
        let (addr, store) = start(durations, None).await;

        let ack = send(addr, "gohome").await;
        assert_eq!(ack, "following command received:\ngohome\n");

        let replies = timeout(Duration::from_secs(1), send(addr, "status"))
            .await
            .expect("server stalled while gohome was running");
        assert!(replies.starts_with("following command received:\nstatus\n"));

        // Still moving well within the simulated duration
        sleep(Duration::from_millis(100)).await;
        assert_eq!(
            store.read().await.unwrap(),
            Some(DeviceStatus::Busy("moving to home position".into()))
        );
    }

    #[tokio::test]
    async fn test_admission_cap_defers_extra_connections() {
        let (addr, _store) = start(quick(), Some(1)).await;

        // Holds the only slot by never sending a command
        let idle = TcpStream::connect(addr).await.unwrap();
        sleep(Duration::from_millis(50)).await;

        let queued = tokio::spawn(send(addr, "status"));
        sleep(Duration::from_millis(200)).await;
        assert!(!queued.is_finished(), "second connection should wait for a slot");

        drop(idle);
        let replies = timeout(Duration::from_secs(2), queued)
            .await
            .expect("queued connection never served")
            .unwrap();
        assert_eq!(replies, "following command received:\nstatus\nstatus: idling\n");
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let executor = Arc::new(CommandExecutor::new(
            Arc::new(MemoryStatusStore::new()),
            Arc::new(SimulatedMount::new(quick())),
        ));
        let first = CommandServer::bind(&loopback_config(None), executor.clone())
            .await
            .unwrap();
        let taken = ServerConfig {
            port: first.local_addr().unwrap().port(),
            ..loopback_config(None)
        };

        let result = CommandServer::bind(&taken, executor).await;

        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }
}
