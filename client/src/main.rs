use anyhow::Context;
use clap::Parser;
use scope_shared::{defaults, protocol};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Client program for the telescope command server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// IP address of server
    #[arg(short = 's', long = "server", default_value = defaults::SERVER_ADDRESS)]
    server: String,

    /// Port number on server
    #[arg(short, long, default_value_t = defaults::PORT)]
    port: u16,

    /// Maximum length of message in bytes
    #[arg(short = 'l', long = "maxlength", default_value_t = defaults::MAX_MESSAGE_LENGTH)]
    maxlength: usize,

    /// Send the command without waiting for replies
    #[arg(long)]
    no_wait: bool,

    /// Command to be sent to server, e.g. `status` or `tracking fast`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

/// Send one command message and collect the replies until the server closes
async fn send_command(server: &str, port: u16, message: &[u8], wait: bool) -> anyhow::Result<String> {
    let mut stream = TcpStream::connect((server, port))
        .await
        .with_context(|| format!("Failed to connect to {}:{}", server, port))?;
    stream.write_all(message).await?;
    debug!("Sent {} bytes to {}:{}", message.len(), server, port);

    if !wait {
        return Ok(String::new());
    }

    let mut replies = Vec::new();
    stream.read_to_end(&mut replies).await?;
    Ok(String::from_utf8_lossy(&replies).into_owned())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the server's replies
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let cli = Cli::parse();
    let message = protocol::encode_command(&cli.command, cli.maxlength)?;

    let replies = send_command(&cli.server, cli.port, &message, !cli.no_wait).await?;
    print!("{}", replies);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Accept one connection, record what arrived and answer with `reply`
    async fn one_shot_server(reply: &'static str) -> (u16, tokio::task::JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 256];
            let n = socket.read(&mut buf).await.unwrap();
            let _ = socket.write_all(reply.as_bytes()).await;
            buf.truncate(n);
            buf
        });
        (port, handle)
    }

    #[tokio::test]
    async fn test_send_collects_replies() {
        let (port, server) =
            one_shot_server("following command received:\nstatus\nstatus: idling\n").await;

        let replies = send_command("127.0.0.1", port, b"status", true).await.unwrap();

        assert_eq!(replies, "following command received:\nstatus\nstatus: idling\n");
        assert_eq!(server.await.unwrap(), b"status");
    }

    #[tokio::test]
    async fn test_no_wait_skips_replies() {
        let (port, server) = one_shot_server("following command received:\ngohome\n").await;

        let replies = send_command("127.0.0.1", port, b"gohome", false).await.unwrap();

        assert!(replies.is_empty());
        assert_eq!(server.await.unwrap(), b"gohome");
    }

    #[test]
    fn test_cli_joins_command_tokens() {
        let cli = Cli::try_parse_from(["scopectl", "-p", "5000", "pointing", "-10:00:00", "+41:16"])
            .unwrap();
        assert_eq!(cli.port, 5000);
        assert_eq!(cli.server, defaults::SERVER_ADDRESS);

        let message = protocol::encode_command(&cli.command, cli.maxlength).unwrap();
        assert_eq!(&message[..], b"pointing -10:00:00 +41:16");
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["scopectl"]).is_err());
    }

    #[test]
    fn test_message_length_enforced() {
        let cli = Cli::try_parse_from(["scopectl", "-l", "4", "status"]).unwrap();
        assert!(protocol::encode_command(&cli.command, cli.maxlength).is_err());
    }
}
