//! Server configuration and command-line arguments

use crate::mount::ActionDurations;
use crate::store::StoreBackend;
use clap::Parser;
use scope_shared::defaults;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Largest accepted `--maxlength`; each connection allocates a buffer this big
pub const MAX_MESSAGE_LENGTH_LIMIT: usize = 64 * 1024;

/// Command-line arguments of the command server
#[derive(Parser, Debug)]
#[command(author, version, about = "Telescope command server")]
pub struct Args {
    /// IP address of server
    #[arg(short = 's', long = "server", default_value = defaults::SERVER_ADDRESS)]
    pub server: String,

    /// Port number on server
    #[arg(short, long, default_value_t = defaults::PORT)]
    pub port: u16,

    /// Maximum length of message in bytes
    #[arg(short = 'l', long = "maxlength", default_value_t = defaults::MAX_MESSAGE_LENGTH, value_parser = parse_max_length)]
    pub maxlength: usize,

    /// File storing the telescope status
    #[arg(long, default_value = defaults::STATUS_FILE, conflicts_with = "volatile")]
    pub status_file: PathBuf,

    /// Keep the status in memory instead of a file
    #[arg(long)]
    pub volatile: bool,

    /// Record "idling" before accepting connections
    #[arg(long)]
    pub reset_status: bool,

    /// Maximum number of connections handled at once (unbounded if omitted)
    #[arg(long, value_parser = parse_max_connections)]
    pub max_connections: Option<usize>,

    /// Simulated duration of gohome, goflatscreen and pointing, in seconds
    #[arg(long, default_value_t = defaults::MOTION_SECS)]
    pub motion_secs: u64,

    /// Simulated duration of a tracking mode change, in seconds
    #[arg(long, default_value_t = defaults::TRACKING_SECS)]
    pub tracking_secs: u64,
}

fn parse_max_length(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|e| format!("{}", e))?;
    if value == 0 {
        return Err("maximum message length must be at least 1 byte".into());
    }
    if value > MAX_MESSAGE_LENGTH_LIMIT {
        return Err(format!(
            "maximum message length must be at most {} bytes",
            MAX_MESSAGE_LENGTH_LIMIT
        ));
    }
    Ok(value)
}

fn parse_max_connections(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|e| format!("{}", e))?;
    if value > Semaphore::MAX_PERMITS {
        return Err(format!(
            "maximum connections must be at most {}",
            Semaphore::MAX_PERMITS
        ));
    }
    Ok(value)
}

/// Configuration consumed by the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub address: String,
    /// Port to bind
    pub port: u16,
    /// Bytes read per command message
    pub max_length: usize,
    /// Where the status record lives
    pub store: StoreBackend,
    /// Write "idling" at startup
    pub reset_status: bool,
    /// Admission cap on concurrent connections
    pub max_connections: Option<usize>,
    /// Simulated action durations
    pub durations: ActionDurations,
}

impl ServerConfig {
    /// `address:port` for display
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: defaults::SERVER_ADDRESS.into(),
            port: defaults::PORT,
            max_length: defaults::MAX_MESSAGE_LENGTH,
            store: StoreBackend::File(PathBuf::from(defaults::STATUS_FILE)),
            reset_status: false,
            max_connections: None,
            durations: ActionDurations::default(),
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        let store = if args.volatile {
            StoreBackend::Memory
        } else {
            StoreBackend::File(args.status_file)
        };

        Self {
            address: args.server,
            port: args.port,
            max_length: args.maxlength,
            store,
            reset_status: args.reset_status,
            max_connections: args.max_connections.filter(|&n| n > 0),
            durations: ActionDurations {
                motion: Duration::from_secs(args.motion_secs),
                tracking: Duration::from_secs(args.tracking_secs),
            },
        }
    }
}
