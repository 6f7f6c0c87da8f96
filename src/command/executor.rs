//! Command executor - dispatches validated commands to their handlers

use super::handlers::{self, HandlerContext};
use crate::mount::Mount;
use crate::store::StatusStore;
use scope_shared::{Command, DeviceStatus};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Result of command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Action ran and the device is idling again
    Completed { message: String },
    /// Current status record; `None` if it was never written
    Status(Option<DeviceStatus>),
    /// Action not started because the busy state could not be recorded
    Aborted { message: String },
    /// Status store failed while reading, or while recording idling after the action
    Failed { message: String },
    /// Command has no handler
    Rejected { message: String },
}

impl CommandResult {
    /// Message carried by the result, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            CommandResult::Completed { message }
            | CommandResult::Aborted { message }
            | CommandResult::Failed { message }
            | CommandResult::Rejected { message } => Some(message),
            CommandResult::Status(_) => None,
        }
    }
}

/// Executes validated commands against the mount and the status store
pub struct CommandExecutor {
    ctx: HandlerContext,
}

impl CommandExecutor {
    /// Create a new command executor
    pub fn new(store: Arc<dyn StatusStore>, mount: Arc<dyn Mount>) -> Self {
        Self {
            ctx: HandlerContext { store, mount },
        }
    }

    /// Execute a command to completion
    pub async fn execute(&self, command: Command) -> CommandResult {
        let started = Instant::now();
        debug!("Executing command: {}", command);

        // Dispatch to appropriate handler
        let result = match command {
            Command::GoHome => handlers::handle_go_home(&self.ctx).await,
            Command::GoFlatscreen => handlers::handle_go_flatscreen(&self.ctx).await,
            Command::Pointing => handlers::handle_pointing(&self.ctx).await,
            Command::Tracking => handlers::handle_tracking(&self.ctx).await,
            Command::Status => handlers::handle_status_request(&self.ctx).await,
            Command::Invalid => CommandResult::Rejected {
                message: "Unknown command".into(),
            },
        };

        let elapsed = started.elapsed();
        match &result {
            CommandResult::Completed { message } => {
                info!("Command {} completed in {:?}: {}", command, elapsed, message);
            }
            CommandResult::Status(status) => {
                debug!("Command {} returned status {:?}", command, status);
            }
            CommandResult::Aborted { message } => {
                error!("Command {} aborted: {}", command, message);
            }
            CommandResult::Failed { message } => {
                error!("Command {} failed: {}", command, message);
            }
            CommandResult::Rejected { message } => {
                warn!("Command {} rejected: {}", command, message);
            }
        }

        result
    }
}
