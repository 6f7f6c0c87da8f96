//! Command handlers for different command types

mod motion;
mod status;
mod tracking;

pub use motion::{handle_go_flatscreen, handle_go_home, handle_pointing};
pub use status::handle_status_request;
pub use tracking::handle_tracking;

use crate::command::CommandResult;
use crate::mount::Mount;
use crate::store::StatusStore;
use scope_shared::{Command, DeviceStatus};
use std::sync::Arc;
use tracing::info;

/// Context passed to command handlers
#[derive(Clone)]
pub struct HandlerContext {
    pub store: Arc<dyn StatusStore>,
    pub mount: Arc<dyn Mount>,
}

/// Run `command`'s mount action between a busy write and an idle write.
///
/// `doing` is the progress phrase used in the log, e.g. "going to home position".
async fn run_action(ctx: &HandlerContext, command: Command, doing: &str) -> CommandResult {
    let busy = match DeviceStatus::busy_for(command) {
        Some(busy) => busy,
        None => {
            return CommandResult::Rejected {
                message: format!("{} has no mount action", command),
            };
        }
    };

    info!("Now, {}...", doing);

    if let Err(e) = ctx.store.write(&busy).await {
        return CommandResult::Aborted {
            message: format!("could not record busy state: {}", e),
        };
    }

    ctx.mount.perform(command).await;

    if let Err(e) = ctx.store.write(&DeviceStatus::Idling).await {
        return CommandResult::Failed {
            message: format!("finished but could not record idling: {}", e),
        };
    }

    info!("Finished {}!", doing);
    CommandResult::Completed {
        message: format!("Finished {}", doing),
    }
}
