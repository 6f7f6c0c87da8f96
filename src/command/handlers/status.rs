//! Status request command handler

use super::HandlerContext;
use crate::command::CommandResult;
use tracing::info;

/// Handle STATUS command
///
/// Read-only: the status record is never modified here.
pub async fn handle_status_request(ctx: &HandlerContext) -> CommandResult {
    info!("Now, checking telescope status");

    match ctx.store.read().await {
        Ok(status) => {
            info!("Finished checking telescope status!");
            CommandResult::Status(status)
        }
        Err(e) => CommandResult::Failed {
            message: e.to_string(),
        },
    }
}
