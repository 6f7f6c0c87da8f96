//! Tracking mode command handler

use super::{run_action, HandlerContext};
use crate::command::CommandResult;
use scope_shared::Command;

/// Handle TRACKING command
pub async fn handle_tracking(ctx: &HandlerContext) -> CommandResult {
    run_action(ctx, Command::Tracking, "changing tracking mode").await
}
