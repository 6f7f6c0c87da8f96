//! Slewing command handlers (home, flatfield screen, target)

use super::{run_action, HandlerContext};
use crate::command::CommandResult;
use scope_shared::Command;

/// Handle GOHOME command
pub async fn handle_go_home(ctx: &HandlerContext) -> CommandResult {
    run_action(ctx, Command::GoHome, "going to home position").await
}

/// Handle GOFLATSCREEN command
pub async fn handle_go_flatscreen(ctx: &HandlerContext) -> CommandResult {
    run_action(ctx, Command::GoFlatscreen, "going to flatfield screen").await
}

/// Handle POINTING command
///
/// Target coordinates may follow the command token; the simulated mount
/// does not use them.
pub async fn handle_pointing(ctx: &HandlerContext) -> CommandResult {
    run_action(ctx, Command::Pointing, "pointing telescope to the target").await
}
