//! Command execution for the telescope
//!
//! This module handles:
//! - Dispatching validated commands to their handlers
//! - Bracketing every mount action with busy/idle status writes
//! - Reading the status record for `status` requests

mod executor;
pub mod handlers;

pub use executor::{CommandExecutor, CommandResult};
