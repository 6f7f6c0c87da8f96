//! Telescope Mount Module
//!
//! The seam between command handling and the hardware. Handlers bracket each
//! call with busy/idle status writes; a real driver only has to implement
//! [`Mount`].

mod simulated;

pub use simulated::{ActionDurations, SimulatedMount};

use async_trait::async_trait;
use scope_shared::Command;

/// Performs the physical action behind a command
#[async_trait]
pub trait Mount: Send + Sync + 'static {
    /// Run the action for `command` to completion.
    ///
    /// Actions have no failure path: once started they are treated as done
    /// when this returns.
    async fn perform(&self, command: Command);

    /// Human-readable name for this mount
    fn name(&self) -> &'static str;
}
