//! `cms-tester clear` command implementation.

use clap::Args;
use contentful_core::CONFIG_STORE_KEY;

use super::Context;
use crate::error::CliError;

/// Arguments for the clear command.
#[derive(Args)]
pub(crate) struct ClearArgs {}

impl ClearArgs {
    /// Execute the clear command.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        if ctx.store.remove(CONFIG_STORE_KEY)? {
            ctx.output.success("Configuration cleared");
        } else {
            ctx.output.info("No configuration stored");
        }
        Ok(())
    }
}
