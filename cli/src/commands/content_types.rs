//! `cms-tester content-types` command implementation.

use clap::Args;
use contentful_core::Transport;
use serde_json::Value;

use super::Context;
use crate::error::CliError;
use crate::transport::UreqTransport;

/// Arguments for the content-types command.
#[derive(Args)]
pub(crate) struct ContentTypesArgs {}

impl ContentTypesArgs {
    /// Execute the content-types command.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is configured or the listing fails.
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        self.run(ctx, UreqTransport::new()).map(|_| ())
    }

    pub(crate) fn run<T: Transport>(
        self,
        ctx: &Context,
        transport: T,
    ) -> Result<Vec<Value>, CliError> {
        let types = ctx.service(transport)?.fetch_content_types()?;
        ctx.output
            .success(&format!("Fetched {} content types", types.len()));
        ctx.output.data(&serde_json::to_string_pretty(&types)?);
        Ok(types)
    }
}
