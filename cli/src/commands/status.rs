//! `cms-tester status` command implementation.

use clap::Args;
use contentful_core::{ConnectionResult, ConnectionStatus, Transport};

use super::Context;
use crate::error::CliError;
use crate::output::Output;
use crate::transport::UreqTransport;

/// Arguments for the status command.
#[derive(Args)]
pub(crate) struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored configuration is unusable or the
    /// connection test fails.
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        self.run(ctx, UreqTransport::new()).map(|_| ())
    }

    pub(crate) fn run<T: Transport>(
        self,
        ctx: &Context,
        transport: T,
    ) -> Result<ConnectionStatus, CliError> {
        let service = ctx.service(transport)?;
        let Some(config) = service.config() else {
            ctx.output.status(ConnectionStatus::Disconnected);
            ctx.output
                .info("No configuration stored. Run `cms-tester configure` first.");
            return Ok(ConnectionStatus::Disconnected);
        };
        ctx.output.detail(&format!(
            "Space: {}  Environment: {}",
            config.space_id,
            config.environment()
        ));

        ctx.output.status(ConnectionStatus::Loading);
        let result = service.test_connection();
        report_connection(&ctx.output, &result)
    }
}

/// Print the outcome of a connection test. A failure becomes an error.
pub(crate) fn report_connection(
    output: &Output,
    result: &ConnectionResult,
) -> Result<ConnectionStatus, CliError> {
    let status = ConnectionStatus::from(result);
    output.status(status);
    match result.error() {
        None => {
            output.success("Connected to Contentful");
            Ok(status)
        }
        Some(message) => {
            output.error("Connection failed");
            Err(CliError::Connection(message.to_owned()))
        }
    }
}
