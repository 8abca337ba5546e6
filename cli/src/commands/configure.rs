//! `cms-tester configure` command implementation.

use clap::Args;
use contentful_core::{ContentfulConfig, ContentfulService, Transport, CONFIG_STORE_KEY};

use super::status::report_connection;
use super::Context;
use crate::error::CliError;
use crate::transport::UreqTransport;

/// Arguments for the configure command.
#[derive(Args)]
pub(crate) struct ConfigureArgs {
    /// Contentful space ID.
    #[arg(long, env = "CONTENTFUL_SPACE_ID")]
    space_id: String,

    /// Content Delivery API access token.
    #[arg(long, env = "CONTENTFUL_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,

    /// Environment to read from (default: master).
    #[arg(long, env = "CONTENTFUL_ENVIRONMENT")]
    environment: Option<String>,

    /// Save without testing the connection.
    #[arg(long)]
    skip_test: bool,
}

impl ConfigureArgs {
    /// Execute the configure command.
    ///
    /// # Errors
    ///
    /// Returns an error if either credential is blank, the store cannot be
    /// written, or the connection test fails.
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        self.run(ctx, UreqTransport::new())
    }

    pub(crate) fn run<T: Transport>(self, ctx: &Context, transport: T) -> Result<(), CliError> {
        let mut config = ContentfulConfig::new(self.space_id, self.access_token);
        if let Some(environment) = self.environment {
            config = config.with_environment(environment);
        }
        if !config.is_complete() {
            return Err(CliError::Validation(
                "Space ID and Access Token are required".to_owned(),
            ));
        }
        let config = config.normalized();

        ctx.store.set(CONFIG_STORE_KEY, &config)?;
        ctx.output.success("Configuration saved");
        ctx.output.detail(&format!(
            "Space: {}  Environment: {}  Store: {}",
            config.space_id,
            config.environment(),
            ctx.store.path().display()
        ));

        if self.skip_test {
            return Ok(());
        }
        let service =
            ContentfulService::with_config(transport, config).with_base_url(&ctx.delivery_url);
        report_connection(&ctx.output, &service.test_connection()).map(|_| ())
    }
}
