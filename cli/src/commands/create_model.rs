//! `cms-tester create-model` command implementation.
//!
//! Creates and publishes predefined content types through the content
//! management API, optionally followed by a sample blog post.

use chrono::{SecondsFormat, Utc};
use clap::Args;
use contentful_core::config::MANAGEMENT_BASE_URL;
use contentful_core::templates::{find_template, sample_blog_post_fields, ALL_TEMPLATES, BLOG_POST};
use contentful_core::{
    ContentTypeTemplate, ManagementClient, ModelProvisioner, ProvisionedContentType, Transport,
    DEFAULT_ENVIRONMENT,
};

use super::Context;
use crate::error::CliError;
use crate::transport::UreqTransport;

fn parse_model(id: &str) -> Result<&'static ContentTypeTemplate, String> {
    find_template(id).ok_or_else(|| {
        let known: Vec<_> = ALL_TEMPLATES.iter().map(|t| t.id).collect();
        format!("unknown model '{id}' (expected one of: {})", known.join(", "))
    })
}

/// Arguments for the create-model command.
#[derive(Args)]
pub(crate) struct CreateModelArgs {
    /// Content Management API token.
    #[arg(long, env = "CONTENTFUL_MANAGEMENT_TOKEN", hide_env_values = true)]
    management_token: String,

    /// Contentful space ID.
    #[arg(long, env = "CONTENTFUL_SPACE_ID")]
    space_id: String,

    /// Environment to create the models in.
    #[arg(long, env = "CONTENTFUL_ENVIRONMENT", default_value = DEFAULT_ENVIRONMENT)]
    environment: String,

    /// Content Management API root.
    #[arg(long, env = "CONTENTFUL_MANAGEMENT_URL", default_value = MANAGEMENT_BASE_URL)]
    management_url: String,

    /// Model to create: blogPost, product or author. Repeatable.
    #[arg(short, long = "model", value_parser = parse_model)]
    models: Vec<&'static ContentTypeTemplate>,

    /// Create every predefined model.
    #[arg(long, conflicts_with = "models")]
    all: bool,

    /// Also create and publish a sample blog post entry.
    #[arg(long)]
    sample_entry: bool,

    /// Locale used for the sample entry fields.
    #[arg(long, default_value = "en-US")]
    locale: String,
}

/// What a create-model run produced.
#[derive(Debug, Default)]
pub(crate) struct ModelReport {
    pub(crate) space_name: String,
    pub(crate) content_types: Vec<ProvisionedContentType>,
    pub(crate) sample_entry: Option<String>,
}

impl CreateModelArgs {
    /// Execute the create-model command.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are blank or any management call
    /// fails. Content types created before the failure stay in place.
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        self.run(ctx, UreqTransport::new()).map(|_| ())
    }

    fn selected(&self) -> Vec<&'static ContentTypeTemplate> {
        if self.all {
            ALL_TEMPLATES.iter().collect()
        } else {
            self.models.clone()
        }
    }

    pub(crate) fn run<T: Transport>(
        self,
        ctx: &Context,
        transport: T,
    ) -> Result<ModelReport, CliError> {
        let output = &ctx.output;
        if self.management_token.trim().is_empty() || self.space_id.trim().is_empty() {
            output.info("To get your credentials:");
            output.info("   1. Log in to the Contentful dashboard");
            output.info("   2. Go to Settings > API keys");
            output.info("   3. Create or select a Management API token");
            output.info("   4. Pass --space-id and --management-token (or set the env vars)");
            return Err(CliError::Validation(
                "Space ID and Management token are required".to_owned(),
            ));
        }

        output.highlight("Contentful Content Model Generator");
        output.separator();

        let provisioner = ModelProvisioner::new(
            ManagementClient::with_base_url(
                &self.management_url,
                self.management_token.trim(),
                self.space_id.trim(),
                &self.environment,
            ),
            transport,
        );

        output.info("Verifying credentials...");
        let space = provisioner.verify_space()?;
        output.success(&format!("Connected to space: {}", space.name));

        let mut report = ModelReport {
            space_name: space.name,
            ..ModelReport::default()
        };

        let selected = self.selected();
        if selected.is_empty() && !self.sample_entry {
            output.warning("No models selected. Pass --model <id> or --all.");
        }

        for template in selected {
            output.info(&format!("\nCreating content type: {}...", template.name));
            let created = provisioner.create_content_type(template).inspect_err(|err| {
                output.error(&format!("Error creating {}: {err}", template.name));
            })?;
            output.success(&format!(
                "Successfully created and published: {}",
                created.name
            ));
            output.detail(&format!("   Content Type ID: {}", created.id));
            output.detail(&format!("   Fields: {}", created.field_ids.join(", ")));
            report.content_types.push(created);
        }

        if self.sample_entry {
            output.info(&format!("\nCreating sample entry for {}...", BLOG_POST.id));
            let publish_date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            let fields = sample_blog_post_fields(&self.locale, &publish_date);
            let entry_id = provisioner
                .create_sample_entry(BLOG_POST.id, &fields)
                .inspect_err(|err| output.error(&format!("Error creating sample entry: {err}")))?;
            output.success("Successfully created and published sample entry");
            output.detail(&format!("   Entry ID: {entry_id}"));
            report.sample_entry = Some(entry_id);
        }

        output.success("\nAll done!");
        output.info("\nNext steps:");
        output.info("   1. Check your Contentful space to see the new content models");
        output.info("   2. Create some entries in the Contentful dashboard");
        output.info("   3. Run `cms-tester fetch` to view your content");
        Ok(report)
    }
}
