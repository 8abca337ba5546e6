//! `cms-tester fetch` command implementation.

use clap::Args;
use contentful_core::{Entry, Transport};

use super::Context;
use crate::error::CliError;
use crate::render::entry_card;
use crate::transport::UreqTransport;

/// Arguments for the fetch command.
#[derive(Args)]
pub(crate) struct FetchArgs {
    /// Show every field of every entry.
    #[arg(short, long)]
    expand: bool,

    /// Print the normalized entries as JSON instead of cards.
    #[arg(long, conflicts_with = "expand")]
    json: bool,
}

impl FetchArgs {
    /// Execute the fetch command.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is configured or the fetch fails.
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        self.run(ctx, UreqTransport::new()).map(|_| ())
    }

    pub(crate) fn run<T: Transport>(
        self,
        ctx: &Context,
        transport: T,
    ) -> Result<Vec<Entry>, CliError> {
        let service = ctx.service(transport)?;
        if !service.is_configured() {
            return Err(CliError::Validation(
                "Please configure Contentful first".to_owned(),
            ));
        }

        let entries = service.fetch_entries().inspect_err(|_| {
            ctx.output.error("Failed to fetch content");
        })?;
        ctx.output
            .success(&format!("Fetched {} entries", entries.len()));

        if self.json {
            ctx.output.data(&serde_json::to_string_pretty(&entries)?);
        } else if entries.is_empty() {
            ctx.output.highlight("No Content Found");
            ctx.output.info(
                "The space doesn't have any published entries yet. \
                 Create some content and publish it, then fetch again.",
            );
        } else {
            ctx.output.highlight(&format!("Content Entries ({})", entries.len()));
            for entry in &entries {
                ctx.output.data("");
                for line in entry_card(entry, self.expand) {
                    ctx.output.data(&line);
                }
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use contentful_core::{ContentfulConfig, ContentfulError, CONFIG_STORE_KEY};

    use super::*;
    use crate::commands::test_support::{context, seed, space, start_mock, DELIVERY, SPACE};

    fn fetch() -> FetchArgs {
        FetchArgs {
            expand: false,
            json: false,
        }
    }

    #[test]
    fn requires_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, "http://127.0.0.1:9");
        let err = fetch().run(&ctx, UreqTransport::new()).unwrap_err();
        assert_eq!(err.to_string(), "Please configure Contentful first");
    }

    #[test]
    fn returns_entries_in_order() {
        let base = start_mock(space().with_entry(seed("e1", "A")).with_entry(seed("e2", "B")));
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, &base);
        ctx.store
            .set(CONFIG_STORE_KEY, &ContentfulConfig::new(SPACE, DELIVERY))
            .unwrap();

        let entries = fetch().run(&ctx, UreqTransport::new()).unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["e1", "e2"]);
    }

    #[test]
    fn empty_space_is_not_an_error() {
        let base = start_mock(space());
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, &base);
        ctx.store
            .set(CONFIG_STORE_KEY, &ContentfulConfig::new(SPACE, DELIVERY))
            .unwrap();

        let args = FetchArgs {
            expand: false,
            json: true,
        };
        assert!(args.run(&ctx, UreqTransport::new()).unwrap().is_empty());
    }

    #[test]
    fn unknown_environment_surfaces_upstream_error() {
        let base = start_mock(space());
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, &base);
        ctx.store
            .set(
                CONFIG_STORE_KEY,
                &ContentfulConfig::new(SPACE, DELIVERY).with_environment("nope"),
            )
            .unwrap();

        let err = fetch().run(&ctx, UreqTransport::new()).unwrap_err();
        assert!(
            matches!(err, CliError::Contentful(ContentfulError::Http { status: 404, .. })),
            "{err}"
        );
    }
}
