//! CLI command implementations.

pub(crate) mod clear;
pub(crate) mod configure;
pub(crate) mod content_types;
pub(crate) mod create_model;
pub(crate) mod fetch;
pub(crate) mod status;

pub(crate) use clear::ClearArgs;
pub(crate) use configure::ConfigureArgs;
pub(crate) use content_types::ContentTypesArgs;
pub(crate) use create_model::CreateModelArgs;
pub(crate) use fetch::FetchArgs;
pub(crate) use status::StatusArgs;

use contentful_core::{ContentfulConfig, ContentfulService, Transport, CONFIG_STORE_KEY};

use crate::error::CliError;
use crate::output::Output;
use crate::store::ConfigStore;

/// State shared by every command.
pub(crate) struct Context {
    pub(crate) store: ConfigStore,
    pub(crate) delivery_url: String,
    pub(crate) output: Output,
}

impl Context {
    pub(crate) fn new(store: ConfigStore, delivery_url: impl Into<String>) -> Self {
        Self {
            store,
            delivery_url: delivery_url.into(),
            output: Output::new(),
        }
    }

    /// The stored configuration, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreadable or holds incomplete
    /// credentials.
    pub(crate) fn load_config(&self) -> Result<Option<ContentfulConfig>, CliError> {
        let Some(config) = self.store.get::<ContentfulConfig>(CONFIG_STORE_KEY)? else {
            return Ok(None);
        };
        if !config.is_complete() {
            return Err(CliError::Validation(format!(
                "stored configuration in {} is incomplete; run `cms-tester configure`",
                self.store.path().display()
            )));
        }
        Ok(Some(config))
    }

    /// A delivery service, configured from the store when possible.
    pub(crate) fn service<T: Transport>(
        &self,
        transport: T,
    ) -> Result<ContentfulService<T>, CliError> {
        let mut service = ContentfulService::new(transport).with_base_url(&self.delivery_url);
        if let Some(config) = self.load_config()? {
            service.configure(config);
        }
        Ok(service)
    }
}
