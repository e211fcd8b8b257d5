//! Store configuration.

use kindred_graph::FanOut;

use crate::error::{Error, Result};
use crate::store::GraphStore;

/// Configuration options for a [`GraphStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name attached to the store's log events.
    pub name: String,
    /// Rule for several outgoing relationships of one type from one node.
    pub fan_out: FanOut,
}

impl StoreConfig {
    /// Create a configuration with the given name and default options.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fan_out: FanOut::default() }
    }

    /// Set the fan-out rule.
    #[must_use]
    pub const fn fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the name is blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::config("store name must not be blank"));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("default")
    }
}

/// Builder for [`GraphStore`].
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    config: StoreConfig,
}

impl StoreBuilder {
    /// Start from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the store name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the fan-out rule.
    #[must_use]
    pub const fn fan_out(mut self, fan_out: FanOut) -> Self {
        self.config.fan_out = fan_out;
        self
    }

    /// Build the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn build(self) -> Result<GraphStore> {
        self.config.validate()?;
        Ok(GraphStore::with_config(self.config))
    }
}
