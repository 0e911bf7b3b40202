//! Application context - dependency injection container

use std::sync::Arc;

use rota_core::{RosterGateway, RosterStore};
use rota_domain::{Config, Result};
use rota_infra::{config, HttpRosterGateway};
use tracing::info;

use crate::utils::command_helpers::execute_logged;

/// Application context - holds the configured gateway and roster store
pub struct RosterContext {
    pub config: Config,
    pub gateway: Arc<dyn RosterGateway>,
    pub store: Arc<RosterStore>,
}

impl RosterContext {
    /// Build the context from configuration resolved by the infra loader
    /// (environment first, then config files).
    ///
    /// # Errors
    /// Returns `RosterError::Config` when no usable configuration is found.
    pub fn from_env() -> Result<Self> {
        Self::with_config(config::load()?)
    }

    /// Build the context against the HTTP gateway described by `config`.
    ///
    /// # Errors
    /// Returns `RosterError::Config` when the API client cannot be built.
    pub fn with_config(config: Config) -> Result<Self> {
        let gateway: Arc<dyn RosterGateway> =
            Arc::new(HttpRosterGateway::from_config(&config.api)?);
        Ok(Self::with_gateway(config, gateway))
    }

    /// Build the context around an existing gateway implementation.
    pub fn with_gateway(config: Config, gateway: Arc<dyn RosterGateway>) -> Self {
        let store = RosterStore::new(Arc::clone(&gateway), config.feedback)
            .with_people_per_day(config.roster.default_people_per_day);

        info!(
            base_url = %config.api.base_url,
            people_per_day = config.roster.default_people_per_day,
            "roster context created"
        );

        Self { config, gateway, store: Arc::new(store) }
    }

    /// Initial load: users, then both month views.
    ///
    /// # Errors
    /// Returns the first load failure; it is also shown as a notification.
    pub async fn start(&self) -> Result<()> {
        execute_logged("roster::start", || self.store.start()).await
    }

    /// Close any open editor and drop pending notifications with their timers.
    pub fn shutdown(&self) {
        self.store.popovers().close_all();
        self.store.feedback().shutdown();
        info!("roster context shut down");
    }
}
