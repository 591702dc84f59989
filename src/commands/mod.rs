//! Command handlers behind the clap surface in [`crate::cli`]

pub mod auth;
pub mod categories;
pub mod duplicates;
pub mod questions;
pub mod settings;
pub mod stats;

use crate::api::{ApiError, AuthManager, QuizClient, TokenStore};
use crate::config::{Config, ConfigTokenStore};
use crate::services::{CategoryService, QuestionService, StatsService};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Everything a command needs: the loaded config and a client bound to it
pub struct AppContext {
    pub config: Config,
    client: QuizClient,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let tokens: Arc<dyn TokenStore> = Arc::new(ConfigTokenStore::new(&config)?);
        let client = QuizClient::new(config.base_url(), tokens, config.timeout(), &config.api.user_agent)
            .context("Failed to build HTTP client")?;
        Ok(Self { config, client })
    }

    /// Context around an existing client, e.g. one pointed at a test server
    pub fn with_client(config: Config, client: QuizClient) -> Self {
        Self { config, client }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn client(&self) -> &QuizClient {
        &self.client
    }

    pub fn auth(&self) -> AuthManager {
        AuthManager::new(self.client.clone())
    }

    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.client.clone())
    }

    pub fn questions(&self) -> QuestionService {
        QuestionService::new(self.client.clone())
    }

    pub fn stats(&self) -> StatsService {
        StatsService::new(self.client.clone())
    }

    /// Fail early with a hint instead of letting the first request bounce off a 401
    pub fn require_login(&self) -> Result<()> {
        if self.client.tokens().load().is_none() {
            return Err(ApiError::NotLoggedIn.into());
        }
        Ok(())
    }

    pub fn language(&self, requested: Option<String>) -> String {
        requested.unwrap_or_else(|| self.config.settings.default_language.clone())
    }

    pub fn page_limit(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.config.settings.page_limit)
    }

    pub fn supported_languages(&self) -> Vec<String> {
        self.config.settings.supported_languages.clone()
    }
}
