use super::client::{QuizClient, RequestSpec};
use super::constants;
use super::error::{ApiError, ApiResult};
use super::models::{LoginRequest, MessageResponse, TokenPair};
use crate::domain::validation::{ValidationError, require_text};
use std::sync::Mutex;

/// Where the access/refresh pair lives between runs
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<TokenPair>;
    fn save(&self, tokens: &TokenPair) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

/// Process-local token store, used by tests and one-off sessions
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: Mutex::new(Some(tokens)),
        }
    }

    fn set(&self, tokens: Option<TokenPair>) {
        match self.tokens.lock() {
            Ok(mut guard) => *guard = tokens,
            Err(poisoned) => *poisoned.into_inner() = tokens,
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<TokenPair> {
        match self.tokens.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, tokens: &TokenPair) -> anyhow::Result<()> {
        self.set(Some(tokens.clone()));
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        self.set(None);
        Ok(())
    }
}

/// Login, refresh and logout against the backend's auth endpoints
pub struct AuthManager {
    client: QuizClient,
}

impl AuthManager {
    pub fn new(client: QuizClient) -> Self {
        Self { client }
    }

    pub fn is_logged_in(&self) -> bool {
        self.client.tokens().load().is_some()
    }

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenPair> {
        let body = LoginRequest {
            username: require_text(username, "username")?,
            password: password.to_string(),
        };
        if body.password.is_empty() {
            return Err(ValidationError::Empty("password").into());
        }

        log::info!("Logging in to {} as {}", self.client.base_url(), body.username);

        let spec = RequestSpec::post(constants::auth::LOGIN).json(&body)?.anonymous();
        let tokens: TokenPair = self.client.send(spec).await?;

        self.client
            .tokens()
            .save(&tokens)
            .map_err(|e| ApiError::TokenStorage(e.to_string()))?;

        log::info!("Login successful");
        Ok(tokens)
    }

    /// Refresh the stored pair; on failure the stored tokens are cleared
    pub async fn refresh(&self) -> ApiResult<TokenPair> {
        match self.client.refresh_tokens().await {
            Ok(tokens) => Ok(tokens),
            Err(e) => {
                if let Err(clear_err) = self.client.tokens().clear() {
                    log::warn!("Failed to clear stored tokens: {}", clear_err);
                }
                Err(e)
            }
        }
    }

    /// Tell the backend, then forget the local tokens regardless of the answer
    pub async fn logout(&self) -> ApiResult<()> {
        let result: ApiResult<MessageResponse> = self
            .client
            .send_raw(RequestSpec::post(constants::auth::LOGOUT))
            .await;

        if let Err(e) = &result {
            log::warn!("Backend logout failed: {}", e);
        }

        if let Err(e) = self.client.tokens().clear() {
            log::warn!("Failed to clear stored tokens: {}", e);
        }
        result.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().is_none());

        let pair = TokenPair {
            access_token: "a".into(),
            refresh_token: "r".into(),
        };
        store.save(&pair).unwrap();
        assert_eq!(store.load(), Some(pair));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }
}
