use super::auth::TokenStore;
use super::constants::{self, headers};
use super::error::{ApiError, ApiResult};
use super::logging::{ApiLogger, MonitoringConfig, RequestContext};
use super::models::{ApiResponse, TokenPair};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// A request that can be dispatched, and replayed once after a token refresh
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Send the bearer token and refresh it on 401
    pub authenticated: bool,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            authenticated: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, params: Vec<(String, String)>) -> Self {
        self.query.extend(params);
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body).map_err(|source| ApiError::Encode {
            endpoint: self.path.clone(),
            source,
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// No bearer token and no refresh, for the auth endpoints themselves
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// HTTP client for the quiz backend with bearer auth and refresh-on-401 replay
#[derive(Clone)]
pub struct QuizClient {
    base_url: String,
    http_client: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
    api_logger: ApiLogger,
}

impl QuizClient {
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
        timeout: Duration,
        user_agent: &str,
    ) -> ApiResult<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self::with_custom_client(base_url, tokens, http_client))
    }

    /// Create a client around an existing reqwest client
    pub fn with_custom_client(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
            tokens,
            api_logger: ApiLogger::new(MonitoringConfig::default()),
        }
    }

    pub fn with_monitoring(mut self, config: MonitoringConfig) -> Self {
        self.api_logger = ApiLogger::new(config);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn api_logger(&self) -> &ApiLogger {
        &self.api_logger
    }

    /// Send a request and decode the `responseObject` of the envelope
    pub async fn send<T: DeserializeOwned>(&self, spec: RequestSpec) -> ApiResult<T> {
        let envelope: ApiResponse<T> = self.send_raw(spec).await?;
        Ok(envelope.response_object)
    }

    /// Send a request and decode the whole body as `T`
    pub async fn send_raw<T: DeserializeOwned>(&self, spec: RequestSpec) -> ApiResult<T> {
        let context = self.api_logger.start_request(spec.method.as_str(), &spec.path);
        let result = self.execute(&spec, &context).await;

        match &result {
            Ok((status, _)) => self.api_logger.complete_request(&context, Some(*status), None),
            Err(e) => self.api_logger.complete_request(&context, e.status(), Some(&e.to_string())),
        }

        let (_, body) = result?;
        decode_body(&spec.path, &body)
    }

    async fn execute(&self, spec: &RequestSpec, context: &RequestContext) -> ApiResult<(u16, String)> {
        let access_token = if spec.authenticated {
            self.tokens.load().map(|t| t.access_token)
        } else {
            None
        };

        let mut response = self.dispatch(spec, context, access_token.as_deref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED && spec.authenticated {
            log::info!("Received 401 for {} {}, refreshing tokens", spec.method, spec.path);
            match self.refresh_tokens().await {
                Ok(tokens) => {
                    self.api_logger.log_refresh(context, true);
                    response = self.dispatch(spec, context, Some(&tokens.access_token)).await?;
                }
                Err(e) => {
                    self.api_logger.log_refresh(context, false);
                    log::warn!("Token refresh failed, logging out: {}", e);
                    if let Err(clear_err) = self.tokens.clear() {
                        log::warn!("Failed to clear stored tokens: {}", clear_err);
                    }
                }
            }
        }

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok((status.as_u16(), body))
        } else {
            Err(ApiError::from_body(status.as_u16(), &body))
        }
    }

    async fn dispatch(
        &self,
        spec: &RequestSpec,
        context: &RequestContext,
        access_token: Option<&str>,
    ) -> ApiResult<reqwest::Response> {
        let url = constants::endpoint(&self.base_url, &spec.path);

        let mut request_headers = HashMap::new();
        request_headers.insert("Accept".to_string(), headers::CONTENT_TYPE_JSON.to_string());
        request_headers.insert(headers::X_CORRELATION_ID.to_string(), context.correlation_id.clone());

        let mut request = self
            .http_client
            .request(spec.method.clone(), &url)
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .header(headers::X_CORRELATION_ID, &context.correlation_id);

        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(token) = access_token {
            request_headers.insert("Authorization".to_string(), format!("Bearer {}", token));
            request = request.bearer_auth(token);
        }
        if let Some(body) = &spec.body {
            request_headers.insert("Content-Type".to_string(), headers::CONTENT_TYPE_JSON.to_string());
            request = request.json(body);
        }

        self.api_logger.log_request(context, &url, &request_headers);

        let response = request.send().await?;
        self.api_logger.log_response(context, response.status().as_u16(), context.elapsed());
        Ok(response)
    }

    /// Exchange the stored refresh token for a new pair and persist it
    pub async fn refresh_tokens(&self) -> ApiResult<TokenPair> {
        let refresh_token = self
            .tokens
            .load()
            .map(|t| t.refresh_token)
            .ok_or(ApiError::NotLoggedIn)?;

        let url = constants::endpoint(&self.base_url, constants::auth::REFRESH);
        let response = self
            .http_client
            .post(&url)
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .bearer_auth(&refresh_token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_body(status.as_u16(), &body));
        }

        let value: Value = decode_body(constants::auth::REFRESH, &body)?;
        let tokens = extract_tokens(value).ok_or_else(|| ApiError::Status {
            status: status.as_u16(),
            message: "refresh response did not contain a token pair".to_string(),
        })?;

        if let Err(e) = self.tokens.save(&tokens) {
            log::warn!("Failed to persist refreshed tokens: {}", e);
        }
        Ok(tokens)
    }
}

/// Accept both the enveloped and the bare token pair shapes
pub(crate) fn extract_tokens(value: Value) -> Option<TokenPair> {
    let candidate = match value.get("responseObject") {
        Some(inner) => inner.clone(),
        None => value,
    };
    serde_json::from_value(candidate).ok()
}

fn decode_body<T: DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
    let text = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(text).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
