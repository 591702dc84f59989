//! Structured logging with correlation tracking for backend requests
//!
//! Every request gets a correlation id that is sent as a header and repeated
//! in each log line, so a failed bulk action can be traced through the
//! backend's own logs.

use serde_json::json;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use log::{debug, error, info, warn};

/// Monitoring and logging configuration
#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    pub request_logging: bool,
    pub performance_metrics: bool,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            request_logging: true,
            performance_metrics: true,
            log_level: LogLevel::Info,
        }
    }
}

impl MonitoringConfig {
    /// Silence request logging (used by tests)
    pub fn disabled() -> Self {
        Self {
            request_logging: false,
            performance_metrics: false,
            log_level: LogLevel::Error,
        }
    }
}

/// Structured logger for backend requests
#[derive(Debug, Clone)]
pub struct ApiLogger {
    config: MonitoringConfig,
}

/// Context for a single request
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub correlation_id: String,
    pub method: String,
    pub path: String,
    pub start_time: Instant,
}

impl RequestContext {
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl ApiLogger {
    pub fn new(config: MonitoringConfig) -> Self {
        Self { config }
    }

    /// Start tracking a request and mint its correlation id
    pub fn start_request(&self, method: &str, path: &str) -> RequestContext {
        let context = RequestContext {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            method: method.to_string(),
            path: path.to_string(),
            start_time: Instant::now(),
        };

        if self.config.request_logging && self.should_log(&LogLevel::Debug) {
            let log_data = json!({
                "event": "request_started",
                "correlation_id": context.correlation_id,
                "method": context.method,
                "path": context.path,
                "timestamp": chrono::Utc::now().to_rfc3339()
            });

            debug!("API Request Started: {}", log_data);
        }

        context
    }

    /// Log HTTP request details
    pub fn log_request(&self, context: &RequestContext, url: &str, headers: &HashMap<String, String>) {
        if !self.config.request_logging || !self.should_log(&LogLevel::Debug) {
            return;
        }

        let log_data = json!({
            "event": "http_request",
            "correlation_id": context.correlation_id,
            "method": context.method,
            "url": url,
            "headers": self.sanitize_headers(headers),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        debug!("HTTP Request: {}", log_data);
    }

    /// Log HTTP response status and latency
    pub fn log_response(&self, context: &RequestContext, status_code: u16, duration: Duration) {
        if !self.config.request_logging || !self.should_log(&LogLevel::Debug) {
            return;
        }

        let log_data = json!({
            "event": "http_response",
            "correlation_id": context.correlation_id,
            "method": context.method,
            "path": context.path,
            "status_code": status_code,
            "duration_ms": duration.as_millis(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if status_code >= 400 {
            warn!("HTTP Response (Error): {}", log_data);
        } else {
            debug!("HTTP Response: {}", log_data);
        }
    }

    /// Log the one-shot token refresh triggered by a 401
    pub fn log_refresh(&self, context: &RequestContext, succeeded: bool) {
        if !self.should_log(&LogLevel::Warn) {
            return;
        }

        let log_data = json!({
            "event": "token_refresh",
            "correlation_id": context.correlation_id,
            "path": context.path,
            "succeeded": succeeded,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if succeeded {
            info!("Token Refreshed: {}", log_data);
        } else {
            warn!("Token Refresh Failed: {}", log_data);
        }
    }

    /// Complete a request and log its outcome
    pub fn complete_request(&self, context: &RequestContext, status_code: Option<u16>, error_message: Option<&str>) {
        if !self.config.performance_metrics {
            return;
        }

        let success = error_message.is_none();
        let log_data = json!({
            "event": "request_completed",
            "correlation_id": context.correlation_id,
            "method": context.method,
            "path": context.path,
            "duration_ms": context.elapsed().as_millis(),
            "success": success,
            "status_code": status_code,
            "error_message": error_message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if success {
            if self.should_log(&LogLevel::Info) {
                info!("API Request Completed: {}", log_data);
            }
        } else if self.should_log(&LogLevel::Error) {
            error!("API Request Failed: {}", log_data);
        }
    }

    /// Log a fan-out of independent requests (e.g. per-id rejects)
    pub fn log_fan_out(&self, action: &str, request_count: usize, failure_count: usize, duration: Duration) {
        if !self.config.performance_metrics || !self.should_log(&LogLevel::Info) {
            return;
        }

        let log_data = json!({
            "event": "fan_out_completed",
            "action": action,
            "request_count": request_count,
            "success_count": request_count - failure_count,
            "failure_count": failure_count,
            "duration_ms": duration.as_millis(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if failure_count > 0 {
            warn!("Fan-out Completed With Failures: {}", log_data);
        } else {
            info!("Fan-out Completed: {}", log_data);
        }
    }

    fn should_log(&self, level: &LogLevel) -> bool {
        match (&self.config.log_level, level) {
            (LogLevel::Error, LogLevel::Error) => true,
            (LogLevel::Warn, LogLevel::Error | LogLevel::Warn) => true,
            (LogLevel::Info, LogLevel::Error | LogLevel::Warn | LogLevel::Info) => true,
            (LogLevel::Debug, _) => true,
            _ => false,
        }
    }

    /// Redact credentials before headers reach the log file
    fn sanitize_headers(&self, headers: &HashMap<String, String>) -> HashMap<String, String> {
        headers
            .iter()
            .map(|(key, value)| {
                let key_lower = key.to_lowercase();
                if key_lower.contains("authorization") || key_lower.contains("token") || key_lower.contains("cookie") {
                    (key.clone(), "[REDACTED]".to_string())
                } else {
                    (key.clone(), value.clone())
                }
            })
            .collect()
    }
}
