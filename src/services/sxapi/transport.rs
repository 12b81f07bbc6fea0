// SXAPI REST transport
// POSTs `{"request": {...}}` bodies to `<endpoint><function>` and decodes the JSON reply

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::SxApiConfig;
use crate::error::{Result, SxApiError};
use crate::utils::log_sanitizer::{redact_credentials, sanitize_for_log};
use crate::utils::RequestLog;

/// One round trip to a named SXAPI function.
///
/// Implementations must not retry: every `send` is exactly one request.
pub trait Transport {
    fn send(&self, function: &str, body: &Value) -> impl Future<Output = Result<Value>> + Send;
}

pub struct HttpTransport {
    endpoint: String,
    http_client: Client,
    request_log: Option<RequestLog>,
}

impl HttpTransport {
    pub fn new(config: &SxApiConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| SxApiError::ConfigError(e.to_string()))?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(SxApiError::NetworkError)?;

        let request_log = match (&config.log_file, config.debug) {
            (Some(path), true) => Some(RequestLog::new(path)),
            _ => None,
        };

        Ok(Self {
            endpoint: config.endpoint.clone(),
            http_client,
            request_log,
        })
    }

    pub fn request_log(&self) -> Option<&RequestLog> {
        self.request_log.as_ref()
    }
}

impl Transport for HttpTransport {
    async fn send(&self, function: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.endpoint, function);

        tracing::debug!(
            "SXAPI {} request: {}",
            function,
            sanitize_for_log(&redact_credentials(body).to_string())
        );
        if let Some(log) = &self.request_log {
            log.request(body);
        }

        let response = self.http_client.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!("SXAPI {} response ({}): {}", function, status, sanitize_for_log(&text));
        if let Some(log) = &self.request_log {
            log.response(&text);
        }

        if !status.is_success() {
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SxApiError::AuthError(text),
                _ => SxApiError::ApiError(status, text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

// ============================================================================
// Scripted transport for pipeline tests
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SxApiConfig::new("http://sx/").with_chunk_size(0);
        assert!(matches!(HttpTransport::new(&config), Err(SxApiError::ConfigError(_))));
    }

    #[test]
    fn test_request_log_only_in_debug() {
        let mut config = SxApiConfig::new("http://sx/");
        config.log_file = Some("/tmp/sxapi-test.log".into());
        assert!(HttpTransport::new(&config).unwrap().request_log().is_none());

        config.debug = true;
        assert!(HttpTransport::new(&config).unwrap().request_log().is_some());
    }
}
