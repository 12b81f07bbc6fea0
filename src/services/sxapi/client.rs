// SXAPI Client
// Wraps a Transport with the request envelope, credential handling and
// response decoding shared by every SXAPI call

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SxApiConfig;
use crate::error::{Result, SxApiError};
use crate::models::Credentials;
use crate::services::sxapi::transport::{HttpTransport, Transport};
use crate::utils::RequestLog;

pub const PRODUCT_DATA_FUNCTION: &str = "sxapiicgetproductdatageneralv3";

// ============================================================================
// Wire Envelope
// ============================================================================

/// `{"request": {<credentials>, <payload>}}`
#[derive(Debug, Serialize)]
struct SxRequest<'a, P: Serialize> {
    request: RequestBody<'a, P>,
}

#[derive(Debug, Serialize)]
struct RequestBody<'a, P: Serialize> {
    #[serde(flatten)]
    credentials: &'a Credentials,
    #[serde(flatten)]
    payload: P,
}

/// `{"response": {...}}`
#[derive(Debug, Deserialize)]
struct SxResponse<R> {
    response: R,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductDataRequest<'a> {
    product_code: &'a str,
    use_cross_reference_flag: bool,
}

// ============================================================================
// SXAPI Client
// ============================================================================

pub struct SxApiClient<T: Transport = HttpTransport> {
    config: SxApiConfig,
    transport: T,
    request_log: Option<RequestLog>,
}

impl SxApiClient<HttpTransport> {
    /// Client talking HTTP to `config.endpoint`.
    pub fn new(config: SxApiConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    pub fn from_env() -> Result<Self> {
        let config = SxApiConfig::from_env().map_err(|e| SxApiError::ConfigError(format!("{:#}", e)))?;
        Self::new(config)
    }
}

impl<T: Transport> SxApiClient<T> {
    pub fn with_transport(config: SxApiConfig, transport: T) -> Self {
        let request_log = match (&config.log_file, config.debug) {
            (Some(path), true) => Some(RequestLog::new(path)),
            _ => None,
        };

        Self {
            config,
            transport,
            request_log,
        }
    }

    pub fn config(&self) -> &SxApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replace the credentials used when a call passes `None`.
    pub fn set_default_credentials(&mut self, credentials: Credentials) {
        self.config.default_credentials = Some(credentials);
    }

    pub(crate) fn request_log(&self) -> Option<&RequestLog> {
        self.request_log.as_ref()
    }

    /// Per-call credentials win over the configured default.
    pub(crate) fn resolve_credentials<'a>(
        &'a self,
        credentials: Option<&'a Credentials>,
    ) -> Result<&'a Credentials> {
        credentials
            .or(self.config.default_credentials.as_ref())
            .ok_or(SxApiError::MissingCredentials)
    }

    /// Send `payload` (plus credentials) to `function` and decode the
    /// `response` object as `R`.
    pub(crate) async fn call<P, R>(&self, function: &str, credentials: &Credentials, payload: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(SxRequest {
            request: RequestBody { credentials, payload },
        })?;

        let raw = self.transport.send(function, &body).await?;
        let decoded: SxResponse<R> = serde_json::from_value(raw)?;
        Ok(decoded.response)
    }

    /// General product data (`sxapiicgetproductdatageneralv3`), returned as the
    /// raw `response` object.
    pub async fn product_data(
        &self,
        product: &str,
        use_cross_reference: bool,
        credentials: Option<&Credentials>,
    ) -> Result<Value> {
        let credentials = self.resolve_credentials(credentials)?;

        self.call(
            PRODUCT_DATA_FUNCTION,
            credentials,
            ProductDataRequest {
                product_code: product,
                use_cross_reference_flag: use_cross_reference,
            },
        )
        .await
    }
}
