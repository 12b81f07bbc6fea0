pub mod logging;

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::models::{Credentials, PricingDefaults};

pub const DEFAULT_CHUNK_SIZE: usize = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SxEnvironment {
    Production,
    Test,
}

impl SxEnvironment {
    pub fn parse(mode: &str) -> Result<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(SxEnvironment::Production),
            "test" => Ok(SxEnvironment::Test),
            other => Err(anyhow!("unknown SXAPI mode '{}', expected 'prod' or 'test'", other)),
        }
    }

    fn endpoint_var(&self) -> &'static str {
        match self {
            SxEnvironment::Production => "SXAPI_PROD_ENDPOINT",
            SxEnvironment::Test => "SXAPI_TEST_ENDPOINT",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SxApiConfig {
    pub environment: SxEnvironment,
    /// Base URL of the SXAPI REST service; function names are appended to it.
    pub endpoint: String,
    pub debug: bool,
    /// Append-only request/response log, written only in debug mode.
    pub log_file: Option<PathBuf>,
    pub chunk_size: usize,
    pub request_timeout_secs: u64,
    pub default_credentials: Option<Credentials>,
    pub pricing_defaults: PricingDefaults,
}

impl SxApiConfig {
    /// Minimal config pointing at `endpoint`, everything else defaulted.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            environment: SxEnvironment::Production,
            endpoint: normalize_endpoint(&endpoint.into()),
            debug: false,
            log_file: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_credentials: None,
            pricing_defaults: PricingDefaults::default(),
        }
    }

    pub fn with_default_credentials(mut self, credentials: Credentials) -> Self {
        self.default_credentials = Some(credentials);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup` instead of the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = SxEnvironment::parse(&var("SXAPI_MODE").unwrap_or_else(|| "prod".to_string()))?;

        let endpoint = var(environment.endpoint_var())
            .or_else(|| var("SXAPI_ENDPOINT"))
            .ok_or_else(|| anyhow!("{} or SXAPI_ENDPOINT must be set", environment.endpoint_var()))?;

        let debug = match var("SXAPI_DEBUG") {
            Some(v) => parse_bool(&v).with_context(|| format!("SXAPI_DEBUG='{}'", v))?,
            None => false,
        };

        let log_file = if debug { var("SXAPI_LOG_FILE").map(PathBuf::from) } else { None };

        let chunk_size = var("SXAPI_CHUNK_SIZE")
            .map(|v| v.trim().parse::<usize>())
            .transpose()
            .context("SXAPI_CHUNK_SIZE must be a positive integer")?
            .unwrap_or(DEFAULT_CHUNK_SIZE);

        let request_timeout_secs = var("SXAPI_TIMEOUT_SECS")
            .map(|v| v.trim().parse::<u64>())
            .transpose()
            .context("SXAPI_TIMEOUT_SECS must be an integer")?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let default_credentials = match (
            var("SXAPI_COMPANY_NUMBER"),
            var("SXAPI_OPERATOR_INIT"),
            lookup("SXAPI_OPERATOR_PASSWORD"),
        ) {
            (Some(cono), Some(init), Some(password)) => Some(Credentials::new(
                cono.trim().parse().context("SXAPI_COMPANY_NUMBER must be an integer")?,
                init,
                password,
            )),
            _ => None,
        };

        let config = Self {
            environment,
            endpoint: normalize_endpoint(&endpoint),
            debug,
            log_file,
            chunk_size,
            request_timeout_secs,
            default_credentials,
            pricing_defaults: PricingDefaults {
                customer_number: var("SXAPI_DEFAULT_CUSTOMER"),
                ship_to: var("SXAPI_DEFAULT_SHIP_TO"),
                warehouse: var("SXAPI_DEFAULT_WAREHOUSE"),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() || self.endpoint == "/" {
            return Err(anyhow!("endpoint is required"));
        }
        if self.chunk_size == 0 {
            return Err(anyhow!("chunk_size must be at least 1"));
        }
        Ok(())
    }

    /// Full URL of an SXAPI function.
    pub fn function_url(&self, function: &str) -> String {
        format!("{}{}", self.endpoint, function)
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("not a boolean: {}", other)),
    }
}
