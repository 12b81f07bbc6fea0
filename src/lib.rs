//! Client library for the SX.e SXAPI REST service.
//!
//! Turns tabular records into batched maintenance calls (product, customer and
//! pricing imports) and runs per-row pricing lookups, normalizing the replies
//! into [`ImportResult`] and [`PricingOutcome`].

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::SxApiConfig;
pub use error::{Result, SxApiError};
pub use models::{Credentials, FieldOperation, ImportResult, PriceQuote, PricingOutcome, Row, UpdateMode};
pub use services::sxapi::{HttpTransport, ImportKind, SxApiClient, Transport};
