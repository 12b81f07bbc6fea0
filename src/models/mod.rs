pub mod credentials;
pub mod field_operation;
pub mod import_result;
pub mod pricing;
pub mod row;

pub use credentials::Credentials;
pub use field_operation::{FieldOperation, UpdateMode};
pub use import_result::ImportResult;
pub use pricing::{PriceQuote, PricingDefaults, PricingOutcome};
pub use row::Row;
