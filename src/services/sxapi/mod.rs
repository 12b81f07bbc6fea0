// SXAPI Integration Module
// Exports the client, transport, import pipeline and pricing query

pub mod batch_import;
pub mod client;
pub mod existence_resolver;
pub mod import_kind;
pub mod pricing_query;
pub mod record_flattener;
pub mod transport;

pub use batch_import::chunk;
pub use client::SxApiClient;
pub use existence_resolver::WAREHOUSE_PRODUCT_NOT_SET_UP;
pub use import_kind::{ImportKind, KeyColumns, UpdatePolicy};
pub use record_flattener::flatten;
pub use transport::{HttpTransport, Transport};
