pub mod sxapi;

pub use sxapi::{ImportKind, SxApiClient};
