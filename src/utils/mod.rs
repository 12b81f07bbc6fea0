pub mod csv_loader;
pub mod log_sanitizer;
pub mod request_log;

pub use csv_loader::{load_rows, load_rows_from_path};
pub use log_sanitizer::*;
pub use request_log::RequestLog;
