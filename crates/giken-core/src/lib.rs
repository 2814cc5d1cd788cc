pub mod config;
pub mod error;
pub mod sanitize;
pub mod types;

pub use config::GikenConfig;
pub use error::{GikenError, Result};
pub use sanitize::{cut_bytes, escape_html, sanitize_and_cut};
pub use types::*;
