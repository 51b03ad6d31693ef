pub mod config;
pub mod digest;
pub mod error;
pub mod feed;
pub mod webhook;

pub use config::AppConfig;
pub use error::{Error, Result};
