pub mod error;
pub mod host;
pub mod logger;
