pub mod config;
pub mod core;
pub mod utils;

pub use config::{AggregatorConfig, LeafConfig};
pub use core::{aggregate::AggregatorState, leaf::LeafService};
pub use utils::error::{Result, ServiceError};
