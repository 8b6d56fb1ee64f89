pub mod config;
pub mod fleet;
pub mod signal;
pub mod transport;
pub mod types;

pub use config::Config;
pub use types::*;
