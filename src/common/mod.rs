mod config;
mod error;
pub mod report;
mod types;

pub use config::*;
pub use error::*;
pub use types::*;
