pub mod config;
pub mod error;
pub mod input;
pub mod types;

pub use config::{LayoutConfig, OutputFormat, ZonegridConfig};
pub use error::{ConfigError, ConfigResult, InputError, InputResult};
pub use types::*;
