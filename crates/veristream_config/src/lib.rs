//! Project configuration for the veristream RTL stream driver.
//!
//! Parses and validates `veristream.toml`, which names the design under
//! test (top module, HDL sources) and the handshake-driver settings
//! (clock/reset signals, half period, stream-signal suffix, liveness
//! threshold).
//!
//! # Modules
//!
//! - `error` — Configuration error types
//! - `types` — Deserialized configuration types
//! - `loader` — File loading and validation

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{CompileConfig, DriverConfig, ProjectConfig, ProjectMeta, StreamSuffix};
