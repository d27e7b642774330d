//! Configuration file loading for medichat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MEDICHAT_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./medichat.toml` or `./.medichat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/medichat/config.toml`
//! 5. Default values
//!
//! The model, system instruction and sampling parameters are compiled in
//! and cannot be set here.

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileConfig, FileOutputConfig, FileProviderConfig};
pub use loader::ConfigLoader;
