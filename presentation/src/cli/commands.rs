//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for medichat
#[derive(Parser, Debug)]
#[command(name = "medichat")]
#[command(author, version, about = "Gemini Healthcare Assistant - chat with MediPal in your terminal")]
#[command(long_about = r#"
MediPal is a healthcare assistant backed by Gemini. It shares general health
information and wellness tips; it is not a medical professional.

The API key is read from the environment variable named by
provider.api_key_env (default: API_KEY).

Configuration files are loaded from (in priority order):
1. MEDICHAT_* environment variables (e.g. MEDICHAT_OUTPUT__COLOR=false)
2. --config <path>     Explicit config file
3. ./medichat.toml     Project-level config
4. ~/.config/medichat/config.toml   Global config

Example:
  API_KEY=... medichat
  medichat -vv --config ./medichat.toml
"#)]
pub struct Cli {
    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Do not draw the typing spinner or marker
    #[arg(long)]
    pub no_typing: bool,
}
