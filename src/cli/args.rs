//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};

/// Voice Notes - turn spoken audio into titled notes
#[derive(Parser, Debug)]
#[command(name = "voice-notes")]
#[command(version)]
#[command(about = "HTTP service that turns voice recordings into titled notes using Google Gemini")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service (default)
    Serve(ServeArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags for the HTTP service. Unset flags fall back to env, then config file.
#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Directory for uploads awaiting transcription
    #[arg(long, value_name = "DIR")]
    pub upload_dir: Option<String>,

    /// Gemini model name
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Transcription deadline in seconds
    #[arg(short = 't', long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Include internal error detail in failure responses
    #[arg(long)]
    pub dev: bool,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_key",
    "model",
    "host",
    "port",
    "upload_dir",
    "max_upload_mb",
    "timeout_secs",
    "dev_mode",
    "log_format",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
