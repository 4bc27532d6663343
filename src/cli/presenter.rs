//! CLI presenter for output formatting

use std::net::SocketAddr;

use colored::*;

use crate::server::PROCESS_AUDIO_PATH;

/// Presenter for CLI output formatting
#[derive(Debug, Default, Clone, Copy)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Announce the bound address
    pub fn listening(&self, addr: SocketAddr) {
        self.success(&format!("Listening on {}", format_endpoint(addr)));
    }
}

/// Full URL of the upload endpoint for a bound address
pub fn format_endpoint(addr: SocketAddr) -> String {
    format!("http://{}{}", addr, PROCESS_AUDIO_PATH)
}
