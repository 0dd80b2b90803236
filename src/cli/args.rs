//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// DignityDirective - end-of-life care directive wizard
#[derive(Parser, Debug)]
#[command(name = "dignity-directive")]
#[command(version)]
#[command(about = "Interactive end-of-life care directive wizard with AI-drafted summaries")]
#[command(long_about = None)]
pub struct Cli {
    /// Drafting model for the generated directive document
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Copy the sealed-record hash to the clipboard
    #[arg(short = 'c', long)]
    pub clipboard: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
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
    /// Show the config file path
    Path,
}

/// Parsed wizard options
#[derive(Debug, Clone)]
pub struct WizardOptions {
    pub model: String,
    pub clipboard: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["api_key", "model", "clipboard"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["dignity-directive"]);
        assert!(cli.model.is_none());
        assert!(!cli.clipboard);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_model() {
        let cli = Cli::parse_from(["dignity-directive", "-m", "gemini-2.5-pro"]);
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-pro"));
    }

    #[test]
    fn cli_parses_clipboard_flag() {
        let cli = Cli::parse_from(["dignity-directive", "--clipboard"]);
        assert!(cli.clipboard);
    }

    #[test]
    fn cli_parses_config_subcommand() {
        let cli = Cli::parse_from(["dignity-directive", "config", "get", "model"]);
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Get { key },
            }) => assert_eq!(key, "model"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn config_key_validation() {
        assert!(is_valid_config_key("api_key"));
        assert!(is_valid_config_key("model"));
        assert!(is_valid_config_key("clipboard"));
        assert!(!is_valid_config_key("duration"));
        assert!(!is_valid_config_key(""));
    }
}
