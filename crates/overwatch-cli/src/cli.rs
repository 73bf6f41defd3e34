//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ESP32 Overwatch tooling - back up device config, build the interface, deploy
#[derive(Parser, Debug)]
#[command(name = "overwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Download the device config to backup/ and stage it in data/
    ///
    /// The address is taken from the argument, then the ESP32_IP
    /// environment variable, then an interactive prompt.
    ///
    /// Examples:
    ///   overwatch backup 192.168.1.50
    ///   overwatch backup --no-stage
    Backup {
        /// Device IP address or host name
        address: Option<String>,

        /// Only archive; don't write the staged data/config.json
        #[arg(long)]
        no_stage: bool,

        /// Fetch timeout in seconds (overrides overwatch.toml)
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Rebuild the web interface if its sources changed
    ///
    /// Intended as the pre-step of filesystem image packaging.
    BuildInterface {
        /// Build even if the fingerprint matches
        #[arg(long)]
        force: bool,
    },

    /// Build and upload firmware and filesystem with the staged config
    Deploy {
        /// Don't ask for confirmation when no staged config exists
        #[arg(short, long)]
        yes: bool,
    },

    /// Move stray library checkouts from the project root into lib/
    TidyLibs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_backup_with_address() {
        let cli = Cli::try_parse_from(["overwatch", "backup", "10.0.0.7", "--no-stage"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Backup {
                address: Some("10.0.0.7".into()),
                no_stage: true,
                timeout: None,
            }
        );
    }

    #[test]
    fn test_cli_parse_backup_without_address() {
        let cli = Cli::try_parse_from(["overwatch", "backup"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Backup {
                address: None,
                no_stage: false,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["overwatch", "build-interface", "--force", "-v", "-C", "/p"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/p")));
        assert_eq!(cli.command, Commands::BuildInterface { force: true });
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["overwatch"]).is_err());
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
