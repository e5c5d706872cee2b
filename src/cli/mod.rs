//! CLI module for Fleetscope
//!
//! Command-line interface definitions and handlers for the fleet
//! query-and-visualization engine.
//!
//! # Commands
//!
//! - `query` - Ask the assistant for a situational summary
//! - `search` - Context search with program badges
//! - `machines` - List the fleet, narrowed by structured filters
//! - `clients` - List clients with their machine counts
//! - `locate` - Fly the map to a machine
//! - `nearby` - Machines within a radius of another one
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Situational summary for a free-text query
//! fleetscope query machines critiques
//!
//! # Critical machines of one client, as JSON
//! fleetscope machines --status critical --client "Dakar Mining" --json
//!
//! # Generate shell completions
//! fleetscope completions bash > ~/.bash_completion.d/fleetscope
//! ```

pub mod clients;
pub mod completions;
pub mod config;
pub mod connect;
pub mod locate;
pub mod machines;
pub mod nearby;
pub mod output;
pub mod query;
pub mod search;

pub use completions::handle_completions;
pub use config::handle_config_init;
pub use connect::{connect, load_config_with_overrides};

use crate::model::MachineStatus;
use crate::proximity::DEFAULT_RADIUS_KM;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fleetscope - fleet query and map visualization
#[derive(Parser, Debug)]
#[command(
    name = "fleetscope",
    version,
    about = "Query, filter and locate a heavy-equipment fleet"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the assistant about the fleet
    Query(QueryArgs),
    /// Search machines with program status
    Search(SearchArgs),
    /// List machines
    Machines(MachinesArgs),
    /// List clients
    Clients(ClientsArgs),
    /// Center the map on a machine
    Locate(LocateArgs),
    /// List machines near another machine
    Nearby(NearbyArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that talks to the backing store.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "fleetscope.toml")]
    pub config: PathBuf,

    /// Override the backing store URL
    #[arg(long, env = "FLEETSCOPE_STORE_URL")]
    pub store_url: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FLEETSCOPE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Free-text utterance (e.g. "machines critiques")
    #[arg(required = true, num_args = 1..)]
    pub utterance: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl QueryArgs {
    pub fn text(&self) -> String {
        self.utterance.join(" ")
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Serial number, model or client fragment
    pub text: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct MachinesArgs {
    /// Keep machines with this status (repeatable)
    #[arg(short, long)]
    pub status: Vec<MachineStatus>,

    /// Keep machines of this client (repeatable)
    #[arg(short = 'C', long)]
    pub client: Vec<String>,

    /// Keep machines whose client name contains this region (repeatable)
    #[arg(short, long)]
    pub region: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct ClientsArgs {
    /// Only show clients whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Serial number of the machine
    pub serial: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Debug)]
pub struct NearbyArgs {
    /// Serial number of the target machine
    pub serial: String,

    /// Search radius in kilometres
    #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
    pub radius: f64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "fleetscope.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_query_joins_words() {
        let cli = Cli::try_parse_from(["fleetscope", "query", "machines", "critiques"]).unwrap();
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.text(), "machines critiques");
                assert_eq!(args.connection.config, PathBuf::from("fleetscope.toml"));
                assert!(!args.json);
            }
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_cli_parse_query_requires_utterance() {
        assert!(Cli::try_parse_from(["fleetscope", "query"]).is_err());
    }

    #[test]
    fn test_cli_parse_machines_filters() {
        let cli = Cli::try_parse_from([
            "fleetscope",
            "machines",
            "-s",
            "critical",
            "--status",
            "breakdown",
            "--client",
            "Dakar Mining",
            "-r",
            "thies",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Machines(args) => {
                assert_eq!(
                    args.status,
                    vec![MachineStatus::Critical, MachineStatus::Critical]
                );
                assert_eq!(args.client, vec!["Dakar Mining"]);
                assert_eq!(args.region, vec!["thies"]);
                assert!(args.json);
            }
            _ => panic!("Expected Machines command"),
        }
    }

    #[test]
    fn test_cli_parse_machines_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["fleetscope", "machines", "-s", "broken"]).is_err());
    }

    #[test]
    fn test_cli_parse_nearby_default_radius() {
        let cli = Cli::try_parse_from(["fleetscope", "nearby", "SN-1"]).unwrap();
        match cli.command {
            Commands::Nearby(args) => {
                assert_eq!(args.serial, "SN-1");
                assert_eq!(args.radius, DEFAULT_RADIUS_KM);
            }
            _ => panic!("Expected Nearby command"),
        }
    }

    #[test]
    fn test_cli_parse_store_url_override() {
        let cli = Cli::try_parse_from([
            "fleetscope",
            "clients",
            "--store-url",
            "http://fleet.local:9000",
            "-c",
            "custom.toml",
        ])
        .unwrap();
        match cli.command {
            Commands::Clients(args) => {
                assert_eq!(
                    args.connection.store_url.as_deref(),
                    Some("http://fleet.local:9000")
                );
                assert_eq!(args.connection.config, PathBuf::from("custom.toml"));
            }
            _ => panic!("Expected Clients command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["fleetscope", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => {
                assert!(args.force);
                assert_eq!(args.output, PathBuf::from("fleetscope.toml"));
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
