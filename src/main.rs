use clap::Parser;
use fleetscope::cli::{
    clients, connect, handle_completions, handle_config_init, load_config_with_overrides, locate,
    machines, nearby, query, search, Cli, Commands, ConfigCommands, ConnectionArgs,
};
use fleetscope::config::FleetscopeConfig;
use fleetscope::store::SharedStore;

/// Load config, install tracing and connect to the backing store.
fn prepare(
    connection: &ConnectionArgs,
) -> Result<(FleetscopeConfig, SharedStore), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(connection)?;
    fleetscope::logging::init_tracing(&config.logging)?;
    let store = connect(&config)?;
    Ok((config, store))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result: Result<String, Box<dyn std::error::Error>> = match cli.command {
        Commands::Query(args) => match prepare(&args.connection) {
            Ok((config, store)) => query::handle_query(&args, store, &config).await,
            Err(e) => Err(e),
        },
        Commands::Search(args) => match prepare(&args.connection) {
            Ok((config, store)) => search::handle_search(&args, store, &config).await,
            Err(e) => Err(e),
        },
        Commands::Machines(args) => match prepare(&args.connection) {
            Ok((config, store)) => machines::handle_machines(&args, store, &config).await,
            Err(e) => Err(e),
        },
        Commands::Clients(args) => match prepare(&args.connection) {
            Ok((_, store)) => clients::handle_clients(&args, store).await,
            Err(e) => Err(e),
        },
        Commands::Locate(args) => match prepare(&args.connection) {
            Ok((config, store)) => locate::handle_locate(&args, store, &config).await,
            Err(e) => Err(e),
        },
        Commands::Nearby(args) => match prepare(&args.connection) {
            Ok((_, store)) => nearby::handle_nearby(&args, store).await,
            Err(e) => Err(e),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(String::new())
        }
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
