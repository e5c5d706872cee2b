//! Clients command implementation

use crate::cli::output::{format_clients_json, format_clients_table};
use crate::cli::ClientsArgs;
use crate::filter::{client_facets, filter_facets};
use crate::store::{clients_or_empty, machines_or_empty, SharedStore};

/// Handle clients command
///
/// Uses the store's client endpoint and falls back to counting the roster
/// when that endpoint yields nothing.
pub async fn handle_clients(
    args: &ClientsArgs,
    store: SharedStore,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut clients = clients_or_empty(store.as_ref()).await;
    if clients.is_empty() {
        tracing::debug!("Client list empty, counting clients from the roster");
        clients = client_facets(&machines_or_empty(store.as_ref(), None).await);
    }

    if let Some(ref term) = args.filter {
        clients = filter_facets(&clients, term);
    }

    if args.json {
        Ok(format_clients_json(&clients)?)
    } else {
        Ok(format_clients_table(&clients))
    }
}
