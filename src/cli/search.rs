//! Search command implementation

use crate::cli::output::{format_context_json, format_context_table};
use crate::cli::SearchArgs;
use crate::config::FleetscopeConfig;
use crate::search::ContextSearch;
use crate::store::SharedStore;

/// Handle search command
///
/// Runs one lookup through the debounced context search and waits for it to
/// settle. Store failures show up as an empty result list.
pub async fn handle_search(
    args: &SearchArgs,
    store: SharedStore,
    config: &FleetscopeConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let text = args.text.trim();
    let min = config.search.min_query_length;
    if text.chars().count() < min {
        return Err(format!("Search text must be at least {} characters", min).into());
    }

    let search = ContextSearch::new(store, config.search.clone());
    search.set_query(text);
    let snapshot = search.settled().await;

    if args.json {
        return Ok(format_context_json(text, &snapshot.results)?);
    }

    if snapshot.results.is_empty() {
        return Ok(format!("No machine matches '{}'", text));
    }
    Ok(format_context_table(&snapshot.results))
}
