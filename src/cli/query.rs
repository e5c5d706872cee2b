//! Query command implementation

use crate::cli::output::format_machines_table;
use crate::cli::QueryArgs;
use crate::config::FleetscopeConfig;
use crate::dispatch::{DispatchOutcome, DispatchStatus, QueryDispatcher};
use crate::store::SharedStore;
use crate::working_set::WorkingSet;
use serde_json::json;
use std::fmt::Write;

fn status_name(status: DispatchStatus) -> &'static str {
    match status {
        DispatchStatus::Matched { .. } => "matched",
        DispatchStatus::NoMatch => "no_match",
        DispatchStatus::Blank => "blank",
        DispatchStatus::Failed => "failed",
    }
}

fn format_query_pretty(outcome: &DispatchOutcome) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", outcome.summary);

    if let DispatchStatus::Matched { .. } = outcome.status {
        let _ = writeln!(output);
        let _ = write!(output, "{}", format_machines_table(&outcome.working_set.machines));
    }

    output
}

fn format_query_json(outcome: &DispatchOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "status": status_name(outcome.status),
        "summary": outcome.summary,
        "machines": outcome.working_set.machines,
    }))
}

/// Handle query command
///
/// Never fails because of the backing store: a failed search is reported in
/// the summary text, as the assistant does.
pub async fn handle_query(
    args: &QueryArgs,
    store: SharedStore,
    config: &FleetscopeConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let dispatcher = QueryDispatcher::new(store, config.dispatch.clone());
    let working_set = WorkingSet::new();
    let outcome = dispatcher.dispatch(&args.text(), &working_set).await;

    tracing::debug!(status = status_name(outcome.status), "Query handled");

    if args.json {
        Ok(format_query_json(&outcome)?)
    } else {
        Ok(format_query_pretty(&outcome))
    }
}
