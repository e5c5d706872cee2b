//! Machines command implementation

use crate::cli::output::{format_machines_json, format_machines_table};
use crate::cli::MachinesArgs;
use crate::config::FleetscopeConfig;
use crate::filter::FilterUpdate;
use crate::session::DashboardSession;
use crate::store::SharedStore;
use crate::viewport::HeadlessMap;
use std::sync::Arc;

/// Handle machines command
///
/// Fetches the full roster and applies the structured filters the same way
/// the dashboard's filter drawer does.
pub async fn handle_machines(
    args: &MachinesArgs,
    store: SharedStore,
    config: &FleetscopeConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let roster = store.list_machines(None).await?;

    let mut session =
        DashboardSession::new(Arc::clone(&store), config, HeadlessMap::from_config(&config.map));
    session.set_roster(roster);
    session.set_filters(
        FilterUpdate::default()
            .status(args.status.iter().copied())
            .clients(args.client.iter().cloned())
            .regions(args.region.iter().cloned()),
    );

    let visible = session.visible();
    if args.json {
        return Ok(format_machines_json(&visible.machines)?);
    }

    let mut output = format_machines_table(&visible.machines);
    output.push_str(&format!(
        "\n{} of {} machines shown ({} active filters)",
        visible.machines.len(),
        session.roster().len(),
        session.active_filter_count()
    ));
    Ok(output)
}
