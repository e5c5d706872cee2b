//! Locate command implementation

use crate::cli::output::status_label;
use crate::cli::LocateArgs;
use crate::config::FleetscopeConfig;
use crate::session::DashboardSession;
use crate::store::SharedStore;
use crate::viewport::HeadlessMap;
use serde_json::json;
use std::sync::Arc;

/// Handle locate command
///
/// Drives a headless map through the viewport controller and reports where
/// it ended up.
pub async fn handle_locate(
    args: &LocateArgs,
    store: SharedStore,
    config: &FleetscopeConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let roster = store.list_machines(None).await?;

    let mut session =
        DashboardSession::new(Arc::clone(&store), config, HeadlessMap::from_config(&config.map));
    session.set_roster(roster);

    let Some(machine) = session.locate_serial(&args.serial) else {
        let known = session
            .roster()
            .iter()
            .any(|m| m.serial_number.eq_ignore_ascii_case(&args.serial));
        return Err(if known {
            format!("Machine {} has no GPS position", args.serial).into()
        } else {
            format!("Machine not found: {}", args.serial).into()
        });
    };

    let map = session.map();
    if args.json {
        return Ok(serde_json::to_string_pretty(&json!({
            "serialNumber": machine.serial_number,
            "client": machine.client,
            "status": machine.status,
            "center": map.center,
            "zoom": map.zoom,
        }))?);
    }

    Ok(format!(
        "✓ Map centered on {} ({}, {}) at {:.4}, {:.4} zoom {}",
        machine.serial_number,
        machine.client,
        status_label(machine.status),
        map.center.lat,
        map.center.lng,
        map.zoom
    ))
}
