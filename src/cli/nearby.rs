//! Nearby command implementation

use crate::cli::output::{format_nearby_json, format_nearby_table};
use crate::cli::NearbyArgs;
use crate::proximity::nearby;
use crate::store::SharedStore;

/// Handle nearby command
pub async fn handle_nearby(
    args: &NearbyArgs,
    store: SharedStore,
) -> Result<String, Box<dyn std::error::Error>> {
    if !(args.radius.is_finite() && args.radius > 0.0) {
        return Err(format!("Invalid radius: {}. Must be a positive number of km", args.radius).into());
    }

    let roster = store.list_machines(None).await?;
    let target = roster
        .iter()
        .find(|m| m.serial_number.eq_ignore_ascii_case(&args.serial))
        .ok_or_else(|| format!("Machine not found: {}", args.serial))?;
    if !target.location.has_fix() {
        return Err(format!("Machine {} has no GPS position", target.serial_number).into());
    }

    let found = nearby(target, &roster, args.radius);
    tracing::debug!(
        target = %target.serial_number,
        radius_km = args.radius,
        found = found.len(),
        "Nearby machines computed"
    );

    if args.json {
        return Ok(format_nearby_json(target, args.radius, &found)?);
    }
    if found.is_empty() {
        return Ok(format!(
            "No machine within {} km of {}",
            args.radius, target.serial_number
        ));
    }
    Ok(format_nearby_table(&found))
}
