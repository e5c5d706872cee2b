//! Output formatting helpers for CLI commands

use crate::model::{BadgeTone, ClientStats, Machine, MachineContext, MachineStatus, ProgramBadge};
use crate::proximity::NearbyMachine;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;

/// Shown in place of coordinates for machines without a fix
pub const NO_FIX: &str = "Pas de position GPS";

/// Colored status label
pub fn status_label(status: MachineStatus) -> String {
    match status {
        MachineStatus::Operational => "operational".green().to_string(),
        MachineStatus::Maintenance => "maintenance".yellow().to_string(),
        MachineStatus::Critical => "critical".red().to_string(),
    }
}

/// Colored program badge
pub fn badge_label(badge: &ProgramBadge) -> String {
    match badge.tone {
        BadgeTone::Inactive => badge.label.dimmed().to_string(),
        BadgeTone::Active => badge.label.blue().to_string(),
        BadgeTone::Complete => badge.label.green().to_string(),
        BadgeTone::Alert => badge.label.red().bold().to_string(),
    }
}

fn location_cell(machine: &Machine) -> String {
    if machine.location.has_fix() {
        format!("{:.4}, {:.4}", machine.location.lat, machine.location.lng)
    } else {
        NO_FIX.yellow().to_string()
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Format machines as a table
pub fn format_machines_table(machines: &[Machine]) -> String {
    let mut table = new_table(vec![
        "ID",
        "Serial",
        "Model",
        "Client",
        "Status",
        "Interventions",
        "Location",
    ]);

    for m in machines {
        table.add_row(vec![
            Cell::new(m.id),
            Cell::new(&m.serial_number),
            Cell::new(m.model.as_deref().unwrap_or("-")),
            Cell::new(&m.client),
            Cell::new(status_label(m.status)),
            Cell::new(m.pending_interventions.len()),
            Cell::new(location_cell(m)),
        ]);
    }

    table.to_string()
}

/// Format machines as JSON
pub fn format_machines_json(machines: &[Machine]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "count": machines.len(),
        "machines": machines
    }))
}

/// Context search row for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ContextView<'a> {
    #[serde(flatten)]
    pub context: &'a MachineContext,
    pub badges: Vec<ProgramBadge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

impl<'a> From<&'a MachineContext> for ContextView<'a> {
    fn from(context: &'a MachineContext) -> Self {
        Self {
            context,
            badges: context.programs.badges(),
            warning: context.location_warning(),
        }
    }
}

/// Format context search results as a table
pub fn format_context_table(results: &[MachineContext]) -> String {
    let mut table = new_table(vec!["Serial", "Model", "Client", "Status", "Programs", "Location"]);

    for r in results {
        let badges: Vec<String> = r.programs.badges().iter().map(badge_label).collect();
        let location = match r.locatable() {
            Some(l) => format!("{:.4}, {:.4}", l.lat, l.lng),
            None => r.location_warning().unwrap_or(NO_FIX).yellow().to_string(),
        };
        table.add_row(vec![
            Cell::new(&r.serial_number),
            Cell::new(r.model.as_deref().unwrap_or("-")),
            Cell::new(&r.client),
            Cell::new(status_label(r.status)),
            Cell::new(badges.join(" ")),
            Cell::new(location),
        ]);
    }

    table.to_string()
}

/// Format context search results as JSON
pub fn format_context_json(query: &str, results: &[MachineContext]) -> Result<String, serde_json::Error> {
    let views: Vec<ContextView> = results.iter().map(ContextView::from).collect();
    serde_json::to_string_pretty(&json!({
        "query": query,
        "results": views
    }))
}

/// Format clients as a table
pub fn format_clients_table(clients: &[ClientStats]) -> String {
    let mut table = new_table(vec!["Client", "Machines"]);
    for c in clients {
        table.add_row(vec![Cell::new(&c.name), Cell::new(c.count)]);
    }
    table.to_string()
}

/// Format clients as JSON
pub fn format_clients_json(clients: &[ClientStats]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "clients": clients
    }))
}

/// Format nearby machines as a table
pub fn format_nearby_table(found: &[NearbyMachine]) -> String {
    let mut table = new_table(vec!["Serial", "Client", "Status", "Distance"]);
    for n in found {
        table.add_row(vec![
            Cell::new(&n.machine.serial_number),
            Cell::new(&n.machine.client),
            Cell::new(status_label(n.machine.status)),
            Cell::new(format!("{:.1} km", n.distance_km)),
        ]);
    }
    table.to_string()
}

/// Format nearby machines as JSON
pub fn format_nearby_json(
    target: &Machine,
    radius_km: f64,
    found: &[NearbyMachine],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "target": target.serial_number,
        "radius_km": radius_km,
        "machines": found
    }))
}
