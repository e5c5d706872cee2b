use super::FilterState;
use crate::model::Machine;

/// Apply `filters` to `machines`, keeping roster order.
///
/// The region dimension has no dedicated field in the data model: a region
/// matches when it is a case-insensitive substring of the client name.
pub fn derive_visible(machines: &[Machine], filters: &FilterState) -> Vec<Machine> {
    if filters.is_empty() {
        return machines.to_vec();
    }

    let regions: Vec<String> = filters.regions.iter().map(|r| r.to_lowercase()).collect();

    machines
        .iter()
        .filter(|machine| {
            if !filters.status.is_empty() && !filters.status.contains(&machine.status) {
                return false;
            }

            if !filters.clients.is_empty() && !filters.clients.contains(&machine.client) {
                return false;
            }

            if !regions.is_empty() {
                let client = machine.client.to_lowercase();
                if !regions.iter().any(|region| client.contains(region.as_str())) {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect()
}
