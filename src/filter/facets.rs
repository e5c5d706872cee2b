use crate::model::{ClientStats, Machine};
use std::collections::HashMap;

/// Distinct clients of `machines` with their machine counts, sorted by name.
pub fn client_facets(machines: &[Machine]) -> Vec<ClientStats> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for machine in machines {
        *counts.entry(machine.client.as_str()).or_default() += 1;
    }

    let mut facets: Vec<ClientStats> = counts
        .into_iter()
        .map(|(name, count)| ClientStats {
            name: name.to_string(),
            count,
        })
        .collect();
    facets.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    facets
}

/// Keep the facets whose name contains `term` (case-insensitive). An empty term keeps all.
pub fn filter_facets(facets: &[ClientStats], term: &str) -> Vec<ClientStats> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return facets.to_vec();
    }
    facets
        .iter()
        .filter(|facet| facet.name.to_lowercase().contains(&term))
        .cloned()
        .collect()
}
