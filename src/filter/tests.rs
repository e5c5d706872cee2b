use super::*;
use crate::model::{Machine, MachineStatus};

fn machine(id: i64, client: &str, status: MachineStatus) -> Machine {
    Machine::new(id, format!("SN-{}", id), client, status)
}

fn sample_fleet() -> Vec<Machine> {
    vec![
        machine(1, "GCO Diogo", MachineStatus::Operational),
        machine(2, "Sabodala Gold", MachineStatus::Critical),
        machine(3, "GCO Lompoul", MachineStatus::Critical),
        machine(4, "Eiffage Dakar", MachineStatus::Maintenance),
    ]
}

fn ids(machines: &[Machine]) -> Vec<i64> {
    machines.iter().map(|m| m.id).collect()
}

// ============================================================================
// FilterStore
// ============================================================================

#[test]
fn test_store_starts_empty() {
    let store = FilterStore::new();
    assert!(store.filters().is_empty());
    assert_eq!(store.active_count(), 0);
}

#[test]
fn test_set_filters_is_shallow_merge() {
    let mut store = FilterStore::new();
    store.set_filters(FilterUpdate::default().status([MachineStatus::Critical]));
    store.set_filters(FilterUpdate::default().regions(["dakar"]));

    assert!(store.filters().status.contains(&MachineStatus::Critical));
    assert!(store.filters().regions.contains("dakar"));
    assert!(store.filters().clients.is_empty());
    assert_eq!(store.active_count(), 2);
}

#[test]
fn test_set_filters_replaces_named_dimension() {
    let mut store = FilterStore::new();
    store.set_filters(FilterUpdate::default().clients(["GCO", "Sabodala"]));
    store.set_filters(FilterUpdate::default().clients(["Eiffage"]));

    assert_eq!(store.filters().clients.len(), 1);
    assert!(store.filters().clients.contains("Eiffage"));
}

#[test]
fn test_set_filters_deduplicates() {
    let mut store = FilterStore::new();
    store.set_filters(FilterUpdate::default().clients(["GCO", "GCO", "GCO"]));
    assert_eq!(store.active_count(), 1);
}

#[test]
fn test_reset_filters() {
    let mut store = FilterStore::new();
    store.set_filters(
        FilterUpdate::default()
            .status([MachineStatus::Critical, MachineStatus::Maintenance])
            .clients(["GCO"])
            .regions(["Dakar"]),
    );
    assert_eq!(store.active_count(), 4);

    store.reset_filters();
    assert_eq!(store.filters(), &FilterState::default());
    assert_eq!(store.active_count(), 0);
}

#[test]
fn test_toggles() {
    let mut store = FilterStore::new();
    store.toggle_status(MachineStatus::Critical);
    store.toggle_client("GCO");
    store.toggle_region("Dakar");
    assert_eq!(store.active_count(), 3);

    store.toggle_status(MachineStatus::Critical);
    store.toggle_client("GCO");
    store.toggle_region("Dakar");
    assert_eq!(store.active_count(), 0);
}

#[test]
fn test_unknown_values_are_legal() {
    let mut store = FilterStore::new();
    store.set_filters(FilterUpdate::default().clients(["Nobody Inc"]));
    assert_eq!(store.active_count(), 1);
    assert!(derive_visible(&sample_fleet(), store.filters()).is_empty());
}

// ============================================================================
// derive_visible
// ============================================================================

#[test]
fn test_empty_filter_returns_original_list() {
    let fleet = sample_fleet();
    let visible = derive_visible(&fleet, &FilterState::default());
    assert_eq!(visible, fleet);
}

#[test]
fn test_status_dimension() {
    let fleet = vec![
        machine(1, "A", MachineStatus::Operational),
        machine(2, "B", MachineStatus::Critical),
        machine(3, "C", MachineStatus::Critical),
    ];

    let mut store = FilterStore::new();
    store.set_filters(FilterUpdate::default().status([MachineStatus::Critical]));
    assert_eq!(ids(&derive_visible(&fleet, store.filters())), vec![2, 3]);

    store.set_filters(FilterUpdate::default().status([]));
    assert_eq!(derive_visible(&fleet, store.filters()).len(), 3);
}

#[test]
fn test_or_within_dimension() {
    let filters = FilterState {
        status: [MachineStatus::Critical, MachineStatus::Maintenance]
            .into_iter()
            .collect(),
        ..Default::default()
    };
    assert_eq!(ids(&derive_visible(&sample_fleet(), &filters)), vec![2, 3, 4]);
}

#[test]
fn test_and_across_dimensions() {
    let filters = FilterState {
        status: [MachineStatus::Critical].into_iter().collect(),
        clients: ["GCO Lompoul".to_string(), "GCO Diogo".to_string()]
            .into_iter()
            .collect(),
        ..Default::default()
    };
    assert_eq!(ids(&derive_visible(&sample_fleet(), &filters)), vec![3]);
}

#[test]
fn test_client_match_is_exact() {
    let filters = FilterState {
        clients: ["GCO".to_string()].into_iter().collect(),
        ..Default::default()
    };
    assert!(derive_visible(&sample_fleet(), &filters).is_empty());
}

#[test]
fn test_region_is_case_insensitive_substring_of_client() {
    let filters = FilterState {
        regions: ["gco".to_string()].into_iter().collect(),
        ..Default::default()
    };
    assert_eq!(ids(&derive_visible(&sample_fleet(), &filters)), vec![1, 3]);

    let filters = FilterState {
        regions: ["DAKAR".to_string(), "sabodala".to_string()]
            .into_iter()
            .collect(),
        ..Default::default()
    };
    assert_eq!(ids(&derive_visible(&sample_fleet(), &filters)), vec![2, 4]);
}

// ============================================================================
// Client facets
// ============================================================================

#[test]
fn test_client_facets_counts_and_sorting() {
    let fleet = vec![
        machine(1, "sabodala", MachineStatus::Operational),
        machine(2, "GCO", MachineStatus::Critical),
        machine(3, "GCO", MachineStatus::Critical),
        machine(4, "Eiffage", MachineStatus::Maintenance),
    ];

    let facets = client_facets(&fleet);
    let names: Vec<&str> = facets.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Eiffage", "GCO", "sabodala"]);
    assert_eq!(facets[1].count, 2);
}

#[test]
fn test_filter_facets() {
    let facets = client_facets(&sample_fleet());
    let gco = filter_facets(&facets, "gco");
    assert_eq!(gco.len(), 2);
    assert_eq!(filter_facets(&facets, "  ").len(), facets.len());
    assert!(filter_facets(&facets, "zzz").is_empty());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_status() -> impl Strategy<Value = MachineStatus> {
        prop_oneof![
            Just(MachineStatus::Operational),
            Just(MachineStatus::Maintenance),
            Just(MachineStatus::Critical),
        ]
    }

    fn arb_fleet() -> impl Strategy<Value = Vec<Machine>> {
        proptest::collection::vec((arb_status(), "[A-Ca-c]{1,3}"), 0..30).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (status, client))| machine(i as i64, &client, status))
                .collect()
        })
    }

    fn arb_filters() -> impl Strategy<Value = FilterState> {
        (
            proptest::collection::btree_set(arb_status(), 0..3),
            proptest::collection::btree_set("[a-c]{1,2}", 0..3),
            proptest::collection::btree_set("[A-Ca-c]{1,3}", 0..3),
        )
            .prop_map(|(status, regions, clients)| FilterState {
                status,
                regions,
                clients,
            })
    }

    proptest! {
        #[test]
        fn prop_derivation_is_deterministic(fleet in arb_fleet(), filters in arb_filters()) {
            prop_assert_eq!(derive_visible(&fleet, &filters), derive_visible(&fleet, &filters));
        }

        #[test]
        fn prop_empty_filter_is_identity(fleet in arb_fleet()) {
            prop_assert_eq!(derive_visible(&fleet, &FilterState::default()), fleet);
        }

        #[test]
        fn prop_result_is_ordered_subsequence(fleet in arb_fleet(), filters in arb_filters()) {
            let visible = derive_visible(&fleet, &filters);
            let mut source = fleet.iter();
            for m in &visible {
                prop_assert!(source.any(|candidate| candidate == m));
            }
        }

        #[test]
        fn prop_every_visible_machine_satisfies_filters(fleet in arb_fleet(), filters in arb_filters()) {
            for m in derive_visible(&fleet, &filters) {
                prop_assert!(filters.status.is_empty() || filters.status.contains(&m.status));
                prop_assert!(filters.clients.is_empty() || filters.clients.contains(&m.client));
                prop_assert!(
                    filters.regions.is_empty()
                        || filters.regions.iter().any(|r| m.client.to_lowercase().contains(&r.to_lowercase()))
                );
            }
        }
    }
}
