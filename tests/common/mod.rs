//! Shared test utilities for Fleetscope integration tests.
//!
//! Builders for machines and search results, plus helpers that mount the
//! dealer API endpoints on a wiremock server.

#![allow(dead_code)]

use fleetscope::config::FleetscopeConfig;
use fleetscope::model::{
    ClientStats, Intervention, Location, Machine, MachineContext, MachineStatus, Priority,
    ProgramStatus,
};
use fleetscope::store::{HttpBackingStore, SharedStore};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Machine Builders
// =============================================================================

/// Machine with a valid fix near Dakar.
pub fn make_machine(id: i64, client: &str, status: MachineStatus) -> Machine {
    Machine::new(id, format!("SN-{:04}", id), client, status)
        .with_model("320D")
        .with_location(Location::new(14.69 + id as f64 * 0.01, -17.44))
}

/// Machine carrying the (0,0) "no fix" sentinel.
pub fn make_unlocated(id: i64, client: &str, status: MachineStatus) -> Machine {
    Machine::new(id, format!("SN-{:04}", id), client, status)
}

/// Critical machine with one pending HIGH intervention.
pub fn make_critical(id: i64, client: &str, reason: &str) -> Machine {
    make_machine(id, client, MachineStatus::Critical).with_intervention(Intervention {
        id: id * 100,
        kind: "repair".to_string(),
        priority: Priority::High,
        status: "PENDING".to_string(),
        description: Some(reason.to_string()),
        date_created: "2024-06-01".to_string(),
    })
}

/// Context search row derived from a machine.
pub fn make_context(machine: &Machine) -> MachineContext {
    MachineContext {
        id: machine.id,
        serial_number: machine.serial_number.clone(),
        model: machine.model.clone(),
        client: machine.client.clone(),
        location: machine.location.has_fix().then(|| machine.location.clone()),
        status: machine.status,
        programs: ProgramStatus {
            vision_link: true,
            ..Default::default()
        },
    }
}

/// Small mixed fleet used across tests.
pub fn sample_fleet() -> Vec<Machine> {
    vec![
        make_critical(1, "Dakar Mining", "Fuite hydraulique sur vérin"),
        make_machine(2, "Thies Carrieres", MachineStatus::Operational),
        make_machine(3, "Dakar Port", MachineStatus::Maintenance),
        make_unlocated(4, "Eiffage", MachineStatus::Operational),
    ]
}

pub fn clients_of(machines: &[Machine]) -> Vec<ClientStats> {
    fleetscope::filter::client_facets(machines)
}

// =============================================================================
// Mock Dealer API
// =============================================================================

/// Mount `GET /machines/` (no search) returning `machines`.
pub async fn mount_roster(server: &MockServer, machines: &[Machine]) {
    Mock::given(method("GET"))
        .and(path("/machines/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(machines))
        .mount(server)
        .await;
}

/// Mount `GET /machines/?search=<term>` returning `machines`.
pub async fn mount_search(server: &MockServer, term: &str, machines: &[Machine]) {
    Mock::given(method("GET"))
        .and(path("/machines/"))
        .and(query_param("search", term))
        .respond_with(ResponseTemplate::new(200).set_body_json(machines))
        .with_priority(1)
        .mount(server)
        .await;
}

/// Mount `GET /machines/global-search?q=<query>` with an optional delay.
pub async fn mount_context(
    server: &MockServer,
    query: &str,
    results: &[MachineContext],
    delay: Duration,
) {
    Mock::given(method("GET"))
        .and(path("/machines/global-search"))
        .and(query_param("q", query))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(results)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

pub async fn mount_clients(server: &MockServer, clients: &[ClientStats]) {
    Mock::given(method("GET"))
        .and(path("/machines/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clients))
        .mount(server)
        .await;
}

/// HTTP store pointed at `server`.
pub fn store_for(server: &MockServer) -> SharedStore {
    Arc::new(HttpBackingStore::with_client(
        server.uri(),
        reqwest::Client::new(),
        Duration::from_secs(5),
    ))
}

/// Default config with a short debounce so tests run in real time.
pub fn fast_config(debounce_ms: u64) -> FleetscopeConfig {
    let mut config = FleetscopeConfig::default();
    config.search.debounce_ms = debounce_ms;
    config
}
