//! Dashboard session.
//!
//! Owns everything one operator session needs: the filter store, the fleet
//! roster, the Working Machine Set, the context search, the query dispatcher,
//! the viewport controller with its map and the assistant transcript.
//!
//! The visible set is recomputed synchronously on every roster load and
//! filter change, so it is never observed stale. A dispatched query replaces
//! it until the next filter change (last writer wins).

mod transcript;


pub use transcript::{Message, Role, Transcript, GREETING};

use crate::config::{FleetscopeConfig, MapConfig};
use crate::dispatch::{DispatchOutcome, QueryDispatcher};
use crate::filter::{client_facets, derive_visible, FilterState, FilterStore, FilterUpdate};
use crate::model::{ClientStats, Machine, MachineStatus};
use crate::search::{ContextSearch, Selection};
use crate::store::{clients_or_empty, machines_or_empty, SharedStore};
use crate::viewport::{LatLng, MapInstance, Viewport, ViewportController};
use crate::working_set::{WorkingSet, WorkingSetSource, WorkingSnapshot};
use std::sync::Arc;

pub struct DashboardSession<M: MapInstance> {
    store: SharedStore,
    filters: FilterStore,
    roster: Vec<Machine>,
    clients: Vec<ClientStats>,
    working_set: WorkingSet,
    search: ContextSearch,
    dispatcher: QueryDispatcher,
    viewport: ViewportController,
    map: M,
    map_config: MapConfig,
    transcript: Transcript,
}

impl<M: MapInstance> DashboardSession<M> {
    /// Search queries must be fed from within a tokio runtime: the context
    /// search spawns its debounce timers there.
    pub fn new(store: SharedStore, config: &FleetscopeConfig, map: M) -> Self {
        Self {
            search: ContextSearch::new(Arc::clone(&store), config.search.clone()),
            dispatcher: QueryDispatcher::new(Arc::clone(&store), config.dispatch.clone()),
            store,
            filters: FilterStore::new(),
            roster: Vec::new(),
            clients: Vec::new(),
            working_set: WorkingSet::new(),
            viewport: ViewportController::new(),
            map,
            map_config: config.map.clone(),
            transcript: Transcript::new(),
        }
    }

    /// Fetch the full roster and the client list, then recompute the visible set.
    ///
    /// Store failures degrade to an empty roster. Returns the roster size.
    pub async fn load_roster(&mut self) -> usize {
        let (roster, clients) = futures::join!(
            machines_or_empty(self.store.as_ref(), None),
            clients_or_empty(self.store.as_ref())
        );
        // The dedicated endpoint may be unavailable; fall back to counting the roster.
        self.clients = if clients.is_empty() {
            client_facets(&roster)
        } else {
            clients
        };
        self.roster = roster;
        tracing::info!(
            machines = self.roster.len(),
            clients = self.clients.len(),
            "Roster loaded"
        );
        self.recompute();
        self.roster.len()
    }

    /// Replace the roster directly, e.g. from an already fetched snapshot.
    pub fn set_roster(&mut self, roster: Vec<Machine>) {
        self.clients = client_facets(&roster);
        self.roster = roster;
        self.recompute();
    }

    pub fn roster(&self) -> &[Machine] {
        &self.roster
    }

    pub fn clients(&self) -> &[ClientStats] {
        &self.clients
    }

    pub fn filters(&self) -> &FilterState {
        self.filters.filters()
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    pub fn set_filters(&mut self, update: FilterUpdate) {
        self.filters.set_filters(update);
        self.recompute();
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset_filters();
        self.recompute();
    }

    pub fn toggle_status(&mut self, status: MachineStatus) {
        self.filters.toggle_status(status);
        self.recompute();
    }

    pub fn toggle_client(&mut self, client: &str) {
        self.filters.toggle_client(client);
        self.recompute();
    }

    pub fn toggle_region(&mut self, region: &str) {
        self.filters.toggle_region(region);
        self.recompute();
    }

    /// Machines currently on the map.
    pub fn visible(&self) -> Arc<WorkingSnapshot> {
        self.working_set.snapshot()
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    /// Send an utterance to the assistant; records both sides in the transcript.
    pub async fn send_message(&mut self, utterance: &str) -> DispatchOutcome {
        self.transcript.push(Role::User, utterance);
        let outcome = self.dispatcher.dispatch(utterance, &self.working_set).await;
        self.transcript.push(Role::Assistant, outcome.summary.clone());
        outcome
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn search(&self) -> &ContextSearch {
        &self.search
    }

    pub fn set_search_query(&self, text: &str) {
        self.search.set_query(text);
    }

    /// Pick a context search result; flies to it when it has a fix.
    pub fn locate_result(&mut self, machine_id: i64) -> Selection {
        let selection = self.search.select(machine_id);
        if let Selection::Locate(center) = selection {
            self.fly_to(center);
        }
        selection
    }

    /// Fly to a machine of the roster or the working set by serial number.
    ///
    /// Returns the machine when it exists and has a fix.
    pub fn locate_serial(&mut self, serial_number: &str) -> Option<Machine> {
        let snapshot = self.working_set.snapshot();
        let machine = snapshot
            .machines
            .iter()
            .chain(self.roster.iter())
            .find(|m| m.serial_number.eq_ignore_ascii_case(serial_number))
            .filter(|m| m.location.has_fix())
            .cloned()?;
        self.fly_to(LatLng::from(&machine.location));
        Some(machine)
    }

    /// Request a viewport. Returns true when the map moved.
    pub fn locate(&mut self, viewport: Viewport) -> bool {
        self.viewport.apply(&mut self.map, Some(viewport))
    }

    pub fn last_viewport(&self) -> Option<Viewport> {
        self.viewport.last_applied()
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    fn fly_to(&mut self, center: LatLng) -> bool {
        let viewport = Viewport {
            center,
            zoom: Some(self.map_config.locate_zoom),
        };
        self.locate(viewport)
    }

    fn recompute(&self) -> u64 {
        let visible = derive_visible(&self.roster, self.filters.filters());
        self.working_set.replace(
            visible,
            WorkingSetSource::Filtered {
                active_filters: self.filters.active_count(),
            },
        )
    }
}
