//! Viewport synchronization.
//!
//! One-directional effect from declared viewport state to an imperative map
//! instance: each distinct `(center, zoom)` request produces exactly one
//! fly-to, after which the map's own interaction state takes over.

use crate::config::MapConfig;
use crate::model::Location;
use serde::Serialize;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<&Location> for LatLng {
    fn from(location: &Location) -> Self {
        Self::new(location.lat, location.lng)
    }
}

/// A requested viewport. `zoom: None` keeps the map's current zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: Option<f64>,
}

impl Viewport {
    pub fn new(lat: f64, lng: f64, zoom: Option<f64>) -> Self {
        Self {
            center: LatLng::new(lat, lng),
            zoom,
        }
    }
}

/// The imperative map being driven.
pub trait MapInstance {
    /// Current zoom level.
    fn zoom(&self) -> f64;

    /// Animate the view to `center` at `zoom`. Fire-and-forget.
    fn fly_to(&mut self, center: LatLng, zoom: f64);
}

/// Applies requested viewports to a map exactly once per distinct request.
///
/// # Examples
///
/// ```
/// use fleetscope::viewport::{HeadlessMap, Viewport, ViewportController};
///
/// let mut map = HeadlessMap::new(14.49, -14.45, 7.0);
/// let mut controller = ViewportController::new();
/// let target = Viewport::new(14.50, -17.25, Some(12.0));
///
/// assert!(controller.apply(&mut map, Some(target)));
/// assert!(!controller.apply(&mut map, Some(target)));
/// assert_eq!(controller.navigations(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ViewportController {
    last_applied: Option<Viewport>,
    navigations: u64,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `requested` to `map`. Returns true when a fly-to was issued.
    ///
    /// `None` means no navigation is pending. A request equal to the last
    /// applied one is ignored.
    pub fn apply(&mut self, map: &mut dyn MapInstance, requested: Option<Viewport>) -> bool {
        let Some(viewport) = requested else {
            return false;
        };
        if self.last_applied == Some(viewport) {
            tracing::trace!(?viewport, "Viewport unchanged, skipping navigation");
            return false;
        }

        let zoom = viewport.zoom.unwrap_or_else(|| map.zoom());
        tracing::debug!(
            lat = viewport.center.lat,
            lng = viewport.center.lng,
            zoom,
            "Flying to viewport"
        );
        map.fly_to(viewport.center, zoom);

        self.last_applied = Some(viewport);
        self.navigations += 1;
        true
    }

    /// Last request that produced a navigation.
    pub fn last_applied(&self) -> Option<Viewport> {
        self.last_applied
    }

    /// Number of fly-to commands issued so far.
    pub fn navigations(&self) -> u64 {
        self.navigations
    }
}

/// Map instance without a renderer: tracks its view and logs each flight.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMap {
    pub center: LatLng,
    pub zoom: f64,
}

impl HeadlessMap {
    pub fn new(lat: f64, lng: f64, zoom: f64) -> Self {
        Self {
            center: LatLng::new(lat, lng),
            zoom,
        }
    }

    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(
            config.default_center[0],
            config.default_center[1],
            config.default_zoom,
        )
    }
}

impl MapInstance for HeadlessMap {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn fly_to(&mut self, center: LatLng, zoom: f64) {
        tracing::info!(lat = center.lat, lng = center.lng, zoom, "Map view moved");
        self.center = center;
        self.zoom = zoom;
    }
}
