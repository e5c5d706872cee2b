//! Nearby opportunities.
//!
//! When a technician is sent to one machine, other machines within a short
//! radius are candidates for the same trip.

use crate::model::{Location, Machine};
use geo::{HaversineDistance, Point};
use serde::Serialize;

/// Default search radius around the target machine.
pub const DEFAULT_RADIUS_KM: f64 = 20.0;

/// A machine close to the target, with its great-circle distance.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyMachine {
    pub machine: Machine,
    pub distance_km: f64,
}

fn point(location: &Location) -> Point<f64> {
    Point::new(location.lng, location.lat)
}

/// Great-circle distance in kilometres.
pub fn distance_km(a: &Location, b: &Location) -> f64 {
    point(a).haversine_distance(&point(b)) / 1000.0
}

/// Machines with a fix within `radius_km` of `target`, nearest first.
///
/// The target itself and machines without a fix are excluded. A target
/// without a fix has no neighbours.
pub fn nearby(target: &Machine, fleet: &[Machine], radius_km: f64) -> Vec<NearbyMachine> {
    if !target.location.has_fix() {
        return Vec::new();
    }

    let mut found: Vec<NearbyMachine> = fleet
        .iter()
        .filter(|m| m.id != target.id && m.location.has_fix())
        .filter_map(|m| {
            let distance_km = distance_km(&target.location, &m.location);
            (distance_km <= radius_km).then(|| NearbyMachine {
                machine: m.clone(),
                distance_km,
            })
        })
        .collect();

    found.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    found
}
