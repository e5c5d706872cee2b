use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating status of a machine, as computed by the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    /// Running normally
    Operational,
    /// Maintenance is planned (e.g. overdue inspection)
    Maintenance,
    /// Needs urgent action
    #[serde(alias = "breakdown")]
    Critical,
}

impl MachineStatus {
    pub const ALL: [MachineStatus; 3] = [
        MachineStatus::Critical,
        MachineStatus::Maintenance,
        MachineStatus::Operational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Operational => "operational",
            MachineStatus::Maintenance => "maintenance",
            MachineStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MachineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "operational" => Ok(MachineStatus::Operational),
            "maintenance" => Ok(MachineStatus::Maintenance),
            "critical" | "breakdown" => Ok(MachineStatus::Critical),
            _ => Err(format!(
                "Invalid status: {}. Use: operational, maintenance, critical",
                s
            )),
        }
    }
}

/// Intervention priority. Values the core does not know are kept as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

/// A geographic fix. `(0, 0)` is the backing store's "no GPS fix" sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            address: None,
        }
    }

    /// True when this is the `(0, 0)` sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }

    /// True when the location is a usable fix.
    pub fn has_fix(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && !self.is_sentinel()
    }
}

/// A pending intervention attached to exactly one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub id: i64,
    /// Free-form category (alert, campaign, inspection, contract...)
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: Priority,
    /// Workflow status (`PENDING`, `DONE`, ...)
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation date as emitted by the backing store
    pub date_created: String,
}

impl Intervention {
    pub fn is_pending(&self) -> bool {
        self.status.eq_ignore_ascii_case("PENDING")
    }

    pub fn is_high_priority(&self) -> bool {
        self.priority == Priority::High
    }
}

/// A machine of the fleet, as delivered by `GET /machines/`.
///
/// # Examples
///
/// ```
/// use fleetscope::model::{Location, Machine, MachineStatus};
///
/// let machine = Machine::new(1, "GCO-001", "GCO", MachineStatus::Critical)
///     .with_location(Location::new(14.5, -17.2));
/// assert!(machine.location.has_fix());
/// assert!(machine.pending_interventions.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: i64,
    /// Unique, human-facing identifier
    pub serial_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Owning client name
    pub client: String,
    pub location: Location,
    pub status: MachineStatus,
    #[serde(default)]
    pub pending_interventions: Vec<Intervention>,
}

impl Machine {
    pub fn new(
        id: i64,
        serial_number: impl Into<String>,
        client: impl Into<String>,
        status: MachineStatus,
    ) -> Self {
        Self {
            id,
            serial_number: serial_number.into(),
            model: None,
            client: client.into(),
            location: Location::new(0.0, 0.0),
            status,
            pending_interventions: Vec::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_intervention(mut self, intervention: Intervention) -> Self {
        self.pending_interventions.push(intervention);
        self
    }

    /// First intervention that is either `HIGH` priority or still `PENDING`.
    pub fn first_actionable_intervention(&self) -> Option<&Intervention> {
        self.pending_interventions
            .iter()
            .find(|i| i.is_high_priority() || i.is_pending())
    }
}

/// Distinct client name with its machine count (`GET /machines/clients`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStats {
    pub name: String,
    pub count: usize,
}
