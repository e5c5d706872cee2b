use super::{Location, MachineStatus};
use serde::{Deserialize, Serialize};

/// Monitoring programs tracked by the dealer for one machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramStatus {
    /// Telemetry enrollment
    #[serde(default)]
    pub vision_link: bool,
    /// Contract coverage (contract type when covered)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvaf: Option<String>,
    /// Inspection coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection: Option<String>,
    /// Remote-service ratio, formatted as `done/total`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_service: Option<String>,
    /// Pending product-support campaigns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suivi_ps: Option<u32>,
}

/// How a badge should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    /// Program not active for this machine
    Inactive,
    /// Program active
    Active,
    /// Program fully satisfied
    Complete,
    /// Something needs attention
    Alert,
}

/// One program indicator shown in a search result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramBadge {
    pub label: String,
    pub tone: BadgeTone,
}

impl ProgramBadge {
    fn new(label: impl Into<String>, tone: BadgeTone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }
}

impl ProgramStatus {
    /// Remote service is complete when the ratio reads `k/k` with `k > 0`.
    pub fn remote_service_complete(&self) -> bool {
        let Some(ratio) = self.remote_service.as_deref() else {
            return false;
        };
        match ratio.split_once('/') {
            Some((done, total)) => match (done.trim().parse::<u32>(), total.trim().parse::<u32>()) {
                (Ok(done), Ok(total)) => total > 0 && done == total,
                _ => false,
            },
            None => false,
        }
    }

    /// Badges in display order: VL, CVA, ISP, RMT and PS when campaigns are pending.
    pub fn badges(&self) -> Vec<ProgramBadge> {
        let presence = |value: &Option<String>| {
            if value.as_deref().is_some_and(|v| !v.is_empty()) {
                BadgeTone::Active
            } else {
                BadgeTone::Inactive
            }
        };

        let mut badges = vec![
            ProgramBadge::new(
                "VL",
                if self.vision_link {
                    BadgeTone::Active
                } else {
                    BadgeTone::Inactive
                },
            ),
            ProgramBadge::new("CVA", presence(&self.cvaf)),
            ProgramBadge::new("ISP", presence(&self.inspection)),
        ];

        let remote_tone = match self.remote_service.as_deref() {
            None | Some("") => BadgeTone::Inactive,
            Some(_) if self.remote_service_complete() => BadgeTone::Complete,
            Some(_) => BadgeTone::Alert,
        };
        badges.push(ProgramBadge::new("RMT", remote_tone));

        if let Some(pending) = self.suivi_ps.filter(|n| *n > 0) {
            badges.push(ProgramBadge::new(format!("PS: {}", pending), BadgeTone::Alert));
        }

        badges
    }
}

/// Per-machine snapshot returned by `GET /machines/global-search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineContext {
    pub id: i64,
    pub serial_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub client: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub status: MachineStatus,
    #[serde(default)]
    pub programs: ProgramStatus,
}

impl MachineContext {
    /// The location to navigate to, if the machine has a usable fix.
    pub fn locatable(&self) -> Option<&Location> {
        self.location.as_ref().filter(|l| l.has_fix())
    }

    /// Warning shown in the result row when there is nothing to locate.
    pub fn location_warning(&self) -> Option<&'static str> {
        if self.locatable().is_none() {
            Some("Pas de position GPS")
        } else {
            None
        }
    }
}
