//! Situational report formatting.
//!
//! Deterministic: the same utterance and results always produce the same text.

use crate::config::DispatchConfig;
use crate::model::{Machine, MachineStatus};

/// Reply when the backing search failed.
pub const SEARCH_FAILED: &str =
    "Désolé, la recherche a échoué. Vérifiez la connexion puis réessayez.";

/// Reply to a blank utterance.
pub const EMPTY_UTTERANCE: &str =
    "Précisez votre demande : un client (ex. « GCO »), un numéro de série ou un modèle.";

const ELLIPSIS: &str = "...";

/// Results partitioned by status, roster order kept inside each bucket.
#[derive(Debug, Default)]
pub struct StatusBuckets<'a> {
    pub critical: Vec<&'a Machine>,
    pub maintenance: Vec<&'a Machine>,
    pub operational: Vec<&'a Machine>,
}

impl<'a> StatusBuckets<'a> {
    pub fn classify(machines: &'a [Machine]) -> Self {
        let mut buckets = Self::default();
        for machine in machines {
            match machine.status {
                MachineStatus::Critical => buckets.critical.push(machine),
                MachineStatus::Maintenance => buckets.maintenance.push(machine),
                MachineStatus::Operational => buckets.operational.push(machine),
            }
        }
        buckets
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count > 1 {
        format!("{} {}", count, plural)
    } else {
        format!("{} {}", count, singular)
    }
}

/// Cut `text` to `max_chars` characters, appending an ellipsis when shortened.
pub fn truncate_reason(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// One-line reason for a critical machine.
fn critical_reason(machine: &Machine, max_chars: usize) -> String {
    machine
        .first_actionable_intervention()
        .and_then(|i| i.description.as_deref())
        .filter(|d| !d.trim().is_empty())
        .map(|d| truncate_reason(d, max_chars))
        .unwrap_or_else(|| "motif non renseigné".to_string())
}

/// Build the situational report for `utterance` over `machines`.
pub fn summarize(utterance: &str, machines: &[Machine], config: &DispatchConfig) -> String {
    let utterance = utterance.trim();
    if machines.is_empty() {
        return format!(
            "Aucune machine ne correspond à « {} ». Essayez un nom de client, un numéro de série ou un modèle.",
            utterance
        );
    }

    let buckets = StatusBuckets::classify(machines);
    let mut lines = vec![format!(
        "J'ai trouvé {} pour « {} ».",
        plural(machines.len(), "machine", "machines"),
        utterance
    )];

    if !buckets.critical.is_empty() {
        lines.push(format!(
            "🔴 {} en état critique :",
            plural(buckets.critical.len(), "machine", "machines")
        ));
        for machine in buckets.critical.iter().take(config.max_critical_listed) {
            lines.push(format!(
                "  • {} ({}) : {}",
                machine.serial_number,
                machine.client,
                critical_reason(machine, config.reason_max_chars)
            ));
        }
        let remainder = buckets
            .critical
            .len()
            .saturating_sub(config.max_critical_listed);
        if remainder > 0 {
            lines.push(format!("  ... et {} autres.", remainder));
        }
    }

    if !buckets.maintenance.is_empty() {
        lines.push(format!(
            "🟠 {} en maintenance prévue.",
            plural(buckets.maintenance.len(), "machine", "machines")
        ));
    }

    if !buckets.operational.is_empty() {
        lines.push(format!(
            "🟢 {}.",
            plural(
                buckets.operational.len(),
                "machine opérationnelle",
                "machines opérationnelles"
            )
        ));
    }

    let without_fix = machines
        .iter()
        .filter(|m| m.location.is_sentinel())
        .count();
    if without_fix > 0 {
        lines.push(format!(
            "⚠️ {} sans position GPS (non affichée{} sur la carte).",
            plural(without_fix, "machine", "machines"),
            if without_fix > 1 { "s" } else { "" }
        ));
    }

    lines.join("\n")
}
