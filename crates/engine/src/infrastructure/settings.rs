//! Placement settings.
//!
//! Defaults come from `homestead_domain::placement_defaults`. `from_env` lets
//! an operator override the tunables without a rebuild:
//!
//! | Variable | Field |
//! |---|---|
//! | `PLACEMENT_EXCLUSION_RADIUS` | `exclusion_radius` |
//! | `PLACEMENT_FALLBACK_MS` | `fallback_duration_ms` |
//! | `PLACEMENT_MS_PER_LOT` | `ms_per_lot` |
//! | `PLACEMENT_REGIONAL_UNIT_MS` | `regional_delay_unit_ms` |
//! | `PLACEMENT_REGULATED_MARKER` | `regulated_marker` |

use std::str::FromStr;
use std::time::Duration;

use homestead_domain::placement_defaults;
use homestead_domain::TemplatePath;
use serde::{Deserialize, Serialize};

/// Labels for the construction-complete mail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMail {
    pub sender: String,
    pub subject: String,
    pub body: String,
}

impl Default for CompletionMail {
    fn default() -> Self {
        Self {
            sender: "@player_structure:construction_complete_sender".to_string(),
            subject: "@player_structure:construction_complete_subject".to_string(),
            body: "@player_structure:construction_complete".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    pub exclusion_radius: f32,
    pub fallback_duration_ms: u64,
    pub ms_per_lot: u64,
    pub regional_delay_unit_ms: u64,
    pub regulated_marker: String,
    pub waypoint_template: TemplatePath,
    pub completion_mail: CompletionMail,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            exclusion_radius: placement_defaults::EXCLUSION_ZONE_RADIUS,
            fallback_duration_ms: placement_defaults::FALLBACK_CONSTRUCTION_MS,
            ms_per_lot: placement_defaults::CONSTRUCTION_MS_PER_LOT,
            regional_delay_unit_ms: placement_defaults::REGIONAL_DELAY_UNIT_MS,
            regulated_marker: placement_defaults::REGULATED_TEMPLATE_MARKER.to_string(),
            waypoint_template: TemplatePath::new(placement_defaults::WAYPOINT_TEMPLATE),
            completion_mail: CompletionMail::default(),
        }
    }
}

impl PlacementSettings {
    /// Defaults overlaid with any `PLACEMENT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`. Unparseable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        override_parsed(&lookup, "PLACEMENT_EXCLUSION_RADIUS", &mut settings.exclusion_radius);
        override_parsed(&lookup, "PLACEMENT_FALLBACK_MS", &mut settings.fallback_duration_ms);
        override_parsed(&lookup, "PLACEMENT_MS_PER_LOT", &mut settings.ms_per_lot);
        override_parsed(
            &lookup,
            "PLACEMENT_REGIONAL_UNIT_MS",
            &mut settings.regional_delay_unit_ms,
        );
        if let Some(marker) = lookup("PLACEMENT_REGULATED_MARKER") {
            let marker = marker.trim();
            if marker.is_empty() {
                tracing::warn!("PLACEMENT_REGULATED_MARKER is empty, keeping default");
            } else {
                settings.regulated_marker = marker.to_string();
            }
        }
        settings
    }

    pub fn fallback_duration(&self) -> Duration {
        Duration::from_millis(self.fallback_duration_ms)
    }
}

fn override_parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    target: &mut T,
) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *target = value,
        Err(_) => tracing::warn!(key, value = %raw, "Invalid placement setting, keeping default"),
    }
}
