//! Construction timing and placeholder orientation.

use std::time::Duration;

use homestead_domain::{Angle, Footprint, StructureTemplate};

use crate::infrastructure::ports::RegionalPolicy;
use crate::infrastructure::settings::PlacementSettings;

/// How long a structure with a placeholder stays under construction.
///
/// Lot size times the per-lot unit, except for templates in the regulated
/// category: those take the partition's base delay when it has a regional
/// policy.
pub fn construction_duration(
    template: &StructureTemplate,
    policy: Option<&dyn RegionalPolicy>,
    settings: &PlacementSettings,
) -> Duration {
    let regulated = template.path.is_in_category(&settings.regulated_marker);
    let ms = match policy {
        Some(policy) if regulated => {
            u64::from(policy.base_placement_delay())
                .saturating_mul(settings.regional_delay_unit_ms)
        }
        _ => u64::from(template.lot_size).saturating_mul(settings.ms_per_lot),
    };
    Duration::from_millis(ms)
}

/// Rotation applied to the placeholder.
///
/// Footprints with more rows than columns get a half turn so the long edge
/// faces the same way whatever the requested heading.
pub fn placeholder_rotation(requested: Angle, footprint: Option<&Footprint>) -> Angle {
    match footprint {
        Some(footprint) if footprint.is_row_elongated() => requested.half_turn(),
        _ => requested,
    }
}
