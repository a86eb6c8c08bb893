//! Named defaults for structure placement.
//!
//! The engine's `PlacementSettings` starts from these values and lets the
//! environment override them.

/// Radius of the temporary no-build area staked around a placement.
///
/// Guild halls run roughly 55 m long; 64 m covers them in every direction
/// even when the requested point is not the building's center.
pub const EXCLUSION_ZONE_RADIUS: f32 = 64.0;

/// Construction delay used when a template has no construction marker.
pub const FALLBACK_CONSTRUCTION_MS: u64 = 100;

/// Construction delay charged per lot of the structure.
pub const CONSTRUCTION_MS_PER_LOT: u64 = 3_000;

/// Milliseconds per unit of a region's base placement delay.
pub const REGIONAL_DELAY_UNIT_MS: u64 = 1_000;

/// Template paths containing this marker are regulated structures whose
/// delay comes from the region instead of the lot formula.
pub const REGULATED_TEMPLATE_MARKER: &str = "faction_perk";

/// Template used for the waypoint handed to the owner on completion.
pub const WAYPOINT_TEMPLATE: &str = "object/waypoint/world_waypoint_blue.iff";

/// Container hint meaning "no particular slot".
pub const ANY_CONTAINER_SLOT: i32 = -1;
