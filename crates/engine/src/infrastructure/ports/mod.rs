//! Port traits for infrastructure boundaries.
//!
//! Everything the placement flow does not own sits behind one of these:
//! - World partitions, template resolution, object creation
//! - The placement authority that builds the final structure
//! - One-shot scheduling
//! - Audit log, its clock, and player mail

mod external;
mod world;

// =============================================================================
// World Ports
// =============================================================================
pub use world::{
    EntityKey, EntityKind, ObjectFactory, RegionalPolicy, TemplateResolver, WorldEntity,
    WorldPartition,
};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    AuditEntry, AuditLog, ClockPort, MailMessage, Notifier, PlacementAuthority, ScheduledJob,
    Scheduler, StringIdMessage, TransactionCode,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{
    MockAuditLog, MockClockPort, MockNotifier, MockPlacementAuthority, MockScheduler,
};

#[cfg(test)]
pub use world::{MockObjectFactory, MockRegionalPolicy, MockTemplateResolver, MockWorldPartition};
