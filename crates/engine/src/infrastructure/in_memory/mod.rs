//! In-memory adapters for the world-side ports.
//!
//! Used by the demo binary and by tests.

mod audit;
mod authority;
mod catalog;
mod factory;
mod partition;

pub use audit::{MailOutbox, TracingAuditLog};
pub use authority::{FootprintAuthority, DEFAULT_STRUCTURE_SPACING};
pub use catalog::TemplateCatalog;
pub use factory::InMemoryObjectFactory;
pub use partition::{FixedRegionalPolicy, InMemoryPartition};
