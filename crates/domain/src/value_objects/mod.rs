//! Value objects - Immutable objects defined by their attributes

mod names;
mod placement;
mod template_path;

// Validated names
pub use names::ActorName;

// Where and how a structure goes down
pub use placement::{Angle, Coordinates, Position};

// Template identity
pub use template_path::{TemplateId, TemplatePath};
