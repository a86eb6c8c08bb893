//! Homestead engine library.
//!
//! Server-side structure placement for a shared, persistent world.
//!
//! ## Structure
//!
//! - `use_cases/` - Placement sessions and the operations that drive them
//! - `infrastructure/` - Port traits, object handles, settings and in-memory adapters
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
