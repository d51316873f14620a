// In crates/dashboard/src/lib.rs

pub mod annotations;
pub mod dashboard;
pub mod error;
pub mod state;

// Re-export public types
pub use annotations::AnnotationStore;
pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use state::{recompute, DashboardSnapshot, DashboardState};
