//! Core types and refresh simulation for the binwatch smart bin dashboard.

/// Dashboard state and the refresh cycle.
pub mod dashboard;
/// Bins, fill levels, and derived status.
pub mod model;
/// Traits describing bin sources.
pub mod ports;
/// Static report figures.
pub mod reports;
/// Built-in demo data and bin sources.
pub mod seed;
/// Random-walk refresh of fill levels.
pub mod simulate;
/// Fill-level classification.
pub mod status;

pub use dashboard::*;
pub use model::*;
pub use ports::*;
pub use simulate::*;
pub use status::*;
