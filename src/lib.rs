// ==========================================
// Reagent Tray Optimizer - Core Library
// ==========================================
// Packs requested analytical experiments' reagents into a fixed 16-slot
// tray of two capacity classes, maximizing the number of tests achievable
// before the tray is exhausted. Pure, deterministic, stateless across
// calls — no I/O, no persistence, no concurrency primitives of its own.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - catalog, slot geometry, placement/result types
pub mod domain;

// Engine layer - placement and optimization
pub mod engine;

// Configuration - tray geometry and tuning knobs
pub mod config;

// Error types
pub mod error;

// Logging
pub mod logging;

// ==========================================
// Re-exported core types
// ==========================================

pub use domain::catalog::{list_experiments, lookup, Experiment, Reagent};
pub use domain::placement::{ExperimentResult, Placement, Set, SlotState, TrayAvailability, TrayConfiguration};
pub use domain::slot::{capacity_ml, tests_from};
pub use engine::{PlacementEngine, TrayOptimizer};
pub use error::{OptimizerError, OptimizerResult};
pub use config::OptimizerConfig;

// ==========================================
// Constants
// ==========================================

/// Crate version, re-exported for callers that want to log/report it.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
