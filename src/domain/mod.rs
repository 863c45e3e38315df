// ==========================================
// Reagent Tray Optimizer - Domain Layer
// ==========================================
// Responsibility: entities, static reference data, and the geometry/tests
// arithmetic they carry. No engine logic, no I/O.
// ==========================================

pub mod catalog;
pub mod placement;
pub mod slot;

// Re-export core types
pub use catalog::{Experiment, Reagent};
pub use placement::{ExperimentResult, Placement, Set, SlotState, TrayAvailability, TrayConfiguration};
pub use slot::{
    capacity_ml, tests_from, HIGH_VOLUME_THRESHOLD_UL, LARGE_SLOT_CAPACITY_ML, SLOT_COUNT,
    SMALL_SLOT_CAPACITY_ML,
};
