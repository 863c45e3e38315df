// ==========================================
// Reagent Tray Optimizer - Error Types
// ==========================================
// All precondition violations are ordinary return values, never exceptions
// or panics, so callers (a GUI, a batch pipeline, a fuzzer) can discriminate
// without exceptional control flow.
// ==========================================

use thiserror::Error;

/// Errors the optimizer can return. See `spec.md` §7.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimizerError {
    /// Caller requested an experiment id absent from the catalog.
    #[error("unknown experiment id: {id}")]
    UnknownExperiment { id: u32 },

    /// The sum of reagent counts across all requested experiments exceeds
    /// the tray's slot count.
    #[error(
        "total reagents needed ({total_reagents}) exceeds available slots ({limit})"
    )]
    CapacityExceeded {
        total_reagents: usize,
        limit: usize,
        per_experiment: Vec<(String, usize)>,
    },

    /// Phase 1 could not find slots for a primary set despite passing the
    /// capacity precondition. Indicates a bug in the optimizer itself; a
    /// correct implementation can never return this.
    #[error("internal: could not place a primary set for experiment {experiment_id}")]
    InternalInfeasible { experiment_id: u32 },
}

pub type OptimizerResult<T> = Result<T, OptimizerError>;
