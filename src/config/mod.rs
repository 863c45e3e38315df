// ==========================================
// Reagent Tray Optimizer - Configuration
// ==========================================
// Responsibility: name the tray's geometry and the optimizer's tuning
// knobs in one place. The geometry is a physical invariant of the tray and
// is not meant to change at runtime; the improvement ratio is a tuning
// knob a caller may legitimately want to override.
// ==========================================

/// Number of slots on a tray.
pub const SLOT_COUNT: usize = 16;

/// Capacity in mL of slots `0..=3`.
pub const LARGE_SLOT_CAPACITY_ML: u32 = 270;

/// Capacity in mL of slots `4..=15`.
pub const SMALL_SLOT_CAPACITY_ML: u32 = 140;

/// A reagent volume above this (in microliters) routes its experiment's
/// primary set toward the large-capacity slots in Phase 1.
pub const HIGH_VOLUME_THRESHOLD_UL: u32 = 800;

/// Default Phase 2 stop-condition ratio: an additional set is only
/// installed if its projected `tests_per_set` strictly exceeds this
/// fraction of the experiment's current `total_tests`.
pub const DEFAULT_ADDITIONAL_SET_IMPROVEMENT_RATIO: f64 = 0.5;

/// Tuning knobs for [`crate::engine::optimizer::TrayOptimizer`].
///
/// The tray geometry (slot count, slot capacities, high-volume threshold)
/// is a fixed property of the physical tray and is exposed only as the
/// module-level constants above. `additional_set_improvement_ratio` is the
/// one knob `spec.md` names as likely to change under future product
/// direction, so it is the only field here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerConfig {
    pub additional_set_improvement_ratio: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            additional_set_improvement_ratio: DEFAULT_ADDITIONAL_SET_IMPROVEMENT_RATIO,
        }
    }
}
