// ==========================================
// Reagent Tray Optimizer - Slot Model
// ==========================================
// Responsibility: the tray's fixed slot geometry and the tests-possible
// arithmetic derived from reagent volume vs. slot capacity.
// ==========================================

pub use crate::config::{
    HIGH_VOLUME_THRESHOLD_UL, LARGE_SLOT_CAPACITY_ML, SLOT_COUNT, SMALL_SLOT_CAPACITY_ML,
};

/// Capacity in mL of the slot at `slot_index`.
///
/// Slots `0..=3` are the tray's four large-capacity slots; `4..=15` are the
/// twelve small-capacity slots. This is an invariant of the tray geometry,
/// not data — it never varies between trays.
///
/// # Panics
/// Debug builds assert `slot_index < SLOT_COUNT`. Every slot index in this
/// crate is produced internally from a `0..SLOT_COUNT` range, never from
/// unchecked external input, so this is an invariant check rather than a
/// boundary validation.
pub fn capacity_ml(slot_index: usize) -> u32 {
    debug_assert!(slot_index < SLOT_COUNT, "slot_index out of range: {slot_index}");
    if slot_index < 4 {
        LARGE_SLOT_CAPACITY_ML
    } else {
        SMALL_SLOT_CAPACITY_ML
    }
}

/// Number of tests a slot's reagent can support before it is exhausted.
///
/// `tests_from(volume_per_test_ul, capacity_ml) = floor(capacity_ml * 1000 / volume_per_test_ul)`.
/// Truncates toward zero; a slot never claims to support a fractional test.
pub fn tests_from(volume_per_test_ul: u32, capacity_ml: u32) -> u32 {
    debug_assert!(volume_per_test_ul > 0, "volume_per_test_ul must be positive");
    (capacity_ml as u64 * 1000 / volume_per_test_ul as u64) as u32
}
