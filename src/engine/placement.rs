// ==========================================
// Reagent Tray Optimizer - Placement Engine
// ==========================================
// Responsibility: one operation, install_set. Given a chosen experiment
// and a set of candidate slots, decide which reagent goes in which slot,
// update the partial tray and the per-experiment tally.
//
// Critical invariant: the volume-descending/slot-ascending pairing rule.
// Test count is MIN-bounded, so the scarce resource is capacity per
// high-volume reagent — higher-volume reagents must get higher-capacity
// (lower-index) slots within a set.
// ==========================================

use tracing::instrument;

use crate::domain::catalog::{Experiment, Reagent};
use crate::domain::placement::{Placement, TrayConfiguration};

/// Stateless engine, not unlike `CapacityFiller`/`PrioritySorter` in a
/// production scheduler: it carries no fields and no dependencies to inject.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlacementEngine;

impl PlacementEngine {
    pub fn new() -> Self {
        Self
    }

    /// Assigns `experiment`'s reagents to `slot_indices` using the
    /// volume-descending/slot-ascending pairing rule, marks the slots
    /// occupied in `config`, and appends the resulting set to the
    /// experiment's result.
    ///
    /// # Panics (debug only)
    /// `slot_indices.len()` must equal `experiment.reagents.len()`, and
    /// every index in `slot_indices` must currently be available in
    /// `config`. The Optimizer is the only caller and always validates
    /// both before calling; violating either here is a programmer error,
    /// not a condition a caller of the crate's public API can trigger.
    #[instrument(skip(self, config), fields(experiment_id = experiment.id, slots = slot_indices.len()))]
    pub fn install_set(
        &self,
        experiment: &Experiment,
        slot_indices: &[usize],
        config: &mut TrayConfiguration,
    ) {
        debug_assert_eq!(
            slot_indices.len(),
            experiment.reagents.len(),
            "slot count must match this experiment's reagent count"
        );
        for &slot in slot_indices {
            debug_assert!(
                config.availability().is_available(slot),
                "slot {slot} is not available"
            );
        }

        let mut reagents: Vec<&Reagent> = experiment.reagents.iter().collect();
        reagents.sort_by(|a, b| b.volume_per_test_ul.cmp(&a.volume_per_test_ul));

        let mut slots: Vec<usize> = slot_indices.to_vec();
        slots.sort_unstable();

        let placements: Vec<Placement> = reagents
            .into_iter()
            .zip(slots)
            .map(|(reagent, slot)| {
                Placement::new(reagent.code, experiment.id, slot, reagent.volume_per_test_ul)
            })
            .collect();

        config.commit_set(experiment.name, placements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog;

    #[test]
    fn pairs_highest_volume_reagent_with_lowest_index_slot() {
        let experiment = catalog::lookup(7).unwrap(); // KR7E1:1100, KR7E2:1860
        let mut config = TrayConfiguration::new();
        let engine = PlacementEngine::new();

        engine.install_set(experiment, &[0, 1], &mut config);

        let slots = config.slots();
        match &slots[0] {
            crate::domain::placement::SlotState::Occupied { reagent_code, .. } => {
                assert_eq!(reagent_code, "KR7E2"); // 1860 ul, the larger volume
            }
            _ => panic!("expected slot 0 occupied"),
        }
        match &slots[1] {
            crate::domain::placement::SlotState::Occupied { reagent_code, .. } => {
                assert_eq!(reagent_code, "KR7E1"); // 1100 ul
            }
            _ => panic!("expected slot 1 occupied"),
        }

        let result = config.results().get(&7).unwrap();
        assert_eq!(result.sets[0].tests_per_set, 145); // floor(270000/1860)
    }

    #[test]
    fn pairing_holds_regardless_of_input_slot_order() {
        let experiment = catalog::lookup(7).unwrap();
        let mut config = TrayConfiguration::new();
        let engine = PlacementEngine::new();

        // Pass slots out of order; the engine must still sort them ascending.
        engine.install_set(experiment, &[1, 0], &mut config);

        match &config.slots()[0] {
            crate::domain::placement::SlotState::Occupied { reagent_code, .. } => {
                assert_eq!(reagent_code, "KR7E2");
            }
            _ => panic!("expected slot 0 occupied"),
        }
    }
}
