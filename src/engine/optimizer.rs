// ==========================================
// Reagent Tray Optimizer - Optimizer
// ==========================================
// Responsibility: order the requested experiments, install one primary set
// per experiment, then greedily install additional sets of the
// currently-minimum experiment until no further set would meaningfully
// raise the tray's minimum.
//
// Data flows one way: caller -> Optimizer -> Placement Engine -> Slot
// Model / Catalog -> result returned upward. No I/O, no persistence, no
// concurrency of its own.
// ==========================================

use tracing::instrument;

use crate::config::{OptimizerConfig, HIGH_VOLUME_THRESHOLD_UL, SLOT_COUNT};
use crate::domain::catalog::{self, Experiment, Reagent};
use crate::domain::placement::TrayConfiguration;
use crate::domain::slot::{capacity_ml, tests_from};
use crate::engine::placement::PlacementEngine;
use crate::error::{OptimizerError, OptimizerResult};

/// Composite Phase 1 ordering key: `(reagent_count, max_volume, -min_volume)`,
/// sorted descending. Encoding `-min_volume` as a signed value lets the
/// whole tuple sort with a single descending comparison instead of mixed
/// ascending/descending fields.
type SortKey = (usize, u32, i64);

/// Driver that composes the Placement Engine, Slot Model and Catalog. Owns
/// no state across calls — every `optimize` call builds its own
/// [`TrayConfiguration`] from scratch and hands it to the caller.
#[derive(Debug, Clone, Copy)]
pub struct TrayOptimizer {
    config: OptimizerConfig,
    placement_engine: PlacementEngine,
}

impl TrayOptimizer {
    pub fn new() -> Self {
        Self::with_config(OptimizerConfig::default())
    }

    pub fn with_config(config: OptimizerConfig) -> Self {
        Self {
            config,
            placement_engine: PlacementEngine,
        }
    }

    /// Packs `requested_experiment_ids` into a 16-slot tray, maximizing the
    /// number of tests achievable before the tray is exhausted. See
    /// `spec.md` §4.4 for the full algorithm.
    #[instrument(skip(self), fields(requested = requested_experiment_ids.len()))]
    pub fn optimize(&self, requested_experiment_ids: &[u32]) -> OptimizerResult<TrayConfiguration> {
        let experiments: Vec<&'static Experiment> = requested_experiment_ids
            .iter()
            .map(|&id| catalog::lookup(id))
            .collect::<OptimizerResult<_>>()?;

        let total_reagents: usize = experiments.iter().map(|e| e.reagents.len()).sum();
        if total_reagents > SLOT_COUNT {
            let per_experiment = experiments
                .iter()
                .map(|e| (e.name.to_string(), e.reagents.len()))
                .collect();
            return Err(OptimizerError::CapacityExceeded {
                total_reagents,
                limit: SLOT_COUNT,
                per_experiment,
            });
        }

        let mut ordered = experiments;
        ordered.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)).then(a.id.cmp(&b.id)));

        let mut config = TrayConfiguration::new();

        for experiment in &ordered {
            self.place_primary_set(experiment, &mut config)?;
        }

        self.install_additional_sets(&mut config);

        Ok(config)
    }

    /// Phase 1: install exactly one set for `experiment`.
    fn place_primary_set(
        &self,
        experiment: &'static Experiment,
        config: &mut TrayConfiguration,
    ) -> OptimizerResult<()> {
        let n = experiment.reagents.len();

        let has_high_volume_reagent = experiment
            .reagents
            .iter()
            .any(|r| r.volume_per_test_ul > HIGH_VOLUME_THRESHOLD_UL);

        if has_high_volume_reagent {
            let available_large: Vec<usize> =
                config.availability().ascending().filter(|&s| s < 4).collect();
            if available_large.len() >= n {
                let slots = &available_large[..n];
                self.placement_engine.install_set(experiment, slots, config);
                return Ok(());
            }
        }

        let picked = self.pick_by_efficiency(experiment, config)?;
        self.placement_engine.install_set(experiment, &picked, config);
        Ok(())
    }

    /// Per-reagent greedy efficiency slot selection (the fallback used
    /// whenever the high-volume routing in Phase 1 doesn't apply or
    /// doesn't have enough large slots left).
    fn pick_by_efficiency(
        &self,
        experiment: &'static Experiment,
        config: &TrayConfiguration,
    ) -> OptimizerResult<Vec<usize>> {
        let mut reagents_desc: Vec<&Reagent> = experiment.reagents.iter().collect();
        reagents_desc.sort_by(|a, b| b.volume_per_test_ul.cmp(&a.volume_per_test_ul));

        let mut picked: Vec<usize> = Vec::with_capacity(reagents_desc.len());
        for reagent in reagents_desc {
            let mut best: Option<(usize, f64)> = None;
            for slot in config.availability().ascending() {
                if picked.contains(&slot) {
                    continue;
                }
                let capacity = capacity_ml(slot);
                let tests = tests_from(reagent.volume_per_test_ul, capacity);
                let efficiency = tests as f64 / capacity as f64;
                let is_better = match best {
                    None => true,
                    Some((_, best_efficiency)) => efficiency > best_efficiency,
                };
                if is_better {
                    best = Some((slot, efficiency));
                }
            }
            match best {
                Some((slot, _)) => picked.push(slot),
                None => {
                    return Err(OptimizerError::InternalInfeasible {
                        experiment_id: experiment.id,
                    })
                }
            }
        }

        if picked.len() != experiment.reagents.len() {
            return Err(OptimizerError::InternalInfeasible {
                experiment_id: experiment.id,
            });
        }

        Ok(picked)
    }

    /// Phase 2: greedily install additional sets of the currently-minimum
    /// experiment until the available-slot set is empty or the projected
    /// improvement no longer clears the configured ratio.
    fn install_additional_sets(&self, config: &mut TrayConfiguration) {
        loop {
            if config.availability().is_empty() {
                break;
            }

            let min_id = match config
                .results()
                .iter()
                .min_by_key(|(&id, result)| (result.total_tests, id))
            {
                Some((&id, _)) => id,
                None => break,
            };

            // Always present: Phase 1 installed a primary set for every
            // requested experiment before this loop runs.
            let experiment = catalog::lookup(min_id).expect("min experiment must be in catalog");
            let n = experiment.reagents.len();

            if (config.availability().count() as usize) < n {
                break;
            }

            let picked = config.availability().lowest_n(n);

            let projected = self.project_tests_per_set(experiment, &picked);
            let current_total = config.results().get(&min_id).unwrap().total_tests;

            let threshold = current_total as f64 * self.config.additional_set_improvement_ratio;
            if (projected as f64) > threshold {
                self.placement_engine.install_set(experiment, &picked, config);
            } else {
                break;
            }
        }
    }

    /// Projects the `tests_per_set` an additional set would yield if
    /// installed at `picked_slots`, using the same volume-descending /
    /// slot-ascending pairing the Placement Engine would actually apply.
    fn project_tests_per_set(&self, experiment: &Experiment, picked_slots: &[usize]) -> u32 {
        let mut reagents_desc: Vec<&Reagent> = experiment.reagents.iter().collect();
        reagents_desc.sort_by(|a, b| b.volume_per_test_ul.cmp(&a.volume_per_test_ul));

        let mut slots_asc = picked_slots.to_vec();
        slots_asc.sort_unstable();

        reagents_desc
            .into_iter()
            .zip(slots_asc)
            .map(|(reagent, slot)| tests_from(reagent.volume_per_test_ul, capacity_ml(slot)))
            .min()
            .unwrap_or(0)
    }
}

impl Default for TrayOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_key(e: &Experiment) -> SortKey {
    let count = e.reagents.len();
    let max_vol = e.reagents.iter().map(|r| r.volume_per_test_ul).max().unwrap_or(0);
    let min_vol = e.reagents.iter().map(|r| r.volume_per_test_ul).min().unwrap_or(0);
    (count, max_vol, -(min_vol as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_orders_by_count_then_max_volume_then_neg_min_volume() {
        let e16 = catalog::lookup(16).unwrap(); // 4 reagents, all 1000
        let e7 = catalog::lookup(7).unwrap(); // 2 reagents, 1100/1860
        assert!(sort_key(e16) > sort_key(e7)); // more reagents wins first
    }

    #[test]
    fn single_experiment_one_matches_boundary_scenario() {
        let optimizer = TrayOptimizer::new();
        let config = optimizer.optimize(&[1]).unwrap();

        let slots = config.slots();
        match &slots[0] {
            crate::domain::placement::SlotState::Occupied { reagent_code, .. } => {
                assert_eq!(reagent_code, "KR1E");
            }
            _ => panic!("expected slot 0 occupied"),
        }
        match &slots[1] {
            crate::domain::placement::SlotState::Occupied { reagent_code, .. } => {
                assert_eq!(reagent_code, "KR1S");
            }
            _ => panic!("expected slot 1 occupied"),
        }

        let result = config.results().get(&1).unwrap();
        assert!(result.total_tests > 0);
        let summed: u64 = result.sets.iter().map(|s| s.tests_per_set as u64).sum();
        assert_eq!(result.total_tests, summed);
    }

    #[test]
    fn high_volume_experiment_routes_to_large_slots() {
        let optimizer = TrayOptimizer::new();
        let config = optimizer.optimize(&[7]).unwrap();

        let result = config.results().get(&7).unwrap();
        assert_eq!(result.sets[0].tests_per_set, 145);
    }

    #[test]
    fn unknown_experiment_id_errors() {
        let optimizer = TrayOptimizer::new();
        let err = optimizer.optimize(&[1, 999]).unwrap_err();
        assert_eq!(err, OptimizerError::UnknownExperiment { id: 999 });
    }

    #[test]
    fn capacity_exceeded_when_reagents_exceed_sixteen() {
        let optimizer = TrayOptimizer::new();
        // 4 + 3 + 3 + 3 + 3 + 3 = 19
        let err = optimizer.optimize(&[16, 17, 19, 30, 29, 6]).unwrap_err();
        match err {
            OptimizerError::CapacityExceeded {
                total_reagents,
                limit,
                ..
            } => {
                assert_eq!(total_reagents, 19);
                assert_eq!(limit, 16);
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn exact_sixteen_reagent_packing_fills_every_slot() {
        let optimizer = TrayOptimizer::new();
        // 4 + 3 + 3 + 3 + 3 = 16
        let config = optimizer.optimize(&[16, 17, 19, 30, 29]).unwrap();
        assert!(config.availability().is_empty());
        for id in [16, 17, 19, 30, 29] {
            let result = config.results().get(&id).unwrap();
            assert_eq!(result.sets.len(), 1, "phase 2 must be a no-op: experiment {id}");
        }
    }

    #[test]
    fn optimize_is_deterministic() {
        let optimizer = TrayOptimizer::new();
        let first = optimizer.optimize(&[1, 7, 16]).unwrap();
        let second = optimizer.optimize(&[1, 7, 16]).unwrap();
        assert_eq!(first, second);
    }
}
