// ==========================================
// Reagent Tray Optimizer - Placement & Configuration Types
// ==========================================
// Responsibility: the finalized-assignment records (Placement, Set,
// ExperimentResult) and the tray-wide Configuration they compose into.
//
// `TrayConfiguration` plays the role the source's "config" dict plays, but
// as an owned local value: the Placement Engine takes it by exclusive
// reference during a single `optimize` call and the Optimizer hands it to
// the caller only once finalized. There is no global mutable config object
// threaded through free functions.
// ==========================================

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::domain::slot::{capacity_ml, tests_from, SLOT_COUNT};

/// A finalized assignment of one reagent to one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub reagent_code: String,
    pub experiment_id: u32,
    pub slot_index: usize,
    pub volume_per_test_ul: u32,
    pub slot_capacity_ml: u32,
    pub tests_possible: u32,
}

impl Placement {
    /// Builds a placement, deriving `slot_capacity_ml` and `tests_possible`
    /// from the slot model so callers can never construct an inconsistent one.
    pub fn new(
        reagent_code: impl Into<String>,
        experiment_id: u32,
        slot_index: usize,
        volume_per_test_ul: u32,
    ) -> Self {
        let slot_capacity_ml = capacity_ml(slot_index);
        let tests_possible = tests_from(volume_per_test_ul, slot_capacity_ml);
        Self {
            reagent_code: reagent_code.into(),
            experiment_id,
            slot_index,
            volume_per_test_ul,
            slot_capacity_ml,
            tests_possible,
        }
    }
}

/// A complete placement of one experiment's reagent list into distinct
/// slots. `tests_per_set` is the MIN over the set's placements' `tests_possible`
/// — the set yields this many tests before its scarcest reagent runs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Set {
    pub placements: Vec<Placement>,
    pub tests_per_set: u32,
}

impl Set {
    pub fn from_placements(placements: Vec<Placement>) -> Self {
        let tests_per_set = placements
            .iter()
            .map(|p| p.tests_possible)
            .min()
            .unwrap_or(0);
        Self {
            placements,
            tests_per_set,
        }
    }
}

/// The per-experiment outcome: its display name, its ordered sets (primary
/// first, then additional), and the sum of their `tests_per_set`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentResult {
    pub name: String,
    pub sets: Vec<Set>,
    pub total_tests: u64,
}

impl ExperimentResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: Vec::new(),
            total_tests: 0,
        }
    }

    pub fn add_set(&mut self, set: Set) {
        self.total_tests += set.tests_per_set as u64;
        self.sets.push(set);
    }
}

/// A tray slot's state: either empty, or occupied by exactly one placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotState {
    Empty,
    Occupied {
        reagent_code: String,
        experiment_id: u32,
        tests_possible: u32,
        volume_per_test_ul: u32,
        capacity_ml: u32,
    },
}

impl SlotState {
    fn from_placement(p: &Placement) -> Self {
        SlotState::Occupied {
            reagent_code: p.reagent_code.clone(),
            experiment_id: p.experiment_id,
            tests_possible: p.tests_possible,
            volume_per_test_ul: p.volume_per_test_ul,
            capacity_ml: p.slot_capacity_ml,
        }
    }
}

/// Fast membership / removal / lowest-available tracking over the 16 slot
/// indices. A bitset over 16 slots fits one machine word and keeps the
/// whole optimizer cache-friendly — the teacher's `HashSet<usize>` would
/// work too, but there is nothing a set gives us here that a u16 doesn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrayAvailability(u16);

impl TrayAvailability {
    pub fn all() -> Self {
        TrayAvailability((((1u32 << SLOT_COUNT) - 1) as u16))
    }

    pub fn is_available(&self, slot_index: usize) -> bool {
        self.0 & (1 << slot_index) != 0
    }

    pub fn mark_used(&mut self, slot_index: usize) {
        self.0 &= !(1u16 << slot_index);
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn lowest_available(&self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    /// Available slot indices in ascending order.
    pub fn ascending(&self) -> impl Iterator<Item = usize> + '_ {
        (0..SLOT_COUNT).filter(move |&i| self.is_available(i))
    }

    /// The `n` lowest-indexed available slots, ascending. Empty if fewer
    /// than `n` are available.
    pub fn lowest_n(&self, n: usize) -> Vec<usize> {
        let picked: Vec<usize> = self.ascending().take(n).collect();
        if picked.len() == n {
            picked
        } else {
            Vec::new()
        }
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.ascending().collect()
    }
}

/// The optimizer's output (and its working state while being built): the
/// 16 slots, the per-experiment results, and the still-available slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayConfiguration {
    slots: [SlotState; SLOT_COUNT],
    results: BTreeMap<u32, ExperimentResult>,
    availability: TrayAvailability,
}

impl TrayConfiguration {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| SlotState::Empty),
            results: BTreeMap::new(),
            availability: TrayAvailability::all(),
        }
    }

    pub fn availability(&self) -> &TrayAvailability {
        &self.availability
    }

    pub fn slots(&self) -> &[SlotState; SLOT_COUNT] {
        &self.slots
    }

    pub fn results(&self) -> &BTreeMap<u32, ExperimentResult> {
        &self.results
    }

    /// Records one complete set's placements, marking their slots occupied
    /// and appending the set to the experiment's result (creating the
    /// result if this is the experiment's first set).
    ///
    /// Callers (the Placement Engine) must have already validated that
    /// every placement's slot is available; this method trusts that and
    /// only asserts it in debug builds.
    pub fn commit_set(&mut self, experiment_name: &str, placements: Vec<Placement>) {
        for p in &placements {
            debug_assert!(
                self.availability.is_available(p.slot_index),
                "slot {} is not available",
                p.slot_index
            );
            self.slots[p.slot_index] = SlotState::from_placement(p);
            self.availability.mark_used(p.slot_index);
        }
        let experiment_id = placements[0].experiment_id;
        let set = Set::from_placements(placements);
        self.results
            .entry(experiment_id)
            .or_insert_with(|| ExperimentResult::new(experiment_name))
            .add_set(set);
    }
}

impl Default for TrayConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for TrayConfiguration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("TrayConfiguration", 3)?;
        state.serialize_field("slots", &self.slots)?;
        state.serialize_field("results", &self.results)?;
        state.serialize_field("available_slots", &self.availability.to_vec())?;
        state.end()
    }
}
