// ==========================================
// Reagent Tray Optimizer - Experiment Catalog
// ==========================================
// Responsibility: the fixed, read-only table mapping an experiment id to
// its display name and reagent list. Data, not logic. Process-wide
// immutable constant — known at compile time, so it needs no runtime
// construction (no OnceLock, no lazy_static).
// ==========================================

use crate::error::{OptimizerError, OptimizerResult};

/// One reagent a catalog entry requires, with its fixed per-test volume.
///
/// `code` is opaque and unique only within its owning experiment — the
/// same code may legitimately appear under more than one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reagent {
    pub code: &'static str,
    pub volume_per_test_ul: u32,
}

const fn reagent(code: &'static str, volume_per_test_ul: u32) -> Reagent {
    Reagent {
        code,
        volume_per_test_ul,
    }
}

/// A catalog entry: an experiment id, its display name, and its ordered
/// reagent list. The ordering here is not semantically meaningful — the
/// optimizer reorders reagents by volume before placing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experiment {
    pub id: u32,
    pub name: &'static str,
    pub reagents: &'static [Reagent],
}

// ==========================================
// Catalog data (spec.md §6)
// ==========================================
pub static EXPERIMENTS: &[Experiment] = &[
    Experiment { id: 1, name: "Copper (II) (LR)", reagents: &[reagent("KR1E", 850), reagent("KR1S", 300)] },
    Experiment { id: 2, name: "Lead (II) Cadmium (II)", reagents: &[reagent("KR1E", 850), reagent("KR2S", 400)] },
    Experiment { id: 3, name: "Arsenic (III)", reagents: &[reagent("KR3E", 850), reagent("KR3S", 400)] },
    Experiment { id: 4, name: "Nitrates-N (LR)", reagents: &[reagent("KR4E", 850), reagent("KR4S", 300)] },
    Experiment { id: 5, name: "Chromium (VI) (LR)", reagents: &[reagent("KR5E", 500), reagent("KR5S", 400)] },
    Experiment { id: 6, name: "Manganese (II) (LR)", reagents: &[reagent("KR6E1", 500), reagent("KR6E2", 500), reagent("KR6E3", 300)] },
    Experiment { id: 7, name: "Boron (Dissolved)", reagents: &[reagent("KR7E1", 1100), reagent("KR7E2", 1860)] },
    Experiment { id: 8, name: "Silica (Dissolved)", reagents: &[reagent("KR8E1", 500), reagent("KR8E2", 1600)] },
    Experiment { id: 9, name: "Free Chlorine", reagents: &[reagent("KR9E1", 1000), reagent("KR9E2", 1000)] },
    Experiment { id: 10, name: "Total Hardness", reagents: &[reagent("KR10E1", 1000), reagent("KR10E2", 1000), reagent("KR10E3", 1600)] },
    Experiment { id: 11, name: "Total Alkalinity (LR)", reagents: &[reagent("KR11E", 1000)] },
    Experiment { id: 12, name: "Orthophosphates-P (LR)", reagents: &[reagent("KR12E1", 500), reagent("KR12E2", 500), reagent("KR12E3", 200)] },
    Experiment { id: 13, name: "Mercury (II)", reagents: &[reagent("KR13E1", 850), reagent("KR13S", 300)] },
    Experiment { id: 14, name: "Selenium (IV)", reagents: &[reagent("KR14E", 500), reagent("KR14S", 300)] },
    Experiment { id: 15, name: "Zinc (II) (LR)", reagents: &[reagent("KR15E", 850), reagent("KR15S", 400)] },
    Experiment { id: 16, name: "Iron (Dissolved)", reagents: &[reagent("KR16E1", 1000), reagent("KR16E2", 1000), reagent("KR16E3", 1000), reagent("KR16E4", 1000)] },
    Experiment { id: 17, name: "Residual Chlorine", reagents: &[reagent("KR17E1", 1000), reagent("KR17E2", 1000), reagent("KR17E3", 1000)] },
    Experiment { id: 18, name: "Zinc (HR)", reagents: &[reagent("KR18E1", 1000), reagent("KR18E2", 1000)] },
    Experiment { id: 19, name: "Manganese (HR)", reagents: &[reagent("KR19E1", 1000), reagent("KR19E2", 1000), reagent("KR19E3", 1000)] },
    Experiment { id: 20, name: "Orthophosphates-P (HR)", reagents: &[reagent("KR20E", 850)] },
    Experiment { id: 21, name: "Total Alkalinity (HR)", reagents: &[reagent("KR21E1", 1000)] },
    Experiment { id: 22, name: "Fluoride", reagents: &[reagent("KR22E1", 1000), reagent("KR22E2", 1000)] },
    Experiment { id: 27, name: "Molybdenum", reagents: &[reagent("KR27E1", 1000), reagent("KR27E2", 1000)] },
    Experiment { id: 28, name: "Nitrates-N (HR)", reagents: &[reagent("KR28E1", 1000), reagent("KR28E2", 2000), reagent("KR28E3", 2000)] },
    Experiment { id: 29, name: "Total Ammonia-N", reagents: &[reagent("KR29E1", 850), reagent("KR29E2", 850), reagent("KR29E3", 850)] },
    Experiment { id: 30, name: "Chromium (HR)", reagents: &[reagent("KR30E1", 1000), reagent("KR30E2", 1000), reagent("KR30E3", 1000)] },
    Experiment { id: 31, name: "Nitrite-N", reagents: &[reagent("KR31E1", 1000), reagent("KR31E2", 1000)] },
    Experiment { id: 34, name: "Nickel (HR)", reagents: &[reagent("KR34E1", 500), reagent("KR34E2", 500)] },
    Experiment { id: 35, name: "Copper (II) (HR)", reagents: &[reagent("KR35E1", 1000), reagent("KR35E2", 1000)] },
    Experiment { id: 36, name: "Sulfate", reagents: &[reagent("KR36E1", 1000), reagent("KR36E2", 2300)] },
    Experiment { id: 40, name: "Potassium", reagents: &[reagent("KR40E1", 1000), reagent("KR40E2", 1000)] },
    Experiment { id: 42, name: "Aluminum-BB", reagents: &[reagent("KR42E1", 1000), reagent("KR42E2", 1000)] },
];

/// The full catalog in catalog order, as `(id, name)` pairs. Used by UI
/// callers that need to present the list of requestable experiments.
pub fn list_experiments() -> Vec<(u32, &'static str)> {
    EXPERIMENTS.iter().map(|e| (e.id, e.name)).collect()
}

/// Look up a catalog entry by id.
pub fn lookup(id: u32) -> OptimizerResult<&'static Experiment> {
    EXPERIMENTS
        .iter()
        .find(|e| e.id == id)
        .ok_or(OptimizerError::UnknownExperiment { id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_id_returns_entry() {
        let exp = lookup(7).unwrap();
        assert_eq!(exp.name, "Boron (Dissolved)");
        assert_eq!(exp.reagents.len(), 2);
    }

    #[test]
    fn lookup_unknown_id_errors() {
        let err = lookup(999).unwrap_err();
        assert_eq!(err, OptimizerError::UnknownExperiment { id: 999 });
    }

    #[test]
    fn list_experiments_preserves_catalog_order() {
        let ids: Vec<u32> = list_experiments().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&42));
        assert_eq!(ids.len(), EXPERIMENTS.len());
    }

    #[test]
    fn reagent_counts_are_within_one_to_four() {
        for exp in EXPERIMENTS {
            assert!(!exp.reagents.is_empty() && exp.reagents.len() <= 4, "{}", exp.name);
        }
    }

    #[test]
    fn catalog_has_thirty_one_entries() {
        assert_eq!(EXPERIMENTS.len(), 31);
    }
}
