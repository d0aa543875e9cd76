//! Pipeline phase derivation
//!
//! A review moves through a fixed eleven-stage pipeline. The active
//! stage is derived from the persisted `ReviewStatus` alone; per-stage
//! statuses follow from the active index and a static gate table. The
//! whole module is pure: identical inputs always produce identical
//! outputs, with no clock or hidden state.
//!
//! Derived phase state is not server state and must never be cached.

use crate::models::ReviewStatus;
use serde::{Deserialize, Serialize};

/// Number of pipeline phases
pub const PHASE_COUNT: usize = 11;

/// Static description of one pipeline phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDef {
    /// 1-based position in the pipeline
    pub number: u8,
    pub name: &'static str,
    /// Gate phases require explicit human approval before the pipeline
    /// may advance past them.
    pub gate: bool,
}

/// The fixed pipeline, in order
pub const PHASES: [PhaseDef; PHASE_COUNT] = [
    PhaseDef { number: 1, name: "Protocol development", gate: false },
    PhaseDef { number: 2, name: "Literature search", gate: false },
    PhaseDef { number: 3, name: "Deduplication", gate: false },
    PhaseDef { number: 4, name: "Title/abstract screening", gate: false },
    PhaseDef { number: 5, name: "Full-text screening", gate: true },
    PhaseDef { number: 6, name: "Data extraction", gate: false },
    PhaseDef { number: 7, name: "Risk of bias assessment", gate: false },
    PhaseDef { number: 8, name: "Meta-analysis", gate: false },
    PhaseDef { number: 9, name: "Publication bias assessment", gate: false },
    PhaseDef { number: 10, name: "Certainty of evidence", gate: true },
    PhaseDef { number: 11, name: "Final report", gate: false },
];

/// Derived status of a single phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseStatus {
    Complete,
    Running,
    Gate,
    Pending,
}

/// Derived pipeline position for one review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePlan {
    /// 1-based index of the active phase
    pub active_phase: u8,
    /// Status per phase, indexed by pipeline order
    pub statuses: [PhaseStatus; PHASE_COUNT],
}

impl PhasePlan {
    /// Status of a phase by its 1-based number
    pub fn status_of(&self, phase_number: u8) -> Option<PhaseStatus> {
        if (1..=PHASE_COUNT as u8).contains(&phase_number) {
            Some(self.statuses[phase_number as usize - 1])
        } else {
            None
        }
    }
}

/// Map a review status to its pipeline position.
///
/// The status domain is closed, so this is total; an out-of-domain wire
/// value is rejected at decode time, never silently defaulted here.
pub fn active_phase(status: ReviewStatus) -> u8 {
    match status {
        ReviewStatus::Draft => 1,
        ReviewStatus::Active => 2,
        ReviewStatus::Completed | ReviewStatus::Archived => 11,
    }
}

/// Derive the full per-phase status vector for a review.
pub fn derive_phase(status: ReviewStatus) -> PhasePlan {
    let active = active_phase(status);
    PhasePlan {
        active_phase: active,
        statuses: statuses_for(active),
    }
}

fn statuses_for(active: u8) -> [PhaseStatus; PHASE_COUNT] {
    let mut statuses = [PhaseStatus::Pending; PHASE_COUNT];
    for (slot, def) in statuses.iter_mut().zip(PHASES.iter()) {
        *slot = if def.number < active {
            PhaseStatus::Complete
        } else if def.number == active {
            if def.gate {
                PhaseStatus::Gate
            } else {
                PhaseStatus::Running
            }
        } else {
            PhaseStatus::Pending
        };
    }
    statuses
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [ReviewStatus; 4] = [
        ReviewStatus::Draft,
        ReviewStatus::Active,
        ReviewStatus::Completed,
        ReviewStatus::Archived,
    ];

    #[test]
    fn test_draft_starts_at_phase_one() {
        let plan = derive_phase(ReviewStatus::Draft);
        assert_eq!(plan.active_phase, 1);
        assert_eq!(plan.status_of(1), Some(PhaseStatus::Running));
        for p in 2..=11 {
            assert_eq!(plan.status_of(p), Some(PhaseStatus::Pending));
        }
    }

    #[test]
    fn test_active_runs_phase_two() {
        let plan = derive_phase(ReviewStatus::Active);
        assert_eq!(plan.active_phase, 2);
        assert_eq!(plan.status_of(1), Some(PhaseStatus::Complete));
        assert_eq!(plan.status_of(2), Some(PhaseStatus::Running));
        for p in 3..=11 {
            assert_eq!(plan.status_of(p), Some(PhaseStatus::Pending));
        }
    }

    #[test]
    fn test_completed_reaches_final_report() {
        let plan = derive_phase(ReviewStatus::Completed);
        assert_eq!(plan.active_phase, 11);
        for p in 1..=10 {
            assert_eq!(plan.status_of(p), Some(PhaseStatus::Complete));
        }
        assert_eq!(plan.status_of(11), Some(PhaseStatus::Running));
    }

    #[test]
    fn test_archived_matches_completed() {
        assert_eq!(
            derive_phase(ReviewStatus::Archived),
            derive_phase(ReviewStatus::Completed)
        );
    }

    #[test]
    fn test_deterministic_over_the_whole_domain() {
        for status in ALL_STATUSES {
            assert_eq!(derive_phase(status), derive_phase(status));
        }
    }

    #[test]
    fn test_exactly_one_phase_is_active() {
        for status in ALL_STATUSES {
            let plan = derive_phase(status);
            let active = plan
                .statuses
                .iter()
                .filter(|s| matches!(s, PhaseStatus::Running | PhaseStatus::Gate))
                .count();
            assert_eq!(active, 1, "status {:?}", status);
        }
    }

    #[test]
    fn test_gate_phases_surface_as_gate_when_active() {
        let statuses = statuses_for(5);
        assert_eq!(statuses[4], PhaseStatus::Gate);
        assert_eq!(statuses[3], PhaseStatus::Complete);
        assert_eq!(statuses[5], PhaseStatus::Pending);

        let statuses = statuses_for(10);
        assert_eq!(statuses[9], PhaseStatus::Gate);
    }

    #[test]
    fn test_phase_table_is_ordered() {
        for (i, def) in PHASES.iter().enumerate() {
            assert_eq!(def.number as usize, i + 1);
        }
    }

    #[test]
    fn test_status_of_rejects_out_of_range() {
        let plan = derive_phase(ReviewStatus::Draft);
        assert_eq!(plan.status_of(0), None);
        assert_eq!(plan.status_of(12), None);
    }
}
