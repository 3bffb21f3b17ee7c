use rand::Rng;
use santa_core::{Assignment, ErrorInfo, GroupSize, RngHandle, SantaError, TrialCount};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::procedure::Procedure;

/// Giver/recipient tallies accumulated over simulated draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    size: usize,
    counts: Vec<u64>,
    trials: u64,
    rejected_draws: u64,
}

impl CountTable {
    /// Creates an empty table for `size` participants.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            counts: vec![0; size * size],
            trials: 0,
            rejected_draws: 0,
        }
    }

    /// Adds one completed draw. The table is left untouched when the
    /// assignment does not fit it.
    pub fn record(&mut self, assignment: &Assignment) -> Result<(), SantaError> {
        let recipients = assignment.recipients();
        let misfit = recipients.len() != self.size
            || recipients.iter().any(|&recipient| recipient >= self.size);
        if misfit {
            return Err(SantaError::InvalidArgument(
                ErrorInfo::new("assignment_shape", "assignment does not fit the count table")
                    .with_context("size", self.size)
                    .with_context("len", recipients.len()),
            ));
        }
        for (giver, &recipient) in recipients.iter().enumerate() {
            self.counts[giver * self.size + recipient] += 1;
        }
        self.trials += 1;
        Ok(())
    }

    /// Notes a draw that ended on a dead branch and was discarded.
    pub fn note_rejected(&mut self) {
        self.rejected_draws += 1;
    }

    /// Number of participants.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Times `giver` was assigned `recipient`, if both are in range.
    pub fn count(&self, giver: usize, recipient: usize) -> Option<u64> {
        if giver >= self.size || recipient >= self.size {
            return None;
        }
        Some(self.counts[giver * self.size + recipient])
    }

    /// Completed draws recorded.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Draws discarded on dead branches.
    pub fn rejected_draws(&self) -> u64 {
        self.rejected_draws
    }
}

/// Performs one sequential draw.
///
/// Returns `None` when an [`Procedure::Ordered`] draw leaves the last
/// participant holding their own name.
pub fn draw_assignment(
    group: GroupSize,
    procedure: Procedure,
    rng: &mut RngHandle,
) -> Option<Assignment> {
    let n = group.get();
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut assigned: Vec<usize> = Vec::with_capacity(n);

    for giver in 0..n {
        let own = remaining.iter().position(|&recipient| recipient == giver);
        let legal = remaining.len() - usize::from(own.is_some());
        if legal == 0 {
            // Only reachable for the last giver, so `giver >= 1`.
            match procedure {
                Procedure::Ordered => return None,
                Procedure::SwapRepair => {
                    let partner = rng.gen_range(0..giver);
                    let swapped = assigned[partner];
                    assigned[partner] = giver;
                    assigned.push(swapped);
                    break;
                }
            }
        }
        let mut slot = rng.gen_range(0..legal);
        if let Some(own) = own {
            if slot >= own {
                slot += 1;
            }
        }
        assigned.push(remaining.remove(slot));
    }

    Some(Assignment::from_recipients(assigned))
}

/// Simulates `trials` completed draws and tallies who gave to whom.
///
/// Under [`Procedure::Ordered`] dead draws are redrawn, so the table always
/// holds exactly `trials` completed draws.
pub fn simulate(
    group: GroupSize,
    trials: TrialCount,
    procedure: Procedure,
    rng: &mut RngHandle,
) -> Result<CountTable, SantaError> {
    let mut table = CountTable::new(group.get());
    while table.trials() < trials.get() {
        match draw_assignment(group, procedure, rng) {
            Some(assignment) => table.record(&assignment)?,
            None => table.note_rejected(),
        }
    }
    debug!(
        n = group.get(),
        trials = table.trials(),
        rejected = table.rejected_draws(),
        procedure = procedure.as_str(),
        "monte carlo simulation finished"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_are_derangements() {
        let mut rng = RngHandle::from_seed(17);
        let group = GroupSize::new(7).unwrap();
        for _ in 0..500 {
            let drawn = draw_assignment(group, Procedure::SwapRepair, &mut rng)
                .expect("swap repair always completes");
            assert!(drawn.is_derangement());
            if let Some(drawn) = draw_assignment(group, Procedure::Ordered, &mut rng) {
                assert!(drawn.is_derangement());
            }
        }
    }

    #[test]
    fn simulate_counts_exactly_the_requested_trials() {
        let mut rng = RngHandle::from_seed(3);
        let table = simulate(
            GroupSize::new(3).unwrap(),
            TrialCount::new(1_000).unwrap(),
            Procedure::Ordered,
            &mut rng,
        )
        .unwrap();
        assert_eq!(table.trials(), 1_000);
        assert!(table.rejected_draws() > 0);
        for giver in 0..3 {
            let row: u64 = (0..3).filter_map(|recipient| table.count(giver, recipient)).sum();
            assert_eq!(row, 1_000);
            assert_eq!(table.count(giver, giver), Some(0));
        }
    }

    #[test]
    fn seeded_simulation_is_reproducible() {
        let group = GroupSize::new(6).unwrap();
        let trials = TrialCount::new(2_000).unwrap();
        let a = simulate(group, trials, Procedure::SwapRepair, &mut RngHandle::from_seed(99)).unwrap();
        let b = simulate(group, trials, Procedure::SwapRepair, &mut RngHandle::from_seed(99)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rejected_draws(), 0);
    }

    #[test]
    fn mismatched_assignments_are_refused() {
        let mut table = CountTable::new(3);
        let short = Assignment::from_recipients(vec![1, 0]);
        let wide = Assignment::from_recipients(vec![1, 2, 5]);
        assert!(table.record(&short).unwrap_err().is_invalid_argument());
        assert!(table.record(&wide).unwrap_err().is_invalid_argument());
        assert_eq!(table.trials(), 0);
        assert_eq!(table.count(0, 5), None);
        assert_eq!(table.count(3, 0), None);
        assert_eq!(table.count(0, 1), Some(0));
    }
}
