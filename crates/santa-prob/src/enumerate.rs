use std::collections::BTreeMap;

use santa_core::{Assignment, ErrorInfo, GroupSize, SantaError};
use tracing::debug;

use crate::procedure::Procedure;

/// Largest group the exact enumerator accepts. Branching grows like `(n-1)!`.
pub const MAX_EXACT_GROUP: usize = 11;

/// Probability mass of every complete assignment reachable by a draw.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentDistribution {
    size: usize,
    procedure: Procedure,
    masses: BTreeMap<Assignment, f64>,
    dead_mass: f64,
    dead_branches: usize,
}

impl AssignmentDistribution {
    /// Number of participants.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Procedure the distribution was enumerated under.
    pub fn procedure(&self) -> Procedure {
        self.procedure
    }

    /// Number of distinct complete assignments.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// True when no draw completed.
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Mass recorded for an assignment, zero when unreachable.
    pub fn mass_of(&self, assignment: &Assignment) -> f64 {
        self.masses.get(assignment).copied().unwrap_or(0.0)
    }

    /// Sum of all recorded masses.
    pub fn total_mass(&self) -> f64 {
        self.masses.values().sum()
    }

    /// Mass lost to dead branches. `total_mass + dead_mass` is one.
    pub fn dead_mass(&self) -> f64 {
        self.dead_mass
    }

    /// Number of pruned paths.
    pub fn dead_branches(&self) -> usize {
        self.dead_branches
    }

    /// Iterates assignments in lexicographic order with their masses.
    pub fn iter(&self) -> impl Iterator<Item = (&Assignment, f64)> + '_ {
        self.masses.iter().map(|(assignment, &mass)| (assignment, mass))
    }
}

struct Frame {
    giver: usize,
    remaining: Vec<usize>,
    assigned: Vec<usize>,
    prob: f64,
}

/// Enumerates every complete assignment of the draw with its exact probability.
///
/// Walks the draw tree depth-first with an explicit stack. Masses of the same
/// assignment reached through different paths are summed.
pub fn enumerate(
    group: GroupSize,
    procedure: Procedure,
) -> Result<AssignmentDistribution, SantaError> {
    let n = group.get();
    if n > MAX_EXACT_GROUP {
        return Err(SantaError::InvalidArgument(
            ErrorInfo::new("exact_too_large", "group too large for exact enumeration")
                .with_context("n", n)
                .with_context("max", MAX_EXACT_GROUP)
                .with_hint("use the Monte Carlo path for large groups"),
        ));
    }

    let mut masses: BTreeMap<Assignment, f64> = BTreeMap::new();
    let mut dead_mass = 0.0;
    let mut dead_branches = 0usize;
    let mut stack = vec![Frame {
        giver: 0,
        remaining: (0..n).collect(),
        assigned: Vec::with_capacity(n),
        prob: 1.0,
    }];

    while let Some(frame) = stack.pop() {
        if frame.giver == n {
            *masses
                .entry(Assignment::from_recipients(frame.assigned))
                .or_insert(0.0) += frame.prob;
            continue;
        }

        let legal: Vec<usize> = frame
            .remaining
            .iter()
            .copied()
            .filter(|&recipient| recipient != frame.giver)
            .collect();

        if legal.is_empty() {
            // Only the giver's own name is left.
            if procedure == Procedure::SwapRepair && frame.giver == n - 1 {
                let share = frame.prob / (n - 1) as f64;
                for partner in 0..n - 1 {
                    let mut repaired = frame.assigned.clone();
                    repaired.push(repaired[partner]);
                    repaired[partner] = frame.giver;
                    *masses
                        .entry(Assignment::from_recipients(repaired))
                        .or_insert(0.0) += share;
                }
            } else {
                dead_mass += frame.prob;
                dead_branches += 1;
            }
            continue;
        }

        let prob = frame.prob / legal.len() as f64;
        // Reverse push keeps lexicographic visiting order.
        for &pick in legal.iter().rev() {
            let remaining = frame
                .remaining
                .iter()
                .copied()
                .filter(|&recipient| recipient != pick)
                .collect();
            let mut assigned = frame.assigned.clone();
            assigned.push(pick);
            stack.push(Frame {
                giver: frame.giver + 1,
                remaining,
                assigned,
                prob,
            });
        }
    }

    debug!(
        n,
        procedure = procedure.as_str(),
        assignments = masses.len(),
        dead_branches,
        "exact enumeration finished"
    );

    Ok(AssignmentDistribution {
        size: n,
        procedure,
        masses,
        dead_mass,
        dead_branches,
    })
}

/// Exact distribution of the [`Procedure::Ordered`] draw.
pub fn ordered_distribution(group: GroupSize) -> Result<AssignmentDistribution, SantaError> {
    enumerate(group, Procedure::Ordered)
}

/// Exact distribution of the [`Procedure::SwapRepair`] draw.
pub fn swap_repair_distribution(group: GroupSize) -> Result<AssignmentDistribution, SantaError> {
    enumerate(group, Procedure::SwapRepair)
}
