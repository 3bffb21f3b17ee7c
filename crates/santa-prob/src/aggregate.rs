use santa_core::ProbabilityMatrix;

use crate::enumerate::AssignmentDistribution;
use crate::monte_carlo::CountTable;

/// Marginal matrix of an exact distribution.
///
/// Cells are normalised by the recorded mass, so mass lost to dead branches
/// is redistributed proportionally over completed draws.
pub fn from_distribution(distribution: &AssignmentDistribution) -> ProbabilityMatrix {
    let n = distribution.size();
    let mut acc = vec![0.0; n * n];
    for (assignment, mass) in distribution.iter() {
        for (giver, &recipient) in assignment.recipients().iter().enumerate() {
            acc[giver * n + recipient] += mass;
        }
    }
    let total = distribution.total_mass();
    if total <= 0.0 {
        return ProbabilityMatrix::from_fn(n, |_, _| 0.0);
    }
    ProbabilityMatrix::from_fn(n, |giver, recipient| acc[giver * n + recipient] / total)
}

/// Empirical matrix of Monte Carlo counts, `counts[i][j] / trials`.
///
/// A table without recorded draws yields an all-zero matrix.
pub fn from_counts(table: &CountTable) -> ProbabilityMatrix {
    let n = table.size();
    if table.trials() == 0 {
        return ProbabilityMatrix::from_fn(n, |_, _| 0.0);
    }
    let trials = table.trials() as f64;
    ProbabilityMatrix::from_fn(n, |giver, recipient| {
        table.count(giver, recipient).unwrap_or(0) as f64 / trials
    })
}
