use proptest::prelude::*;
use santa_core::{GroupSize, RngHandle, TrialCount};
use santa_prob::aggregate::{from_counts, from_distribution};
use santa_prob::{draw_assignment, enumerate, simulate, Procedure};

fn procedure_strategy() -> impl Strategy<Value = Procedure> {
    prop_oneof![Just(Procedure::Ordered), Just(Procedure::SwapRepair)]
}

proptest! {
    #[test]
    fn exact_mass_is_conserved(n in 2usize..7, procedure in procedure_strategy()) {
        let dist = enumerate(GroupSize::new(n).unwrap(), procedure).unwrap();
        prop_assert!((dist.total_mass() + dist.dead_mass() - 1.0).abs() < 1e-9);
        let matrix = from_distribution(&dist);
        for sum in matrix.column_sums() {
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn draws_never_self_assign(seed in any::<u64>(), n in 2usize..30, procedure in procedure_strategy()) {
        let mut rng = RngHandle::from_seed(seed);
        if let Some(assignment) = draw_assignment(GroupSize::new(n).unwrap(), procedure, &mut rng) {
            prop_assert!(assignment.is_derangement());
        }
    }

    #[test]
    fn simulated_rows_sum_to_one(seed in any::<u64>(), n in 2usize..15, trials in 1u64..200) {
        let mut rng = RngHandle::from_seed(seed);
        let table = simulate(
            GroupSize::new(n).unwrap(),
            TrialCount::new(trials).unwrap(),
            Procedure::Ordered,
            &mut rng,
        )
        .unwrap();
        let matrix = from_counts(&table);
        for (giver, sum) in matrix.row_sums().into_iter().enumerate() {
            prop_assert!((sum - 1.0).abs() < 1e-9);
            prop_assert_eq!(matrix.get(giver, giver), Some(0.0));
        }
    }
}
