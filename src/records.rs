//! Personal record tracking
//!
//! A PR is the single set per lift with the highest Epley estimated 1RM, so a
//! lighter set with more reps can beat a heavier single. The calculator is a
//! pure fold over the full workout history and keeps nothing between calls.

use rust_decimal::Decimal;
use tracing::trace;

use crate::formulas;
use crate::models::{CompletedSet, CompletedWorkout, Lift, PersonalRecords, PrRecord};

/// Fold completed workouts into the best set per lift.
///
/// Lifts with no usable sets stay at `{weight: 0, reps: 0}`.
pub fn calculate_prs(workouts: &[CompletedWorkout]) -> PersonalRecords {
    let mut prs = PersonalRecords::default();

    for workout in workouts {
        let Some(main_lift) = &workout.main_lift else {
            trace!("Skipping workout without a main lift");
            continue;
        };
        if workout.sets.is_empty() {
            continue;
        }

        let Some(lift) = Lift::classify(&main_lift.name) else {
            trace!(name = %main_lift.name, "Skipping unrecognized lift");
            continue;
        };

        for set in &workout.sets {
            let Some((weight, reps)) = usable_set(set) else {
                continue;
            };

            let current = prs.get_mut(lift);
            // Strict comparison: the first set to reach an e1RM keeps the record
            if formulas::estimated_one_rep_max(weight, reps) > current.estimated_one_rep_max() {
                *current = PrRecord::new(weight, reps);
            }
        }
    }

    prs
}

/// Sum of each lift's estimated 1RM, rounded per lift
pub fn theoretical_total(prs: &PersonalRecords) -> Decimal {
    prs.iter()
        .map(|(_, pr)| Decimal::from(pr.estimated_one_rep_max().round() as i64))
        .sum()
}

/// Zero or missing weight/reps is not a recorded attempt
fn usable_set(set: &CompletedSet) -> Option<(Decimal, u32)> {
    match (set.weight, set.reps) {
        (Some(weight), Some(reps)) if !weight.is_zero() && reps > 0 => Some((weight, reps)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NamedLift;
    use rust_decimal_macros::dec;

    fn workout(name: &str, sets: &[(Decimal, u32)]) -> CompletedWorkout {
        CompletedWorkout::new(
            name,
            sets.iter().map(|&(w, r)| CompletedSet::new(w, r)).collect(),
        )
    }

    #[test]
    fn test_heaviest_single_wins_when_e1rm_highest() {
        let workouts = vec![
            workout("Squat", &[(dec!(225), 5), (dec!(275), 3), (dec!(315), 1)]),
            workout("Bench Press", &[(dec!(185), 5), (dec!(205), 3), (dec!(225), 1)]),
            workout("Deadlift", &[(dec!(315), 5), (dec!(365), 3), (dec!(405), 1)]),
            workout("Overhead Press", &[(dec!(95), 5), (dec!(115), 3), (dec!(135), 1)]),
        ];

        let prs = calculate_prs(&workouts);

        assert_eq!(prs.squat, PrRecord::new(dec!(315), 1));
        assert_eq!(prs.bench, PrRecord::new(dec!(225), 1));
        assert_eq!(prs.deadlift, PrRecord::new(dec!(405), 1));
        assert_eq!(prs.press, PrRecord::new(dec!(135), 1));
    }

    #[test]
    fn test_lift_name_variations() {
        let workouts = vec![
            workout("Back Squat", &[(dec!(315), 1)]),
            workout("Flat Bench Press", &[(dec!(225), 1)]),
            workout("Conventional Deadlift", &[(dec!(405), 1)]),
            workout("Standing Overhead Press", &[(dec!(135), 1)]),
        ];

        let prs = calculate_prs(&workouts);

        assert_eq!(prs.squat.weight, dec!(315));
        assert_eq!(prs.bench.weight, dec!(225));
        assert_eq!(prs.deadlift.weight, dec!(405));
        assert_eq!(prs.press.weight, dec!(135));
    }

    #[test]
    fn test_higher_reps_beat_heavier_weight_on_e1rm() {
        let workouts = vec![
            workout("Squat", &[(dec!(225), 5)]), // 262.5
            workout("Squat", &[(dec!(275), 1)]), // 284.17
            workout("Squat", &[(dec!(245), 8)]), // 310.33
        ];

        assert_eq!(calculate_prs(&workouts).squat, PrRecord::new(dec!(245), 8));
    }

    #[test]
    fn test_ties_keep_first_seen() {
        // Both estimate exactly 300
        let workouts = vec![
            workout("Squat", &[(dec!(200), 15)]),
            workout("Squat", &[(dec!(150), 30)]),
        ];

        assert_eq!(calculate_prs(&workouts).squat, PrRecord::new(dec!(200), 15));
    }

    #[test]
    fn test_invalid_data_yields_zero_records() {
        let workouts = vec![
            workout("Squat", &[]),
            workout("Unknown Exercise", &[(dec!(100), 10)]),
            workout("Bench Press", &[(dec!(0), 5)]),
            workout("Deadlift", &[(dec!(405), 0)]),
            CompletedWorkout {
                main_lift: None,
                sets: vec![CompletedSet::new(dec!(500), 1)],
                ..Default::default()
            },
            CompletedWorkout {
                main_lift: Some(NamedLift { name: "Press".to_string() }),
                sets: vec![CompletedSet { weight: Some(dec!(95)), reps: None }],
                ..Default::default()
            },
        ];

        assert_eq!(calculate_prs(&workouts), PersonalRecords::default());
        assert_eq!(calculate_prs(&[]), PersonalRecords::default());
    }

    #[test]
    fn test_malformed_sets_do_not_reject_the_log() {
        let json = r#"[
            {"mainLift": {"name": "Squat"}, "sets": [{"weight": 315, "reps": 5}, {"weight": 405, "reps": 2.5}]},
            {"mainLift": {"name": "Bench"}, "sets": [{"weight": 225, "reps": "5"}, {"weight": 185, "reps": -1}]},
            {"mainLift": {"name": "Press"}, "sets": [{"weight": "heavy", "reps": 5}, {"weight": "115", "reps": 5}]}
        ]"#;
        let workouts: Vec<CompletedWorkout> = serde_json::from_str(json).unwrap();
        let prs = calculate_prs(&workouts);

        assert_eq!(prs.squat, PrRecord::new(dec!(315), 5));
        assert_eq!(prs.bench, PrRecord::default());
        assert_eq!(prs.press, PrRecord::new(dec!(115), 5));
    }

    #[test]
    fn test_recalculation_is_deterministic() {
        let workouts = vec![
            workout("Squat", &[(dec!(225), 5), (dec!(245), 8)]),
            workout("Bench", &[(dec!(185), 5)]),
        ];

        assert_eq!(calculate_prs(&workouts), calculate_prs(&workouts));
    }

    #[test]
    fn test_theoretical_total() {
        let prs = PersonalRecords {
            squat: PrRecord::new(dec!(315), 1),   // 325.5 -> 326
            bench: PrRecord::new(dec!(225), 5),   // 262.5 -> 263
            deadlift: PrRecord::new(dec!(405), 3), // 445.5 -> 446
            press: PrRecord::new(dec!(135), 1),   // 139.5 -> 140
        };

        assert_eq!(theoretical_total(&prs), dec!(1175));
        assert_eq!(theoretical_total(&PersonalRecords::default()), Decimal::ZERO);
    }
}
