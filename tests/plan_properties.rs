use chrono::{Duration, TimeZone, Utc};
use liftrs::cycle::CycleWeek;
use liftrs::{
    calculate_prs, extract_history, CompletedSet, CompletedWorkout, PerLift, PlanGenerator,
    PlanSnapshot, TrainingMaxes,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn training_max() -> impl Strategy<Value = Decimal> {
    (20i64..1000).prop_map(Decimal::from)
}

fn training_maxes() -> impl Strategy<Value = TrainingMaxes> {
    (training_max(), training_max(), training_max(), training_max())
        .prop_map(|(s, b, d, p)| TrainingMaxes::new(s, b, d, p))
}

proptest! {
    #[test]
    fn prop_every_weight_is_a_multiple_of_five(tms in training_maxes()) {
        let plan = PlanGenerator::new().generate_plan(&tms);

        for week in &plan.weeks {
            for workout in &week.workouts {
                for set in workout.main_lift.sets.iter().chain(&workout.secondary_lift.sets) {
                    prop_assert!((set.weight % Decimal::from(5)).is_zero());
                }
            }
        }
    }

    #[test]
    fn prop_plan_shape_is_fixed(tms in training_maxes()) {
        let plan = PlanGenerator::new().generate_plan(&tms);

        prop_assert_eq!(plan.weeks.len(), 4);
        for (week_index, week) in plan.weeks.iter().enumerate() {
            prop_assert_eq!(week.week as usize, week_index + 1);
            prop_assert_eq!(week.workouts.len(), 4);
            for workout in &week.workouts {
                prop_assert_eq!(workout.main_lift.sets.len(), 3);
                prop_assert_eq!(workout.secondary_lift.sets.len(), 5);
                prop_assert_eq!(workout.assistance.len(), 2);
            }
        }
        prop_assert_eq!(plan.set_count(), 4 * 4 * 8);
    }

    #[test]
    fn prop_main_sets_follow_week_scheme(tms in training_maxes()) {
        let plan = PlanGenerator::new().generate_plan(&tms);

        for week in CycleWeek::ALL {
            let week_plan = plan.week(week.number()).unwrap();
            for workout in &week_plan.workouts {
                let percentages: Vec<Decimal> =
                    workout.main_lift.sets.iter().map(|s| s.percentage).collect();
                prop_assert_eq!(percentages, week.percentages().to_vec());

                // Within a workout, main-set weights never decrease
                let weights: Vec<Decimal> = workout.main_lift.sets.iter().map(|s| s.weight).collect();
                prop_assert!(weights.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }

    #[test]
    fn prop_generation_is_deterministic_apart_from_identity(tms in training_maxes()) {
        let generator = PlanGenerator::new();
        let first = generator.generate_plan(&tms);
        let second = generator.generate_plan(&tms);

        prop_assert_eq!(&first.weeks, &second.weeks);
        prop_assert_eq!(&first.training_maxes, &second.training_maxes);
    }

    #[test]
    fn prop_prs_ignore_input_duplication(
        sets in prop::collection::vec((1i64..600, 1u32..20), 1..20)
    ) {
        let workouts = vec![CompletedWorkout::new(
            "Squat",
            sets.iter().map(|&(w, r)| CompletedSet::new(Decimal::from(w), r)).collect(),
        )];
        let once = calculate_prs(&workouts);

        let mut twice = workouts.clone();
        twice.extend(workouts.iter().cloned());
        prop_assert_eq!(once, calculate_prs(&twice));
    }

    #[test]
    fn prop_history_dates_never_decrease(offsets in prop::collection::vec(0i64..1000, 0..30)) {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
        let snapshots: Vec<PlanSnapshot> = offsets
            .iter()
            .enumerate()
            .map(|(i, &days)| PlanSnapshot {
                plan_id: format!("plan-{}", i),
                created_at: Some(start + Duration::days(days)),
                one_rep_maxes: Some(PerLift::from_fn(|_| Some(Decimal::from(100 + i as i64)))),
            })
            .collect();

        let history = extract_history(&snapshots);

        prop_assert_eq!(&history, &extract_history(&snapshots));
        prop_assert_eq!(history.squat.len(), offsets.len());
        for (_, points) in history.iter() {
            prop_assert!(points.windows(2).all(|w| w[0].date <= w[1].date));
        }
    }
}
