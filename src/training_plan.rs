use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::PlanSettings;
use crate::cycle::{self, CycleWeek, DayRotation};
use crate::formulas::{self, DEFAULT_ROUNDING_INCREMENT};
use crate::models::{
    LiftPrescription, OneRepMaxes, Plan, SetSpec, TrainingMaxes, WeekPlan, WorkoutDay,
};

/// 5/3/1 plan generator.
///
/// Holds no state beyond the loading increment; build one per call or share it.
#[derive(Debug, Clone)]
pub struct PlanGenerator {
    rounding_increment: Decimal,
}

impl Default for PlanGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanGenerator {
    pub fn new() -> Self {
        PlanGenerator {
            rounding_increment: DEFAULT_ROUNDING_INCREMENT,
        }
    }

    pub fn with_rounding_increment(rounding_increment: Decimal) -> Self {
        PlanGenerator { rounding_increment }
    }

    pub fn from_config(settings: &PlanSettings) -> Self {
        Self::with_rounding_increment(settings.rounding_increment)
    }

    pub fn rounding_increment(&self) -> Decimal {
        self.rounding_increment
    }

    /// Generate a new four-week cycle from training maxes.
    ///
    /// Training maxes must be positive; that is checked upstream.
    pub fn generate_plan(&self, training_maxes: &TrainingMaxes) -> Plan {
        self.build_plan(training_maxes.clone(), None, Utc::now())
    }

    /// Derive training maxes from 1RMs and generate a plan that keeps the
    /// 1RM snapshot for history.
    pub fn generate_from_one_rep_maxes(&self, one_rep_maxes: &OneRepMaxes) -> Plan {
        let training_maxes = formulas::derive_training_maxes(one_rep_maxes);
        self.build_plan(training_maxes, Some(one_rep_maxes.clone()), Utc::now())
    }

    fn build_plan(
        &self,
        training_maxes: TrainingMaxes,
        one_rep_maxes: Option<OneRepMaxes>,
        created_at: DateTime<Utc>,
    ) -> Plan {
        let weeks = CycleWeek::ALL
            .iter()
            .map(|&week| self.create_week(week, &training_maxes))
            .collect();

        let plan = Plan {
            plan_id: new_plan_id(created_at),
            created_at,
            one_rep_maxes,
            training_maxes,
            weeks,
        };

        tracing::debug!(
            plan_id = %plan.plan_id,
            squat = %plan.training_maxes.squat,
            bench = %plan.training_maxes.bench,
            deadlift = %plan.training_maxes.deadlift,
            press = %plan.training_maxes.press,
            "Generated 5/3/1 plan"
        );

        plan
    }

    fn create_week(&self, week: CycleWeek, training_maxes: &TrainingMaxes) -> WeekPlan {
        let workouts = cycle::ROTATION
            .iter()
            .map(|rotation| self.create_workout(week, rotation, training_maxes))
            .collect();

        WeekPlan {
            week: week.number(),
            workouts,
        }
    }

    fn create_workout(
        &self,
        week: CycleWeek,
        rotation: &DayRotation,
        training_maxes: &TrainingMaxes,
    ) -> WorkoutDay {
        WorkoutDay {
            day: rotation.day,
            main_lift: LiftPrescription {
                name: rotation.main,
                sets: self.main_sets(week, training_maxes.get(rotation.main)),
            },
            secondary_lift: LiftPrescription {
                name: rotation.secondary,
                sets: self.secondary_sets(training_maxes.get(rotation.secondary)),
            },
            assistance: cycle::assistance_template(),
        }
    }

    /// Main-lift sets in percentage-table order
    pub fn main_sets(&self, week: CycleWeek, training_max: Decimal) -> Vec<SetSpec> {
        week.percentages()
            .iter()
            .map(|&percentage| SetSpec {
                percentage,
                weight: self.prescribed_weight(training_max, percentage),
                reps: week.reps_for(percentage),
            })
            .collect()
    }

    /// Boring-but-big sets. Not deloaded in week 4.
    pub fn secondary_sets(&self, training_max: Decimal) -> Vec<SetSpec> {
        let set = SetSpec {
            percentage: cycle::SECONDARY_PERCENTAGE,
            weight: self.prescribed_weight(training_max, cycle::SECONDARY_PERCENTAGE),
            reps: cycle::SECONDARY_REPS,
        };
        vec![set; cycle::SECONDARY_SETS]
    }

    pub fn prescribed_weight(&self, training_max: Decimal, percentage: Decimal) -> Decimal {
        formulas::round_to_increment(training_max * percentage, self.rounding_increment)
    }
}

/// `{unix millis}-{random}`; collisions are left to chance
fn new_plan_id(created_at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", created_at.timestamp_millis(), &suffix[..12])
}
