use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{LiftError, Result};
use crate::formulas;

/// The four barbell lifts the 5/3/1 cycle is built around
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lift {
    Squat,
    Bench,
    Deadlift,
    Press,
}

impl Lift {
    /// Canonical ordering used for output and iteration
    pub const ALL: [Lift; 4] = [Lift::Squat, Lift::Bench, Lift::Deadlift, Lift::Press];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lift::Squat => "squat",
            Lift::Bench => "bench",
            Lift::Deadlift => "deadlift",
            Lift::Press => "press",
        }
    }

    /// Map a free-text exercise name ("Standing Overhead Press") onto a lift.
    ///
    /// Checks run in a fixed order, so "Bench Press" is a bench and not a press.
    /// Returns `None` when nothing matches.
    pub fn classify(name: &str) -> Option<Lift> {
        let name = name.to_lowercase();

        if name.contains("squat") {
            Some(Lift::Squat)
        } else if name.contains("bench") {
            Some(Lift::Bench)
        } else if name.contains("deadlift") {
            Some(Lift::Deadlift)
        } else if name.contains("press") || name.contains("overhead") {
            Some(Lift::Press)
        } else {
            None
        }
    }
}

impl fmt::Display for Lift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lift {
    type Err = LiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "squat" => Ok(Lift::Squat),
            "bench" => Ok(Lift::Bench),
            "deadlift" => Ok(Lift::Deadlift),
            "press" => Ok(Lift::Press),
            _ => Err(LiftError::UnknownLift(s.to_string())),
        }
    }
}

/// Weight units. Calculations are unit-agnostic; this only labels output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Pounds,
    Kilograms,
}

impl Units {
    pub fn suffix(&self) -> &'static str {
        match self {
            Units::Pounds => "lb",
            Units::Kilograms => "kg",
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Units::Pounds
    }
}

/// One value per lift
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerLift<T> {
    #[serde(default)]
    pub squat: T,
    #[serde(default)]
    pub bench: T,
    #[serde(default)]
    pub deadlift: T,
    #[serde(default)]
    pub press: T,
}

impl<T> PerLift<T> {
    pub fn from_fn(mut f: impl FnMut(Lift) -> T) -> Self {
        PerLift {
            squat: f(Lift::Squat),
            bench: f(Lift::Bench),
            deadlift: f(Lift::Deadlift),
            press: f(Lift::Press),
        }
    }

    pub fn get(&self, lift: Lift) -> &T {
        match lift {
            Lift::Squat => &self.squat,
            Lift::Bench => &self.bench,
            Lift::Deadlift => &self.deadlift,
            Lift::Press => &self.press,
        }
    }

    pub fn get_mut(&mut self, lift: Lift) -> &mut T {
        match lift {
            Lift::Squat => &mut self.squat,
            Lift::Bench => &mut self.bench,
            Lift::Deadlift => &mut self.deadlift,
            Lift::Press => &mut self.press,
        }
    }

    /// Iterate in canonical lift order
    pub fn iter(&self) -> impl Iterator<Item = (Lift, &T)> + '_ {
        Lift::ALL.iter().map(move |&lift| (lift, self.get(lift)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Lift, &T) -> U) -> PerLift<U> {
        PerLift::from_fn(|lift| f(lift, self.get(lift)))
    }
}

/// Tested or estimated one-rep maxes supplied by the lifter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneRepMaxes {
    pub squat: Decimal,
    pub bench: Decimal,
    pub deadlift: Decimal,
    pub press: Decimal,
}

impl OneRepMaxes {
    pub fn new(squat: Decimal, bench: Decimal, deadlift: Decimal, press: Decimal) -> Self {
        OneRepMaxes { squat, bench, deadlift, press }
    }

    pub fn get(&self, lift: Lift) -> Decimal {
        match lift {
            Lift::Squat => self.squat,
            Lift::Bench => self.bench,
            Lift::Deadlift => self.deadlift,
            Lift::Press => self.press,
        }
    }

    /// Reject any lift that is not strictly positive.
    ///
    /// Plan generation assumes this has already passed.
    pub fn validate(&self) -> Result<()> {
        let invalid: Vec<String> = Lift::ALL
            .iter()
            .filter(|&&lift| self.get(lift) <= Decimal::ZERO)
            .map(|&lift| format!("{}={}", lift, self.get(lift)))
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(LiftError::InvalidInput(format!(
                "all lifts must be greater than 0 ({})",
                invalid.join(", ")
            )))
        }
    }
}

/// Training maxes (90% of 1RM) that every prescribed weight is computed from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingMaxes {
    pub squat: Decimal,
    pub bench: Decimal,
    pub deadlift: Decimal,
    pub press: Decimal,
}

impl TrainingMaxes {
    pub fn new(squat: Decimal, bench: Decimal, deadlift: Decimal, press: Decimal) -> Self {
        TrainingMaxes { squat, bench, deadlift, press }
    }

    pub fn get(&self, lift: Lift) -> Decimal {
        match lift {
            Lift::Squat => self.squat,
            Lift::Bench => self.bench,
            Lift::Deadlift => self.deadlift,
            Lift::Press => self.press,
        }
    }
}

/// A single prescribed set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSpec {
    /// Fraction of the training max, informational only
    pub percentage: Decimal,
    pub weight: Decimal,
    pub reps: u32,
}

/// A lift together with its prescribed sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiftPrescription {
    pub name: Lift,
    pub sets: Vec<SetSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistanceExercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDay {
    pub day: u8,
    pub main_lift: LiftPrescription,
    pub secondary_lift: LiftPrescription,
    pub assistance: Vec<AssistanceExercise>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u8,
    pub workouts: Vec<WorkoutDay>,
}

/// A generated four-week cycle. Never edited after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub plan_id: String,
    pub created_at: DateTime<Utc>,
    /// 1RM inputs the plan was derived from, when known
    #[serde(default)]
    pub one_rep_maxes: Option<OneRepMaxes>,
    pub training_maxes: TrainingMaxes,
    pub weeks: Vec<WeekPlan>,
}

impl Plan {
    pub fn week(&self, week: u8) -> Option<&WeekPlan> {
        self.weeks.iter().find(|w| w.week == week)
    }

    pub fn workout(&self, week: u8, day: u8) -> Option<&WorkoutDay> {
        self.week(week)
            .and_then(|w| w.workouts.iter().find(|d| d.day == day))
    }

    /// Every prescribed set across all weeks, days and lifts
    pub fn set_count(&self) -> usize {
        self.weeks
            .iter()
            .flat_map(|w| &w.workouts)
            .map(|d| d.main_lift.sets.len() + d.secondary_lift.sets.len())
            .sum()
    }
}

/// A single logged attempt. Missing or zero fields make the set unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSet {
    #[serde(default, deserialize_with = "lenient_weight")]
    pub weight: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_reps")]
    pub reps: Option<u32>,
}

/// Numbers or numeric strings; anything else reads as missing
fn lenient_weight<'de, D>(deserializer: D) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let weight = match Value::deserialize(deserializer)? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };
    Ok(weight)
}

/// Whole non-negative numbers only; strings, fractions and negatives read as missing
fn lenient_reps<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let reps = Value::deserialize(deserializer)?
        .as_u64()
        .and_then(|r| u32::try_from(r).ok());
    Ok(reps)
}

impl CompletedSet {
    pub fn new(weight: Decimal, reps: u32) -> Self {
        CompletedSet {
            weight: Some(weight),
            reps: Some(reps),
        }
    }
}

/// Free-text exercise label as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedLift {
    pub name: String,
}

/// A logged workout as stored by the web layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedWorkout {
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub main_lift: Option<NamedLift>,
    #[serde(default)]
    pub sets: Vec<CompletedSet>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl CompletedWorkout {
    pub fn new(lift_name: impl Into<String>, sets: Vec<CompletedSet>) -> Self {
        CompletedWorkout {
            plan_id: None,
            main_lift: Some(NamedLift { name: lift_name.into() }),
            sets,
            completed_at: None,
        }
    }
}

/// Best set for a lift, ranked by estimated 1RM
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrRecord {
    pub weight: Decimal,
    pub reps: u32,
}

impl PrRecord {
    pub fn new(weight: Decimal, reps: u32) -> Self {
        PrRecord { weight, reps }
    }

    pub fn estimated_one_rep_max(&self) -> f64 {
        formulas::estimated_one_rep_max(self.weight, self.reps)
    }
}

pub type PersonalRecords = PerLift<PrRecord>;

/// Persisted projection of a plan as history sees it.
///
/// Older documents may lack the 1RM snapshot, the creation date, or
/// individual lifts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSnapshot {
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub one_rep_maxes: Option<PerLift<Option<Decimal>>>,
}

impl From<&Plan> for PlanSnapshot {
    fn from(plan: &Plan) -> Self {
        PlanSnapshot {
            plan_id: plan.plan_id.clone(),
            created_at: Some(plan.created_at),
            one_rep_maxes: plan
                .one_rep_maxes
                .as_ref()
                .map(|maxes| PerLift::from_fn(|lift| Some(maxes.get(lift)))),
        }
    }
}

/// One 1RM observation on a calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}
