//! Per-set completion tracking within a plan
//!
//! A set is addressed by `(plan id, week, day, main lift, set index)`.
//! Reporting the same set again replaces the earlier report, so replays and
//! double submits are harmless.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{CompletedSet, CompletedWorkout, Lift, NamedLift, Plan};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressKey {
    pub plan_id: String,
    pub week: u8,
    pub day: u8,
    pub main_lift: Lift,
    pub set_index: usize,
}

impl ProgressKey {
    pub fn new(plan_id: impl Into<String>, week: u8, day: u8, main_lift: Lift, set_index: usize) -> Self {
        ProgressKey {
            plan_id: plan_id.into(),
            week,
            day,
            main_lift,
            set_index,
        }
    }
}

/// Storage id, e.g. `1700000000000-ab12cd34ef56-1-1-squat-2`
impl fmt::Display for ProgressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}-{}",
            self.plan_id, self.week, self.day, self.main_lift, self.set_index
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amrap_reps: Option<u32>,
}

/// A reported set, as sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[serde(flatten)]
    pub key: ProgressKey,
    pub completed: bool,
    #[serde(default)]
    pub amrap_reps: Option<u32>,
}

/// In-memory progress store keyed by set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressLog {
    entries: BTreeMap<ProgressKey, ProgressEntry>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_updates(updates: impl IntoIterator<Item = ProgressUpdate>) -> Self {
        let mut log = Self::new();
        for update in updates {
            log.upsert(update);
        }
        log
    }

    /// Insert or overwrite the entry for a set.
    ///
    /// `completed` always takes the new value; AMRAP reps are only replaced
    /// when the update carries them.
    pub fn upsert(&mut self, update: ProgressUpdate) -> &ProgressEntry {
        let entry = self.entries.entry(update.key).or_default();
        entry.completed = update.completed;
        if update.amrap_reps.is_some() {
            entry.amrap_reps = update.amrap_reps;
        }
        entry
    }

    pub fn get(&self, key: &ProgressKey) -> Option<&ProgressEntry> {
        self.entries.get(key)
    }

    pub fn is_completed(&self, key: &ProgressKey) -> bool {
        self.get(key).is_some_and(|e| e.completed)
    }

    pub fn entries_for_plan<'a>(
        &'a self,
        plan_id: &'a str,
    ) -> impl Iterator<Item = (&'a ProgressKey, &'a ProgressEntry)> + 'a {
        self.entries.iter().filter(move |(k, _)| k.plan_id == plan_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Percentage of the plan's main-lift sets marked completed, rounded to
    /// one decimal place
    pub fn completion_rate(&self, plan: &Plan) -> Decimal {
        let mut total = 0u32;
        let mut completed = 0u32;

        for week in &plan.weeks {
            for workout in &week.workouts {
                for index in 0..workout.main_lift.sets.len() {
                    total += 1;
                    let key = ProgressKey::new(&plan.plan_id, week.week, workout.day, workout.main_lift.name, index);
                    if self.is_completed(&key) {
                        completed += 1;
                    }
                }
            }
        }

        if total == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(completed) * Decimal::ONE_HUNDRED / Decimal::from(total))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Turn completed main-lift sets of a plan into workout records.
///
/// Each set counts at its prescribed weight; the logged AMRAP reps replace
/// the prescribed reps when present. Workouts with nothing completed are left
/// out.
pub fn reconcile(plan: &Plan, log: &ProgressLog) -> Vec<CompletedWorkout> {
    let mut workouts = Vec::new();

    for week in &plan.weeks {
        for workout in &week.workouts {
            let lift = workout.main_lift.name;
            let sets: Vec<CompletedSet> = workout
                .main_lift
                .sets
                .iter()
                .enumerate()
                .filter_map(|(index, set)| {
                    let key = ProgressKey::new(&plan.plan_id, week.week, workout.day, lift, index);
                    let entry = log.get(&key).filter(|e| e.completed)?;
                    Some(CompletedSet::new(set.weight, entry.amrap_reps.unwrap_or(set.reps)))
                })
                .collect();

            if sets.is_empty() {
                continue;
            }

            workouts.push(CompletedWorkout {
                plan_id: Some(plan.plan_id.clone()),
                main_lift: Some(NamedLift { name: lift.to_string() }),
                sets,
                completed_at: None,
            });
        }
    }

    workouts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrainingMaxes;
    use crate::records::calculate_prs;
    use crate::training_plan::PlanGenerator;
    use rust_decimal_macros::dec;

    fn update(plan_id: &str, week: u8, day: u8, lift: Lift, set: usize, completed: bool, amrap: Option<u32>) -> ProgressUpdate {
        ProgressUpdate {
            key: ProgressKey::new(plan_id, week, day, lift, set),
            completed,
            amrap_reps: amrap,
        }
    }

    #[test]
    fn test_key_display() {
        let key = ProgressKey::new("123-abc", 1, 3, Lift::Bench, 2);
        assert_eq!(key.to_string(), "123-abc-1-3-bench-2");
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut log = ProgressLog::new();
        log.upsert(update("p", 1, 1, Lift::Squat, 0, true, None));
        log.upsert(update("p", 1, 1, Lift::Squat, 0, true, None));

        assert_eq!(log.len(), 1);
        assert!(log.is_completed(&ProgressKey::new("p", 1, 1, Lift::Squat, 0)));
    }

    #[test]
    fn test_upsert_overwrites_completion_and_keeps_amrap() {
        let mut log = ProgressLog::new();
        log.upsert(update("p", 3, 1, Lift::Squat, 2, true, Some(4)));
        let entry = *log.upsert(update("p", 3, 1, Lift::Squat, 2, false, None));

        assert_eq!(entry, ProgressEntry { completed: false, amrap_reps: Some(4) });

        let entry = *log.upsert(update("p", 3, 1, Lift::Squat, 2, true, Some(6)));
        assert_eq!(entry.amrap_reps, Some(6));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_entries_scoped_to_plan() {
        let log = ProgressLog::from_updates(vec![
            update("a", 1, 1, Lift::Squat, 0, true, None),
            update("b", 1, 1, Lift::Squat, 0, true, None),
            update("a", 1, 2, Lift::Deadlift, 1, true, None),
        ]);

        assert_eq!(log.entries_for_plan("a").count(), 2);
        assert_eq!(log.entries_for_plan("c").count(), 0);
    }

    #[test]
    fn test_update_deserializes_flat_document() {
        let json = r#"{"planId": "p", "week": 1, "day": 2, "mainLift": "deadlift", "setIndex": 0, "completed": true}"#;
        let update: ProgressUpdate = serde_json::from_str(json).unwrap();

        assert_eq!(update.key, ProgressKey::new("p", 1, 2, Lift::Deadlift, 0));
        assert!(update.completed);
        assert_eq!(update.amrap_reps, None);
    }

    #[test]
    fn test_completion_rate_and_reconcile() {
        let plan = PlanGenerator::new()
            .generate_plan(&TrainingMaxes::new(dec!(300), dec!(200), dec!(400), dec!(150)));
        let id = plan.plan_id.clone();

        let log = ProgressLog::from_updates(vec![
            update(&id, 1, 1, Lift::Squat, 0, true, None),
            update(&id, 1, 1, Lift::Squat, 1, true, None),
            update(&id, 1, 1, Lift::Squat, 2, true, Some(8)),
            update(&id, 1, 2, Lift::Deadlift, 0, false, None),
            update("other-plan", 1, 3, Lift::Bench, 0, true, None),
        ]);

        // 3 of 48 main-lift sets
        assert_eq!(log.completion_rate(&plan), dec!(6.3));

        let workouts = reconcile(&plan, &log);
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].sets.len(), 3);
        assert_eq!(workouts[0].sets[2], CompletedSet::new(dec!(255), 8));

        // 255 x 8 beats 225 x 5 and 195 x 5
        let prs = calculate_prs(&workouts);
        assert_eq!(prs.squat.weight, dec!(255));
        assert_eq!(prs.squat.reps, 8);
        assert_eq!(prs.bench.weight, Decimal::ZERO);
    }

    #[test]
    fn test_empty_log() {
        let plan = PlanGenerator::new()
            .generate_plan(&TrainingMaxes::new(dec!(300), dec!(200), dec!(400), dec!(150)));
        let log = ProgressLog::new();

        assert!(log.is_empty());
        assert_eq!(log.completion_rate(&plan), Decimal::ZERO);
        assert!(reconcile(&plan, &log).is_empty());
    }
}
