//! One-rep-max history across generated plans

use rust_decimal::Decimal;
use tracing::trace;

use crate::models::{HistoryPoint, PerLift, PlanSnapshot};

pub type LiftHistory = PerLift<Vec<HistoryPoint>>;

/// Collect each plan's recorded 1RMs into a per-lift time series.
///
/// Plans without a 1RM snapshot or creation date are skipped, as are
/// individual lifts missing from a snapshot. Points are ordered by calendar
/// day; plans created on the same day keep their input order.
pub fn extract_history(plans: &[PlanSnapshot]) -> LiftHistory {
    let mut history = LiftHistory::default();

    for plan in plans {
        let (Some(maxes), Some(created_at)) = (&plan.one_rep_maxes, plan.created_at) else {
            trace!(plan_id = %plan.plan_id, "Skipping plan without 1RM snapshot or date");
            continue;
        };

        let date = created_at.date_naive();
        for (lift, value) in maxes.iter() {
            if let Some(value) = value {
                history.get_mut(lift).push(HistoryPoint { date, value: *value });
            }
        }
    }

    history.squat.sort_by_key(|p| p.date);
    history.bench.sort_by_key(|p| p.date);
    history.deadlift.sort_by_key(|p| p.date);
    history.press.sort_by_key(|p| p.date);

    history
}

/// The most recently created plan. Undated plans never qualify; on equal
/// timestamps the later entry in the input wins.
pub fn current_plan(plans: &[PlanSnapshot]) -> Option<&PlanSnapshot> {
    plans
        .iter()
        .filter(|p| p.created_at.is_some())
        .max_by_key(|p| p.created_at)
}

/// Latest recorded value per lift
pub fn latest_values(history: &LiftHistory) -> PerLift<Option<Decimal>> {
    history.map(|_, points| points.last().map(|p| p.value))
}
