use rust_decimal::Decimal;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cycle::CycleWeek;
use crate::history::LiftHistory;
use crate::models::{Plan, PersonalRecords, SetSpec, Units};

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Week")]
    week: String,
    #[tabled(rename = "Day")]
    day: u8,
    #[tabled(rename = "Main lift")]
    main_lift: String,
    #[tabled(rename = "Sets")]
    main_sets: String,
    #[tabled(rename = "Secondary (5x10)")]
    secondary: String,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Lift")]
    lift: String,
    #[tabled(rename = "Best set")]
    best_set: String,
    #[tabled(rename = "Est. 1RM")]
    estimated: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Lift")]
    lift: String,
    #[tabled(rename = "1RM")]
    value: String,
}

/// `195x5 @65%, 225x5 @75%, ...`
fn format_sets(sets: &[SetSpec], units: Units) -> String {
    sets.iter()
        .map(|s| {
            format!(
                "{}{}x{} @{}%",
                s.weight.normalize(),
                units.suffix(),
                s.reps,
                (s.percentage * Decimal::ONE_HUNDRED).normalize()
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// One row per training day
pub fn render_plan(plan: &Plan, units: Units) -> String {
    let rows: Vec<PlanRow> = plan
        .weeks
        .iter()
        .flat_map(|week| {
            let label = CycleWeek::from_number(week.week)
                .map(|w| format!("{} ({})", week.week, w.label()))
                .unwrap_or_else(|| week.week.to_string());
            week.workouts.iter().map(move |workout| PlanRow {
                week: label.clone(),
                day: workout.day,
                main_lift: workout.main_lift.name.to_string(),
                main_sets: format_sets(&workout.main_lift.sets, units),
                secondary: workout
                    .secondary_lift
                    .sets
                    .first()
                    .map(|s| format!("{} {}{}", workout.secondary_lift.name, s.weight.normalize(), units.suffix()))
                    .unwrap_or_default(),
            })
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn render_records(prs: &PersonalRecords, units: Units) -> String {
    let rows: Vec<RecordRow> = prs
        .iter()
        .map(|(lift, pr)| RecordRow {
            lift: lift.to_string(),
            best_set: if pr.reps == 0 {
                "-".to_string()
            } else {
                format!("{}{} x {}", pr.weight.normalize(), units.suffix(), pr.reps)
            },
            estimated: format!("{:.1}", pr.estimated_one_rep_max()),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn render_history(history: &LiftHistory, units: Units) -> String {
    let rows: Vec<HistoryRow> = history
        .iter()
        .flat_map(|(lift, points)| {
            points.iter().map(move |p| HistoryRow {
                date: p.date.format("%Y-%m-%d").to_string(),
                lift: lift.to_string(),
                value: format!("{}{}", p.value.normalize(), units.suffix()),
            })
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}
