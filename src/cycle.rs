//! Fixed 5/3/1 tables: weekly percentages, rep schemes, the day rotation,
//! the secondary "boring but big" protocol and the assistance template.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{AssistanceExercise, Lift};

/// Number of working days in each week of the cycle
pub const DAYS_PER_WEEK: u8 = 4;

/// Secondary lift: 5 sets of 10 at 50% of its training max, every week
pub const SECONDARY_PERCENTAGE: Decimal = dec!(0.5);
pub const SECONDARY_SETS: usize = 5;
pub const SECONDARY_REPS: u32 = 10;

/// The four weeks of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleWeek {
    /// Week 1: 5/5/5
    FiveRep,
    /// Week 2: 3/3/3
    ThreeRep,
    /// Week 3: 5/3/1
    FiveThreeOne,
    /// Week 4: deload
    Deload,
}

impl CycleWeek {
    pub const ALL: [CycleWeek; 4] = [
        CycleWeek::FiveRep,
        CycleWeek::ThreeRep,
        CycleWeek::FiveThreeOne,
        CycleWeek::Deload,
    ];

    pub fn number(&self) -> u8 {
        match self {
            CycleWeek::FiveRep => 1,
            CycleWeek::ThreeRep => 2,
            CycleWeek::FiveThreeOne => 3,
            CycleWeek::Deload => 4,
        }
    }

    pub fn from_number(week: u8) -> Option<Self> {
        match week {
            1 => Some(CycleWeek::FiveRep),
            2 => Some(CycleWeek::ThreeRep),
            3 => Some(CycleWeek::FiveThreeOne),
            4 => Some(CycleWeek::Deload),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CycleWeek::FiveRep => "5/5/5",
            CycleWeek::ThreeRep => "3/3/3",
            CycleWeek::FiveThreeOne => "5/3/1",
            CycleWeek::Deload => "Deload",
        }
    }

    /// Main-lift percentages of training max, in set order
    pub fn percentages(&self) -> [Decimal; 3] {
        match self {
            CycleWeek::FiveRep => [dec!(0.65), dec!(0.75), dec!(0.85)],
            CycleWeek::ThreeRep => [dec!(0.70), dec!(0.80), dec!(0.90)],
            CycleWeek::FiveThreeOne => [dec!(0.75), dec!(0.85), dec!(0.95)],
            CycleWeek::Deload => [dec!(0.40), dec!(0.50), dec!(0.60)],
        }
    }

    /// Reps for a main-lift set.
    ///
    /// The 5/3/1 week pairs reps with the percentage value, not the set
    /// position: 75% -> 5, 85% -> 3, anything else -> 1.
    pub fn reps_for(&self, percentage: Decimal) -> u32 {
        match self {
            CycleWeek::FiveRep | CycleWeek::Deload => 5,
            CycleWeek::ThreeRep => 3,
            CycleWeek::FiveThreeOne => {
                if percentage == dec!(0.75) {
                    5
                } else if percentage == dec!(0.85) {
                    3
                } else {
                    1
                }
            }
        }
    }
}

/// Main and secondary lift for one training day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRotation {
    pub day: u8,
    pub main: Lift,
    pub secondary: Lift,
}

/// Same for every week of the cycle
pub const ROTATION: [DayRotation; DAYS_PER_WEEK as usize] = [
    DayRotation { day: 1, main: Lift::Squat, secondary: Lift::Bench },
    DayRotation { day: 2, main: Lift::Deadlift, secondary: Lift::Press },
    DayRotation { day: 3, main: Lift::Bench, secondary: Lift::Squat },
    DayRotation { day: 4, main: Lift::Press, secondary: Lift::Deadlift },
];

/// Static assistance work attached to every workout
pub fn assistance_template() -> Vec<AssistanceExercise> {
    vec![
        AssistanceExercise {
            name: "Pull-ups".to_string(),
            sets: 5,
            reps: 10,
        },
        AssistanceExercise {
            name: "Ab Wheel".to_string(),
            sets: 5,
            reps: 10,
        },
    ]
}
