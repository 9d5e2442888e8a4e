// Library interface for liftrs
// The CLI binary and integration tests go through these modules

pub mod config;
pub mod cycle;
pub mod error;
pub mod export;
pub mod formulas;
pub mod history;
pub mod logging;
pub mod models;
pub mod progress;
pub mod records;
pub mod training_plan;

// Re-export commonly used types for convenience
pub use models::*;
pub use config::{AppConfig, PlanSettings};
pub use cycle::CycleWeek;
pub use error::{LiftError, Result};
pub use formulas::{derive_training_max, derive_training_maxes, estimated_one_rep_max};
pub use history::{current_plan, extract_history, LiftHistory};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use progress::{ProgressEntry, ProgressKey, ProgressLog, ProgressUpdate};
pub use records::{calculate_prs, theoretical_total};
pub use training_plan::PlanGenerator;
