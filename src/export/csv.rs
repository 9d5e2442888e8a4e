use serde::Serialize;
use std::path::Path;

use crate::error::{ExportError, LiftError, Result};
use crate::history::LiftHistory;

#[derive(Debug, Serialize)]
struct HistoryRow {
    date: String,
    lift: &'static str,
    one_rep_max: String,
}

/// Write history as `date,lift,one_rep_max` rows, grouped by lift and
/// ordered by date within each lift
pub fn export_history<P: AsRef<Path>>(history: &LiftHistory, output_path: P) -> Result<()> {
    let path = output_path.as_ref();
    let write_failed = |reason: String| {
        LiftError::Export(ExportError::WriteFailed {
            path: path.to_path_buf(),
            reason,
        })
    };

    let mut writer = csv::Writer::from_path(path).map_err(|e| write_failed(e.to_string()))?;

    for (lift, points) in history.iter() {
        for point in points {
            writer
                .serialize(HistoryRow {
                    date: point.date.format("%Y-%m-%d").to_string(),
                    lift: lift.as_str(),
                    one_rep_max: point.value.to_string(),
                })
                .map_err(|e| write_failed(e.to_string()))?;
        }
    }

    writer.flush()?;
    Ok(())
}
