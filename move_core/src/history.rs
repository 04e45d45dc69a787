//! CSV export of archived weeks.
//!
//! The snapshot only keeps the most recent weeks, so exporting is the way to
//! hold on to older history. Files are written to a temp file and renamed
//! into place so a reader never sees a partial export.

use crate::{Error, Result, WorkoutHistoryEntry};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    week_start: String,
    completed_days: u32,
    completed_exercises: u32,
    total_exercises: u32,
    percentage: u8,
    complete: bool,
}

impl From<&WorkoutHistoryEntry> for CsvRow {
    fn from(entry: &WorkoutHistoryEntry) -> Self {
        CsvRow {
            week_start: entry.week_start_date.format("%Y-%m-%d").to_string(),
            completed_days: entry.completed_days,
            completed_exercises: entry.completed_exercises,
            total_exercises: entry.total_exercises,
            percentage: entry.percentage(),
            complete: entry.is_complete(),
        }
    }
}

/// Write `entries` as CSV with a header row
pub fn write_history<W: Write>(entries: &[WorkoutHistoryEntry], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for entry in entries {
        writer.serialize(CsvRow::from(entry))?;
    }

    writer.flush()?;
    Ok(())
}

/// Export `entries` to `path`, replacing any previous export
///
/// Returns the number of weeks written.
pub fn export_history(entries: &[WorkoutHistoryEntry], path: &Path) -> Result<usize> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let temp = NamedTempFile::new_in(dir)?;
    write_history(entries, temp.as_file())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} weeks of history to {:?}", entries.len(), path);
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entries() -> Vec<WorkoutHistoryEntry> {
        vec![
            WorkoutHistoryEntry {
                week_start_date: NaiveDate::from_ymd_opt(2026, 10, 5).unwrap(),
                completed_days: 2,
                completed_exercises: 30,
                total_exercises: 103,
            },
            WorkoutHistoryEntry {
                week_start_date: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
                completed_days: 7,
                completed_exercises: 103,
                total_exercises: 103,
            },
        ]
    }

    #[test]
    fn test_write_history_rows() {
        let mut out = Vec::new();
        write_history(&entries(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "week_start,completed_days,completed_exercises,total_exercises,percentage,complete"
        );
        assert_eq!(lines[1], "2026-10-05,2,30,103,29,false");
        assert_eq!(lines[2], "2026-10-12,7,103,103,100,true");
    }

    #[test]
    fn test_export_replaces_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("exports/history.csv");

        assert_eq!(export_history(&entries(), &path).unwrap(), 2);
        assert_eq!(export_history(&entries()[..1], &path).unwrap(), 1);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 1);
    }

    #[test]
    fn test_empty_history_writes_nothing() {
        let mut out = Vec::new();
        write_history(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
