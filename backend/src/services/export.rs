//! Score history export
//!
//! CSV layout: `date` (RFC 3339), `total_score`, then one column per metric
//! in the fixed metric order.

use chrono::{DateTime, SecondsFormat};
use wellness_coach_shared::{HistoryEntry, MetricKey, ScoreHistory, ServiceError};

pub struct ExportService;

impl ExportService {
    /// Render the history as CSV, oldest day first
    pub fn history_csv(history: &ScoreHistory) -> Result<String, ServiceError> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        let header = ["date", "total_score"]
            .into_iter()
            .chain(MetricKey::ALL.iter().map(|key| key.as_str()));
        wtr.write_record(header).map_err(csv_error)?;

        for entry in history.iter() {
            wtr.write_record(Self::row(entry)).map_err(csv_error)?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| ServiceError::Storage(format!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ServiceError::Validation(format!("CSV encoding error: {}", e)))
    }

    fn row(entry: &HistoryEntry) -> Vec<String> {
        let date = DateTime::from_timestamp_millis(entry.date)
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_else(|| entry.date.to_string());

        let mut row = Vec::with_capacity(2 + MetricKey::ALL.len());
        row.push(date);
        row.push(entry.total_score.to_string());
        row.extend(
            MetricKey::ALL
                .iter()
                .map(|key| entry.individual_scores.get(*key).to_string()),
        );
        row
    }
}

fn csv_error(err: csv::Error) -> ServiceError {
    ServiceError::Storage(format!("CSV serialization error: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellness_coach_shared::ScoreSet;

    fn entry(date: i64, steps: u8, water: u8) -> HistoryEntry {
        let scores = ScoreSet {
            steps,
            water,
            ..Default::default()
        };
        HistoryEntry {
            date,
            total_score: scores.total(),
            individual_scores: scores,
        }
    }

    #[test]
    fn test_empty_history_has_header_only() {
        let csv = ExportService::history_csv(&ScoreHistory::default()).unwrap();
        assert_eq!(
            csv.trim_end(),
            "date,total_score,calories,water,steps,sleep,sugar,carbs,protein,fat,heartRate,distance,activeMinutes"
        );
    }

    #[test]
    fn test_one_row_per_entry() {
        let mut history = ScoreHistory::default();
        history.push(entry(1_704_067_200_000, 3, 2));
        history.push(entry(1_704_153_600_000, 1, 0));

        let csv = ExportService::history_csv(&history).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2024-01-01T00:00:00.000Z,5,0,2,3,0,0,0,0,0,0,0,0");
        assert!(lines[2].starts_with("2024-01-02T00:00:00.000Z,1,"));
    }

    #[test]
    fn test_rows_parse_back() {
        let mut history = ScoreHistory::default();
        history.push(entry(0, 2, 2));

        let csv = ExportService::history_csv(&history).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let record = reader.records().next().unwrap().unwrap();

        assert_eq!(&record[0], "1970-01-01T00:00:00.000Z");
        assert_eq!(&record[1], "4");
    }
}
