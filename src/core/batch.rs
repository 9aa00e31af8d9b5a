use crate::core::evaluator::VitalStatusEvaluator;
use crate::core::{DisplaySink, LogSink};
use crate::domain::model::{EvaluateOptions, Evaluation};
use crate::utils::error::Result;
use serde::Deserialize;
use std::io::Read;

/// One CSV row: `hr,spo2[,override_status]`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingRow {
    pub hr: i32,
    pub spo2: i32,
    #[serde(default)]
    pub override_status: Option<String>,
}

#[derive(Debug)]
pub struct RowFailure {
    /// 1-based data row, header excluded.
    pub row: usize,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub evaluations: Vec<Evaluation>,
    pub failures: Vec<RowFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.evaluations.len() + self.failures.len()
    }
}

/// Evaluates every row of a headed CSV stream. Rows that fail to parse or
/// validate are recorded and skipped; the rest keep going.
pub fn evaluate_csv<R, L, D>(
    evaluator: &mut VitalStatusEvaluator<L, D>,
    input: R,
    base_options: &EvaluateOptions,
) -> Result<BatchReport>
where
    R: Read,
    L: LogSink,
    D: DisplaySink,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    tracing::debug!("Batch columns: {:?}", headers);

    let mut report = BatchReport::default();
    for (index, row) in reader.deserialize::<ReadingRow>().enumerate() {
        let row_number = index + 1;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Skipping unreadable row {}: {}", row_number, e);
                report.failures.push(RowFailure {
                    row: row_number,
                    error: e.to_string(),
                });
                continue;
            }
        };

        let mut options = base_options.clone();
        if row.override_status.is_some() {
            options.override_status = row.override_status;
        }

        match evaluator.evaluate(row.hr, row.spo2, &options) {
            Ok(evaluation) => report.evaluations.push(evaluation),
            Err(e) => {
                tracing::warn!("Skipping invalid row {}: {}", row_number, e);
                report.failures.push(RowFailure {
                    row: row_number,
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        "Batch finished: {} evaluated, {} skipped",
        report.evaluations.len(),
        report.failures.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Status;

    #[test]
    fn test_batch_evaluates_and_skips_invalid_rows() {
        let data = "hr,spo2,override_status\n190,20,\n130,95,\n999,50,\nabc,90,\n60,98,MANUAL\n";
        let mut evaluator = VitalStatusEvaluator::new(false);
        let report =
            evaluate_csv(&mut evaluator, data.as_bytes(), &EvaluateOptions::default().without_log())
                .unwrap();

        let statuses: Vec<Status> = report.evaluations.iter().map(|e| e.status.clone()).collect();
        assert_eq!(
            statuses,
            vec![Status::Critical, Status::Warning, Status::Override("MANUAL".into())]
        );
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].row, 3);
        assert_eq!(report.failures[1].row, 4);
        assert_eq!(report.total(), 5);
        assert_eq!(evaluator.last_message(), Some("Last status: MANUAL"));
    }

    #[test]
    fn test_batch_without_override_column() {
        let data = "hr,spo2\n205,95\n";
        let mut evaluator = VitalStatusEvaluator::new(true);
        let report =
            evaluate_csv(&mut evaluator, data.as_bytes(), &EvaluateOptions::default().without_log())
                .unwrap();
        assert_eq!(report.evaluations[0].message, "Last status: SEVERE? (DBG)");
    }
}
