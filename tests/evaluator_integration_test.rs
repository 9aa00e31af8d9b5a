use anyhow::Result;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use vitals_triage::core::batch::evaluate_csv;
use vitals_triage::domain::ports::LogSink;
use vitals_triage::{
    calculate_medication_dose, ConsoleDisplay, EvaluateOptions, FileLogSink, MemoryLogSink,
    SinkError, Status, TomlConfig, VitalStatusEvaluator, VitalsError,
};

struct UnavailableSink;

impl LogSink for UnavailableSink {
    fn append(&mut self, _line: &str) -> std::result::Result<(), SinkError> {
        Err(SinkError::Unavailable("log volume is read-only".to_string()))
    }
}

#[test]
fn test_file_log_is_appended_across_evaluators() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let log_path = temp_dir.path().join("vitals_log.txt");

    let mut first = VitalStatusEvaluator::new(false).with_log_sink(FileLogSink::new(&log_path));
    first.evaluate(190, 20, &EvaluateOptions::default())?;

    let mut second = VitalStatusEvaluator::new(true).with_log_sink(FileLogSink::new(&log_path));
    second.evaluate(60, 98, &EvaluateOptions::default().with_override("MANUAL"))?;

    let content = std::fs::read_to_string(&log_path)?;
    assert_eq!(
        content,
        "HR=190, SpO2=20, NormHR=1.07, NormSpO2=0.20, STATUS=CRITICAL\n\
         HR=60, SpO2=98, NormHR=0.14, NormSpO2=0.98, STATUS=MANUAL\n"
    );
    Ok(())
}

#[test]
fn test_unavailable_sink_does_not_fail_evaluation() -> Result<()> {
    let mut evaluator = VitalStatusEvaluator::new(true).with_log_sink(UnavailableSink);

    let evaluation = evaluator.evaluate(205, 95, &EvaluateOptions::default())?;

    assert_eq!(evaluation.status, Status::Severe);
    assert_eq!(evaluation.message, "Last status: SEVERE? (DBG)");
    assert_eq!(evaluator.last_message(), Some("Last status: SEVERE? (DBG)"));
    assert!(evaluation.warnings[0].contains("read-only"));
    Ok(())
}

#[test]
fn test_invalid_reading_leaves_sinks_untouched() {
    let sink = MemoryLogSink::new();
    let mut evaluator = VitalStatusEvaluator::new(false)
        .with_log_sink(sink.clone())
        .with_display(ConsoleDisplay::new(Vec::new()));

    let err = evaluator
        .evaluate(120, 101, &EvaluateOptions::default().verbose())
        .unwrap_err();

    assert!(matches!(err, VitalsError::InvalidReading { value: 101, bound: 100, .. }));
    assert!(sink.lines().is_empty());
    assert!(evaluator.display().get_ref().is_empty());
    assert!(evaluator.last_message().is_none());
}

#[test]
fn test_every_valid_reading_maps_to_a_known_status() {
    let mut evaluator = VitalStatusEvaluator::new(false);
    let options = EvaluateOptions::default().without_log();
    for hr in (0..=300).step_by(5) {
        for spo2 in (0..=100).step_by(5) {
            let evaluation = evaluator.evaluate(hr, spo2, &options).unwrap();
            assert!(matches!(
                evaluation.status,
                Status::Ok | Status::Warning | Status::Severe | Status::Critical
            ));
            assert_eq!(evaluation.message, format!("Last status: {}", evaluation.status));
        }
    }
}

#[test]
fn test_config_file_drives_evaluator() -> Result<()> {
    let mut config_file = NamedTempFile::new()?;
    writeln!(config_file, "[evaluator]\ndebug_mode = true\n\n[thresholds]\nhr_severe = 150")?;

    let config = TomlConfig::from_file(config_file.path())?;
    let mut evaluator =
        VitalStatusEvaluator::new(config.evaluator.debug_mode).with_thresholds(config.thresholds);

    let evaluation = evaluator.evaluate(160, 95, &EvaluateOptions::default().without_log())?;
    assert_eq!(evaluation.message, "Last status: SEVERE? (DBG)");
    Ok(())
}

#[test]
fn test_batch_file_writes_one_log_line_per_valid_row() -> Result<()> {
    let sink = MemoryLogSink::new();
    let mut evaluator = VitalStatusEvaluator::new(false).with_log_sink(sink.clone());

    let csv = "hr,spo2\n130,95\n-5,90\n60,98\n";
    let report = evaluate_csv(&mut evaluator, csv.as_bytes(), &EvaluateOptions::default())?;

    assert_eq!(report.evaluations.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(sink.lines().len(), 2);
    assert!(sink.lines()[1].ends_with("STATUS=OK\n"));
    Ok(())
}

#[test]
fn test_dose_calculator() {
    assert_eq!(calculate_medication_dose(10.0, 5.0, "DRUG_A", false).unwrap(), 16.0);
    assert!(matches!(
        calculate_medication_dose(10.0, 5.0, "UNKNOWN", false),
        Err(VitalsError::UnknownDrug { .. })
    ));
}
