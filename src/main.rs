use anyhow::Context;
use clap::Parser;
use std::fs::File;
use vitals_triage::core::assessment::{Patient, PatientManager};
use vitals_triage::core::batch::evaluate_csv;
use vitals_triage::utils::{logger, validation::Validate};
use vitals_triage::{
    CliConfig, Command, ConsoleDisplay, EvaluateOptions, Evaluation, FileLogSink, TomlConfig,
    VitalStatusEvaluator, VitalsError,
};

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.log_verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Argument validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    let file_config = match load_file_config(config.config.as_deref()) {
        Ok(file_config) => file_config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = run(&config, &file_config) {
        let exit_code = e
            .downcast_ref::<VitalsError>()
            .map_or(3, VitalsError::exit_code);
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(exit_code);
    }
}

fn load_file_config(path: Option<&str>) -> vitals_triage::Result<TomlConfig> {
    let file_config = match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    file_config.validate()?;
    Ok(file_config)
}

fn options_for(command: &Command, file_config: &TomlConfig) -> EvaluateOptions {
    let mut options = command.evaluate_options().unwrap_or_default();
    options.log = options.log && file_config.logging.enabled;
    options
}

fn log_sink_for(log_file: &Option<String>, file_config: &TomlConfig) -> FileLogSink {
    FileLogSink::new(
        log_file
            .clone()
            .unwrap_or_else(|| file_config.logging.log_file.clone()),
    )
}

fn print_evaluation(evaluation: &Evaluation, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(evaluation)?);
    } else {
        println!("{}", evaluation.message);
    }
    for warning in &evaluation.warnings {
        eprintln!("⚠️  {}", warning);
    }
    Ok(())
}

fn run(config: &CliConfig, file_config: &TomlConfig) -> anyhow::Result<()> {
    match &config.command {
        Command::Evaluate {
            hr,
            spo2,
            debug,
            log_file,
            json,
            ..
        } => {
            let options = options_for(&config.command, file_config);
            let mut evaluator =
                VitalStatusEvaluator::new(*debug || file_config.evaluator.debug_mode)
                    .with_thresholds(file_config.thresholds.clone())
                    .with_log_sink(log_sink_for(log_file, file_config))
                    .with_display(ConsoleDisplay::stdout());

            let evaluation = evaluator.evaluate(*hr, *spo2, &options)?;
            print_evaluation(&evaluation, *json)?;
        }
        Command::Batch {
            input,
            debug,
            log_file,
            json,
            ..
        } => {
            let options = options_for(&config.command, file_config);
            let mut evaluator =
                VitalStatusEvaluator::new(*debug || file_config.evaluator.debug_mode)
                    .with_thresholds(file_config.thresholds.clone())
                    .with_log_sink(log_sink_for(log_file, file_config));

            let reader =
                File::open(input).with_context(|| format!("Failed to open batch input '{}'", input))?;
            let report = evaluate_csv(&mut evaluator, reader, &options)?;

            for evaluation in &report.evaluations {
                print_evaluation(evaluation, *json)?;
            }
            for failure in &report.failures {
                eprintln!("❌ row {}: {}", failure.row, failure.error);
            }
            tracing::info!(
                "✅ {} of {} readings evaluated",
                report.evaluations.len(),
                report.total()
            );
        }
        Command::Dose {
            weight,
            age,
            code,
            urgent,
        } => {
            let dose = file_config
                .dose_table()
                .calculate(*weight, *age, code, *urgent)?;
            println!("{} mg", dose);
        }
        Command::Bp {
            name,
            age,
            systolic,
            diastolic,
        } => {
            let mut manager = PatientManager::new();
            let patient = Patient::new(name.clone(), *age);
            let group = manager.process(&patient)?;
            let risk = manager.assess(&patient, *systolic, *diastolic)?;
            println!(
                "Patient {} ({:?}): risk={:?} score={}",
                patient.name,
                group,
                risk,
                risk.score()
            );
        }
    }

    Ok(())
}
