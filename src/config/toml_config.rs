use crate::adapters::DEFAULT_LOG_FILE;
use crate::core::dose::DoseTable;
use crate::domain::model::Thresholds;
use crate::utils::error::{Result, VitalsError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub evaluator: EvaluatorConfig,
    pub thresholds: Thresholds,
    pub logging: LoggingConfig,
    pub dose: Option<DoseTable>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub debug_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub log_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl TomlConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| VitalsError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay literal.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| VitalsError::ConfigParse {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn dose_table(&self) -> DoseTable {
        self.dose.clone().unwrap_or_default()
    }

    /// Checks paths, threshold ranges and the dose table.
    pub fn validate_config(&self) -> Result<()> {
        if self.logging.enabled {
            validation::validate_path("logging.log_file", &self.logging.log_file)?;
        }

        let t = &self.thresholds;
        validation::validate_range("thresholds.hr_min", t.hr_min, 0.0, 300.0)?;
        validation::validate_range("thresholds.hr_max", t.hr_max, 0.0, 300.0)?;
        if t.hr_max <= t.hr_min {
            return Err(VitalsError::InvalidConfigValue {
                field: "thresholds.hr_max".to_string(),
                value: t.hr_max.to_string(),
                reason: format!("Must be greater than thresholds.hr_min ({})", t.hr_min),
            });
        }
        validation::validate_range("thresholds.spo2_severe", t.spo2_severe, 0, 100)?;
        validation::validate_range("thresholds.hr_severe", t.hr_severe, 0, 300)?;

        if let Some(table) = &self.dose {
            for code in table.codes() {
                validation::validate_non_empty_string("dose", code)?;
                let per_kg = table.mg_per_kg(code).unwrap_or_default();
                if !(per_kg > 0.0) {
                    return Err(VitalsError::InvalidConfigValue {
                        field: format!("dose.{}", code),
                        value: per_kg.to_string(),
                        reason: "mg/kg must be positive".to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
