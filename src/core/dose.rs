use crate::utils::error::{Result, VitalsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PEDIATRIC_AGE_LIMIT: f64 = 12.0;
pub const PEDIATRIC_DOSE_FACTOR: f64 = 0.8;

/// mg/kg dose per drug code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoseTable {
    per_kg: BTreeMap<String, f64>,
}

impl Default for DoseTable {
    fn default() -> Self {
        let per_kg = [("DRUG_A", 2.0), ("DRUG_B", 0.5), ("DRUG_C", 1.2)]
            .into_iter()
            .map(|(code, mg)| (code.to_string(), mg))
            .collect();
        Self { per_kg }
    }
}

impl DoseTable {
    pub fn new(per_kg: BTreeMap<String, f64>) -> Self {
        Self { per_kg }
    }

    pub fn mg_per_kg(&self, code: &str) -> Option<f64> {
        self.per_kg.get(code).copied()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.per_kg.keys().map(String::as_str)
    }

    /// Weight-based dose in mg, rounded to two decimals. Patients younger
    /// than the pediatric limit get the reduced factor. `urgent` is recorded
    /// but does not change the amount.
    pub fn calculate(&self, weight_kg: f64, age_years: f64, code: &str, urgent: bool) -> Result<f64> {
        if !(weight_kg > 0.0) {
            return Err(VitalsError::InvalidDose {
                field: "weight_kg".to_string(),
                value: weight_kg.to_string(),
                reason: "weight_kg must be positive".to_string(),
            });
        }

        if !(age_years >= 0.0) {
            return Err(VitalsError::InvalidDose {
                field: "age_years".to_string(),
                value: age_years.to_string(),
                reason: "age_years cannot be negative".to_string(),
            });
        }

        let per_kg = self.mg_per_kg(code).ok_or_else(|| VitalsError::UnknownDrug {
            code: code.to_string(),
        })?;

        let mut dose_mg = weight_kg * per_kg;
        if age_years < PEDIATRIC_AGE_LIMIT {
            dose_mg *= PEDIATRIC_DOSE_FACTOR;
        }

        let rounded = round_to_cents(dose_mg);
        tracing::debug!(weight_kg, age_years, code, urgent, dose_mg = rounded, "Calculated dose");
        Ok(rounded)
    }
}

/// Rounds the exact binary value to two decimals, ties to even.
fn round_to_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Dose against the built-in drug table.
pub fn calculate_medication_dose(weight_kg: f64, age_years: f64, code: &str, urgent: bool) -> Result<f64> {
    DoseTable::default().calculate(weight_kg, age_years, code, urgent)
}
