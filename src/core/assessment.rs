use crate::utils::error::{Result, VitalsError};
use serde::{Deserialize, Serialize};

pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 130;
pub const ADULT_AGE: i32 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    pub age: i32,
    pub existing_condition: Option<String>,
}

impl Patient {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            age,
            existing_condition: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.existing_condition = Some(condition.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeGroup {
    Minor,
    Adult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum BpRisk {
    Normal,
    Medium,
    High,
}

impl BpRisk {
    pub fn score(self) -> u8 {
        match self {
            BpRisk::Normal => 0,
            BpRisk::Medium => 1,
            BpRisk::High => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HealthAssessment;

impl HealthAssessment {
    pub fn is_valid_age(&self, age: i32) -> bool {
        (MIN_AGE..=MAX_AGE).contains(&age)
    }

    pub fn is_minor(&self, age: i32) -> bool {
        age < ADULT_AGE
    }

    /// Either pressure above its high limit is high risk.
    pub fn assess_blood_pressure(&self, systolic: i32, diastolic: i32) -> BpRisk {
        if systolic > 150 || diastolic > 95 {
            BpRisk::High
        } else if systolic > 130 {
            BpRisk::Medium
        } else {
            BpRisk::Normal
        }
    }
}

/// In-memory audit trail of processed patients.
#[derive(Debug, Clone, Default)]
pub struct PatientRepository {
    logs: Vec<String>,
}

impl PatientRepository {
    pub fn log(&mut self, message: impl Into<String>) {
        self.logs.push(message.into());
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}

#[derive(Debug, Default)]
pub struct PatientManager {
    repository: PatientRepository,
    health: HealthAssessment,
}

impl PatientManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(&self) -> &PatientRepository {
        &self.repository
    }

    pub fn process(&mut self, patient: &Patient) -> Result<AgeGroup> {
        if !self.health.is_valid_age(patient.age) {
            tracing::warn!(name = %patient.name, age = patient.age, "Invalid age");
            self.repository.log(format!("Invalid patient: {}", patient.name));
            return Err(VitalsError::InvalidPatientAge { age: patient.age });
        }

        let group = if self.health.is_minor(patient.age) {
            AgeGroup::Minor
        } else {
            AgeGroup::Adult
        };
        tracing::info!(name = %patient.name, ?group, "Patient processed");
        self.repository.log(format!("Processed patient {}", patient.name));
        Ok(group)
    }

    pub fn assess(&mut self, patient: &Patient, systolic: i32, diastolic: i32) -> Result<BpRisk> {
        if !self.health.is_valid_age(patient.age) {
            self.repository.log(format!("Invalid patient age: {}", patient.age));
            return Err(VitalsError::InvalidPatientAge { age: patient.age });
        }

        let risk = self.health.assess_blood_pressure(systolic, diastolic);
        tracing::debug!(name = %patient.name, systolic, diastolic, score = risk.score(), "Blood pressure assessed");
        Ok(risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_limits() {
        let health = HealthAssessment;
        assert!(health.is_valid_age(0));
        assert!(health.is_valid_age(130));
        assert!(!health.is_valid_age(-1));
        assert!(!health.is_valid_age(131));
        assert!(health.is_minor(17));
        assert!(!health.is_minor(18));
    }

    #[test]
    fn test_blood_pressure_risk() {
        let health = HealthAssessment;
        assert_eq!(health.assess_blood_pressure(151, 80), BpRisk::High);
        assert_eq!(health.assess_blood_pressure(120, 96), BpRisk::High);
        assert_eq!(health.assess_blood_pressure(140, 90), BpRisk::Medium);
        assert_eq!(health.assess_blood_pressure(130, 95), BpRisk::Normal);
        assert_eq!(BpRisk::High.score(), 2);
    }

    #[test]
    fn test_process_logs_outcome() {
        let mut manager = PatientManager::new();
        assert_eq!(manager.process(&Patient::new("Ada", 9)).unwrap(), AgeGroup::Minor);
        assert_eq!(
            manager.process(&Patient::new("Ben", 40).with_condition("asthma")).unwrap(),
            AgeGroup::Adult
        );
        assert!(manager.process(&Patient::new("Cy", 200)).is_err());
        assert_eq!(
            manager.repository().logs(),
            &[
                "Processed patient Ada".to_string(),
                "Processed patient Ben".to_string(),
                "Invalid patient: Cy".to_string(),
            ]
        );
    }

    #[test]
    fn test_assess_rejects_invalid_age() {
        let mut manager = PatientManager::new();
        assert!(matches!(
            manager.assess(&Patient::new("Dee", -4), 120, 80),
            Err(VitalsError::InvalidPatientAge { age: -4 })
        ));
        assert_eq!(manager.repository().logs(), &["Invalid patient age: -4".to_string()]);
        assert_eq!(manager.assess(&Patient::new("Eve", 50), 135, 80).unwrap(), BpRisk::Medium);
    }
}
