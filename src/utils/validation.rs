use crate::utils::error::{ReadingField, Result, VitalsError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks one raw reading against its inclusive domain, reporting the
/// violated bound.
pub fn validate_reading(field: ReadingField, value: i32, min: i32, max: i32) -> Result<()> {
    if value < min {
        return Err(VitalsError::InvalidReading {
            field,
            value,
            bound: min,
        });
    }
    if value > max {
        return Err(VitalsError::InvalidReading {
            field,
            value,
            bound: max,
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(VitalsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(VitalsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(VitalsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(VitalsError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
