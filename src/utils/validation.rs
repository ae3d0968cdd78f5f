use crate::utils::error::{Result, ToolError};
use chrono::{Months, NaiveDate};

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 解析 YYYY-MM-DD 日期輸入
pub fn parse_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT).map_err(|e| {
        ToolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected a YYYY-MM-DD date ({})", e),
        }
    })
}

/// Rejects dates more than `max_years` before `reference`.
pub fn validate_date_window(
    field_name: &str,
    date: NaiveDate,
    reference: NaiveDate,
    max_years: u32,
) -> Result<()> {
    let earliest = reference
        .checked_sub_months(Months::new(max_years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN);

    if date < earliest {
        return Err(ToolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: date.format(DATE_INPUT_FORMAT).to_string(),
            reason: format!(
                "Date must not be earlier than {} ({} years before {})",
                earliest.format(DATE_INPUT_FORMAT),
                max_years,
                reference.format(DATE_INPUT_FORMAT)
            ),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ToolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ToolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ToolError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ToolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(ToolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}
