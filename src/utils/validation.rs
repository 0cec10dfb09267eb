use crate::utils::error::{AdvisorError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses a budget the way the form accepts it: a finite number above zero.
pub fn parse_budget(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AdvisorError::invalid_budget(input, "budget is required"));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| AdvisorError::invalid_budget(input, "budget must be a number"))?;

    check_budget_value(input, value)
}

pub fn check_budget_value(input: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(AdvisorError::invalid_budget(input, "budget must be a finite number"));
    }
    if value <= 0.0 {
        return Err(AdvisorError::invalid_budget(input, "budget must be greater than zero"));
    }
    Ok(value)
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AdvisorError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdvisorError::InvalidConfigValueError {
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
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_contains(field_name: &str, value: &str, needle: &str) -> Result<()> {
    if !value.contains(needle) {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must contain the '{}' placeholder", needle),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_budget_accepts_positive_numbers() {
        assert_eq!(parse_budget("60000").unwrap(), 60000.0);
        assert_eq!(parse_budget("  1500.50 ").unwrap(), 1500.5);
        assert_eq!(parse_budget("0.01").unwrap(), 0.01);
    }

    #[test]
    fn test_parse_budget_rejects_invalid_input() {
        for input in ["0", "-100", "abc", "", "   ", "NaN", "inf", "-0"] {
            let err = parse_budget(input).unwrap_err();
            assert!(
                matches!(err, AdvisorError::InvalidBudget { .. }),
                "expected InvalidBudget for {:?}, got {:?}",
                input,
                err
            );
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("upstream.endpoint", "https://example.com").is_ok());
        assert!(validate_url("upstream.endpoint", "http://example.com").is_ok());
        assert!(validate_url("upstream.endpoint", "").is_err());
        assert!(validate_url("upstream.endpoint", "invalid-url").is_err());
        assert!(validate_url("upstream.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("upstream.timeout_seconds", 20, 1, 300).is_ok());
        assert!(validate_range("upstream.timeout_seconds", 0, 1, 300).is_err());
        assert!(validate_range("upstream.timeout_seconds", 301, 1, 300).is_err());
    }

    #[test]
    fn test_validate_contains() {
        assert!(validate_contains("advisor.notes_template", "for {budget}", "{budget}").is_ok());
        assert!(validate_contains("advisor.notes_template", "no placeholder", "{budget}").is_err());
    }
}
