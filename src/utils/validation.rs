use crate::utils::error::{Result, SandboxError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SandboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SandboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SandboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Org aliases, usernames and sandbox names end up as single process
/// arguments, so embedded whitespace is rejected.
pub fn validate_org_identifier(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if value.chars().any(char::is_whitespace) {
        return Err(SandboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot contain whitespace".to_string(),
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
        return Err(SandboxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("deploy.source_path", "./force-app/").is_ok());
        assert!(validate_path("deploy.source_path", "").is_err());
        assert!(validate_path("deploy.source_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_org_identifier() {
        assert!(validate_org_identifier("alias", "dev1").is_ok());
        assert!(validate_org_identifier("alias", "user@example.com.dev1").is_ok());
        assert!(validate_org_identifier("alias", "   ").is_err());
        assert!(validate_org_identifier("alias", "dev 1").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("sandbox.wait_minutes", 30, 1, 1440).is_ok());
        assert!(validate_range("sandbox.wait_minutes", 0, 1, 1440).is_err());
    }
}
