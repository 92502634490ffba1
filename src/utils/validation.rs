// Validation utilities for string fields

use once_cell::sync::Lazy;
use regex::Regex;

// Same shape the web client validates against
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Check an email address against the client-side pattern
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check an optional phone number: digits only, at most 20 characters
pub fn is_valid_phone(phone: &str) -> bool {
    !phone.is_empty() && phone.len() <= 20 && phone.chars().all(|c| c.is_ascii_digit())
}

/// Trim and validate string fields
///
/// # Arguments
/// * `field` - The string field to validate
/// * `required` - Whether the field is required (cannot be empty)
pub fn trim_and_validate_field(field: &str, required: bool) -> Result<String, String> {
    let trimmed = field.trim().to_string();
    if trimmed.is_empty() {
        if required {
            Err("Field cannot be empty".to_string())
        } else {
            Ok(trimmed) // For optional fields, empty is valid
        }
    } else {
        Ok(trimmed)
    }
}

/// Trim and optionally validate a string field
///
/// Returns `None` if the field is None or empty after trimming
pub fn trim_optional_field(field: Option<&String>) -> Option<String> {
    field.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("15551234567"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("555-123-4567"));
        assert!(!is_valid_phone("+15551234567"));
        assert!(!is_valid_phone("123456789012345678901")); // 21 digits
    }

    #[test]
    fn test_trim_and_validate_field() {
        assert_eq!(trim_and_validate_field("  hi  ", true), Ok("hi".to_string()));
        assert!(trim_and_validate_field("   ", true).is_err());
        assert_eq!(trim_and_validate_field("   ", false), Ok(String::new()));
    }

    #[test]
    fn test_trim_optional_field() {
        assert_eq!(
            trim_optional_field(Some(&" x ".to_string())),
            Some("x".to_string())
        );
        assert_eq!(trim_optional_field(Some(&"   ".to_string())), None);
        assert_eq!(trim_optional_field(None), None);
    }
}
