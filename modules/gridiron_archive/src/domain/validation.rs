//! Field validation for catalog and game inputs
//!
//! Empty strings are rejected where a name is required, but the literal
//! value zero passes the numeric checks: a 0-0 final is a legal game.

use crate::contract::ArchiveError;

/// First season on record
pub const FIRST_SEASON_YEAR: i32 = 1920;

/// Maximum length of a short name (league / conference abbreviation)
pub const SHORT_NAME_MAX: usize = 5;

/// Maximum length of a long name or team/division name
pub const LONG_NAME_MAX: usize = 50;

/// Reject an empty string where a non-empty value is required
pub fn require_non_empty(value: &str, field: &str) -> Result<(), ArchiveError> {
    if value.trim().is_empty() {
        return Err(ArchiveError::Validation {
            message: format!("{} must not be empty", field),
        });
    }
    Ok(())
}

/// Reject a negative number; zero is legal
pub fn require_non_negative(value: i32, field: &str) -> Result<(), ArchiveError> {
    if value < 0 {
        return Err(ArchiveError::Validation {
            message: format!("{} must not be negative", field),
        });
    }
    Ok(())
}

/// Seasons start in 1920
pub fn require_valid_year(year: i32) -> Result<(), ArchiveError> {
    if year < FIRST_SEASON_YEAR {
        return Err(ArchiveError::Validation {
            message: format!("year must be {} or later", FIRST_SEASON_YEAR),
        });
    }
    Ok(())
}

pub fn require_short_name(value: &str, field: &str) -> Result<(), ArchiveError> {
    require_non_empty(value, field)?;
    require_max_len(value, SHORT_NAME_MAX, field)
}

pub fn require_long_name(value: &str, field: &str) -> Result<(), ArchiveError> {
    require_non_empty(value, field)?;
    require_max_len(value, LONG_NAME_MAX, field)
}

fn require_max_len(value: &str, max: usize, field: &str) -> Result<(), ArchiveError> {
    if value.chars().count() > max {
        return Err(ArchiveError::Validation {
            message: format!("{} must be at most {} characters", field, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_rejected() {
        assert!(require_non_empty("", "guest_name").is_err());
        assert!(require_non_empty("   ", "guest_name").is_err());
        assert!(require_non_empty("Akron Pros", "guest_name").is_ok());
    }

    #[test]
    fn zero_passes_the_numeric_check() {
        assert!(require_non_negative(0, "guest_score").is_ok());
        assert!(require_non_negative(73, "guest_score").is_ok());
        assert!(require_non_negative(-1, "guest_score").is_err());
    }

    #[test]
    fn years_before_1920_are_rejected() {
        assert!(require_valid_year(1919).is_err());
        assert!(require_valid_year(1920).is_ok());
        assert!(require_valid_year(2024).is_ok());
    }

    #[test]
    fn short_name_length_is_capped() {
        assert!(require_short_name("NFL", "short_name").is_ok());
        assert!(require_short_name("AAFC", "short_name").is_ok());
        assert!(require_short_name("TOOLONG", "short_name").is_err());
        assert!(require_short_name("", "short_name").is_err());
    }

    #[test]
    fn long_name_length_is_capped() {
        assert!(require_long_name("National Football League", "long_name").is_ok());
        assert!(require_long_name(&"x".repeat(51), "long_name").is_err());
    }
}
