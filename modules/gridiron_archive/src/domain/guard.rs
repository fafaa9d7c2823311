//! Argument guard for public operations
//!
//! A single contract: an absent value raises an invalid-argument failure
//! carrying the parameter name. Note that `Some(0)` is a present value; the
//! guard never inspects the contents.

use crate::contract::ArchiveError;

/// Unwrap `value` or fail with the parameter name
pub fn require<T>(value: Option<T>, param: &str) -> Result<T, ArchiveError> {
    value.ok_or_else(|| ArchiveError::InvalidArgument {
        param: param.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_value_passes_through() {
        assert_eq!(require(Some(7), "week"), Ok(7));
    }

    #[test]
    fn zero_is_present() {
        assert_eq!(require(Some(0), "guest_score"), Ok(0));
    }

    #[test]
    fn absent_value_names_the_parameter() {
        let err = require::<i32>(None, "host_score").unwrap_err();
        assert_eq!(
            err,
            ArchiveError::InvalidArgument {
                param: "host_score".to_string()
            }
        );
    }
}
