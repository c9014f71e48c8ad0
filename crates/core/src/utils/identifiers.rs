use crate::errors::{Result, ValidationError};

/// Checks an identifier against the column contract it will be stored under:
/// non-empty, no surrounding whitespace, at most `max_len` characters.
pub fn validate_identifier(kind: &'static str, value: &str, max_len: usize) -> Result<()> {
    let reason = if value.is_empty() {
        Some("must not be empty".to_string())
    } else if value.trim() != value {
        Some("must not have leading or trailing whitespace".to_string())
    } else if value.chars().count() > max_len {
        Some(format!("must be at most {} characters", max_len))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ValidationError::InvalidIdentifier {
            kind,
            value: value.to_string(),
            reason,
        }
        .into()),
        None => Ok(()),
    }
}
