// Input validation for the public API
//
// Presence checks produce the field-specific messages clients rely on.
// Size limits are last-resort guards against abuse; they are hard limits,
// not configurable, and deliberately answer with one generic message.

use notekeep_core::Error;

// =============================================================================
// Input Size Limits
// =============================================================================

/// Maximum size for a username.
pub const MAX_USERNAME_BYTES: usize = 150;

/// Maximum size for an email address.
pub const MAX_EMAIL_BYTES: usize = 254;

/// Maximum size for a password.
/// Argon2 cost grows with input length, so this stays small.
pub const MAX_PASSWORD_BYTES: usize = 4 * 1024; // 4 KB

/// Maximum size for a note title.
pub const MAX_NOTE_TITLE_BYTES: usize = 1024; // 1 KB

/// Maximum size for a note body.
pub const MAX_NOTE_CONTENT_BYTES: usize = 1024 * 1024; // 1 MB

/// Generic validation error message returned to clients.
pub const VALIDATION_ERROR_MESSAGE: &str = "Input exceeds allowed limits.";

// =============================================================================
// Validation Functions
// =============================================================================

/// Empty or whitespace-only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Keep a field only if it was supplied and is not blank
pub fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !is_blank(value))
}

/// Reject a field larger than `max_bytes`
pub fn check_size(field: &'static str, value: &str, max_bytes: usize) -> Result<(), Error> {
    if value.len() > max_bytes {
        tracing::warn!(
            "{} exceeds limit: {} bytes (max: {})",
            field,
            value.len(),
            max_bytes
        );
        return Err(Error::Validation(VALIDATION_ERROR_MESSAGE));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_present_keeps_value_untrimmed() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some("  ".to_string())), None);
        assert_eq!(present(Some(" bob ".to_string())), Some(" bob ".to_string()));
    }

    #[test]
    fn test_check_size() {
        assert!(check_size("title", "short", MAX_NOTE_TITLE_BYTES).is_ok());
        assert!(check_size("title", &"x".repeat(MAX_NOTE_TITLE_BYTES), MAX_NOTE_TITLE_BYTES).is_ok());

        let err = check_size("title", &"x".repeat(MAX_NOTE_TITLE_BYTES + 1), MAX_NOTE_TITLE_BYTES)
            .unwrap_err();
        assert_eq!(err.public_message(), VALIDATION_ERROR_MESSAGE);
    }
}
