//! Request DTO for link creation.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for custom code validation: 3-20 alphanumeric characters.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

/// Request to create a shortened link.
///
/// Structural validation runs before any other processing; all field
/// failures are reported together.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The destination URL (must be a valid absolute URL).
    #[validate(url(message = "please enter a valid URL (including http:// or https://)"))]
    pub original_url: String,

    /// Requested lifetime in minutes.
    #[validate(range(
        min = 1,
        max = 1440,
        message = "validity period must be between 1 and 1440 minutes"
    ))]
    pub validity_minutes: u32,

    /// Optional custom short code instead of a generated one.
    #[validate(length(
        min = 3,
        max = 20,
        message = "custom code must be 3-20 characters long"
    ))]
    #[validate(regex(
        path = "*CUSTOM_CODE_REGEX",
        message = "custom code may only contain letters and numbers"
    ))]
    pub custom_code: Option<String>,
}

impl ShortenRequest {
    pub fn new(original_url: impl Into<String>, validity_minutes: u32) -> Self {
        Self {
            original_url: original_url.into(),
            validity_minutes,
            custom_code: None,
        }
    }

    pub fn with_custom_code(mut self, code: impl Into<String>) -> Self {
        self.custom_code = Some(code.into());
        self
    }

    /// Trims whitespace and drops an empty custom code, mirroring what a
    /// form layer would submit for an untouched optional field.
    pub fn normalized(mut self) -> Self {
        self.original_url = self.original_url.trim().to_string();
        self.custom_code = self
            .custom_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request_passes() {
        let req = ShortenRequest::new("https://example.com", 30);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_valid_request_with_custom_code() {
        let req = ShortenRequest::new("https://example.com", 30).with_custom_code("promo2025");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let req = ShortenRequest::new("not-a-url", 30);
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("original_url"));
    }

    #[test]
    fn test_validity_out_of_range_rejected() {
        let req = ShortenRequest::new("https://example.com", 0);
        assert!(req.validate().is_err());

        let req = ShortenRequest::new("https://example.com", 1441);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_custom_code_too_short_rejected() {
        let req = ShortenRequest::new("https://example.com", 30).with_custom_code("ab");
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("custom_code"));
    }

    #[test]
    fn test_custom_code_with_symbols_rejected() {
        let req = ShortenRequest::new("https://example.com", 30).with_custom_code("my-code!");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_multiple_invalid_fields_all_reported() {
        let req = ShortenRequest::new("nope", 5000).with_custom_code("x");
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("original_url"));
        assert!(fields.contains_key("validity_minutes"));
        assert!(fields.contains_key("custom_code"));
    }

    #[test]
    fn test_normalized_drops_empty_custom_code() {
        let req = ShortenRequest::new("  https://example.com ", 30)
            .with_custom_code("   ")
            .normalized();
        assert_eq!(req.original_url, "https://example.com");
        assert!(req.custom_code.is_none());
    }
}
