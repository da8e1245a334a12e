//! Field extraction errors.

use thiserror::Error;

/// Why a single field could not be normalized.
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    /// Nothing numeric left after filtering, or not a valid float.
    #[error("no numeric value in {text:?}")]
    NotANumber { text: String },

    /// Price or shipping text without a leading currency token.
    #[error("no currency label in {text:?}")]
    MissingLabel { text: String },

    /// Shipping text with a currency label but no amount token.
    #[error("no amount after currency label in {text:?}")]
    MissingAmount { text: String },

    /// A matched element lacks an attribute the field is read from.
    #[error("element has no `{attr}` attribute")]
    MissingAttribute { attr: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ExtractError::NotANumber { text: "Free".to_string() };
        assert_eq!(err.to_string(), "no numeric value in \"Free\"");

        let err = ExtractError::MissingAttribute { attr: "href" };
        assert_eq!(err.to_string(), "element has no `href` attribute");
    }
}
