//! Validated text types shared across the T-Flow crates.
//!
//! Symptom descriptions arrive from HTTP clients and the CLI as free text. Wrapping them in
//! [`SymptomText`] once, at the boundary, means the triage pipeline never has to re-check length
//! or screen for sensitive data.

/// Minimum length of a symptom description, in characters, after trimming.
pub const MIN_SYMPTOM_CHARS: usize = 5;

/// Maximum length of a symptom description, in characters, after trimming.
pub const MAX_SYMPTOM_CHARS: usize = 2000;

/// Phrases that suggest a symptom description contains personal identifiers.
pub const PII_MARKERS: [&str; 4] = ["ssn", "social security", "credit card", "phone number"];

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The trimmed input was shorter than the permitted minimum
    #[error("Text must be at least {min} characters")]
    TooShort { min: usize },
    /// The trimmed input was longer than the permitted maximum
    #[error("Text must be at most {max} characters")]
    TooLong { max: usize },
    /// The input looked like it carried personal identifiers
    #[error("Symptoms appear to contain sensitive information")]
    SensitiveContent,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A patient's description of their symptoms.
///
/// Guarantees, once constructed:
/// - the text is trimmed and between [`MIN_SYMPTOM_CHARS`] and [`MAX_SYMPTOM_CHARS`] characters,
/// - none of the [`PII_MARKERS`] appear in it (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomText(NonEmptyText);

impl SymptomText {
    /// Validates and wraps a symptom description.
    ///
    /// # Errors
    ///
    /// Returns a `TextError` if:
    /// - the input is empty or whitespace only,
    /// - the trimmed input is outside the permitted length range,
    /// - the input contains a PII marker.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let text = NonEmptyText::new(input)?;
        let chars = text.as_str().chars().count();

        if chars < MIN_SYMPTOM_CHARS {
            return Err(TextError::TooShort {
                min: MIN_SYMPTOM_CHARS,
            });
        }
        if chars > MAX_SYMPTOM_CHARS {
            return Err(TextError::TooLong {
                max: MAX_SYMPTOM_CHARS,
            });
        }

        let lower = text.as_str().to_lowercase();
        if PII_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return Err(TextError::SensitiveContent);
        }

        Ok(Self(text))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for SymptomText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SymptomText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  chest pain  ").unwrap();
        assert_eq!(text.as_str(), "chest pain");
        assert_eq!(NonEmptyText::new("   \n"), Err(TextError::Empty));
    }

    #[test]
    fn symptom_text_enforces_length_after_trimming() {
        assert_eq!(
            SymptomText::new("  ache  "),
            Err(TextError::TooShort {
                min: MIN_SYMPTOM_CHARS
            })
        );
        assert!(SymptomText::new("fever").is_ok());

        let at_limit = "a".repeat(MAX_SYMPTOM_CHARS);
        assert!(SymptomText::new(&at_limit).is_ok());

        let over_limit = "a".repeat(MAX_SYMPTOM_CHARS + 1);
        assert_eq!(
            SymptomText::new(over_limit),
            Err(TextError::TooLong {
                max: MAX_SYMPTOM_CHARS
            })
        );
    }

    #[test]
    fn symptom_text_counts_characters_not_bytes() {
        // Five characters, ten bytes.
        assert!(SymptomText::new("ééééé").is_ok());
    }

    #[test]
    fn symptom_text_rejects_pii_markers() {
        assert_eq!(
            SymptomText::new("headache, my SSN is 123"),
            Err(TextError::SensitiveContent)
        );
        assert_eq!(
            SymptomText::new("call my Phone Number please"),
            Err(TextError::SensitiveContent)
        );
    }
}
