//! User input value object

use super::error::DomainError;

/// Text submitted by the user (Value Object)
///
/// The text is kept verbatim. Only whitespace-only input is rejected;
/// nothing is trimmed from accepted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    content: String,
}

impl UserInput {
    /// Validate raw input, rejecting empty and whitespace-only text
    pub fn parse(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyInput)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the input content
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_kept_verbatim() {
        let input = UserInput::parse("  What is a fever?  ").unwrap();
        assert_eq!(input.as_str(), "  What is a fever?  ");
    }

    #[test]
    fn test_whitespace_only_rejected() {
        assert_eq!(UserInput::parse(""), Err(DomainError::EmptyInput));
        assert_eq!(UserInput::parse(" \t\n "), Err(DomainError::EmptyInput));
    }

    #[test]
    fn test_into_content_returns_original_text() {
        let input = UserInput::parse("hi\n").unwrap();
        assert_eq!(input.into_content(), "hi\n");
    }
}
