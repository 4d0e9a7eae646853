use crate::error::ValidationError;

/// Placeholder used in prompts when the weaver has not saved an email.
pub const CONTACT_NOT_PROVIDED: &str = "Not Provided";

/// The weaver's single saved contact email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeaverContact {
    email: Option<String>,
}

impl WeaverContact {
    pub fn new(email: Option<String>) -> Self {
        let email = email
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self { email }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Replace the saved email. Blank input is rejected and leaves the
    /// previous value in place.
    pub fn set(&mut self, email: &str) -> Result<(), ValidationError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::BlankEmail);
        }
        self.email = Some(trimmed.to_string());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.email = None;
    }

    /// Email as embedded in a pitch's call to action.
    pub fn call_to_action_email(&self) -> &str {
        self.email().unwrap_or(CONTACT_NOT_PROVIDED)
    }
}
