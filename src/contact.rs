//! Contact form
//!
//! Submission is delegated to the platform's mail client: the form assembles a
//! `mailto:` URL and the shell hands it to the browser.

use thiserror::Error;

use crate::consts::COPY_FEEDBACK_MS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("email address {0:?} is not valid")]
    InvalidEmail(String),
    #[error("message is required")]
    MissingMessage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Update a field by its form `name` attribute. Unknown fields are ignored.
    pub fn set_field(&mut self, field: &str, value: &str) {
        match field {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "message" => self.message = value.to_string(),
            other => log::debug!("Ignoring unknown contact field {:?}", other),
        }
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingName);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ContactError::MissingEmail);
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(ContactError::InvalidEmail(email.to_string())),
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::MissingMessage);
        }
        Ok(())
    }

    pub fn subject(&self) -> String {
        format!("Portfolio Contact from {}", self.name.trim())
    }

    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name.trim(),
            self.email.trim(),
            self.message
        )
    }

    /// Validated `mailto:` URL addressed to `to`
    pub fn mailto(&self, to: &str) -> Result<String, ContactError> {
        self.validate()?;
        Ok(format!(
            "mailto:{}?subject={}&body={}",
            to,
            urlencoding::encode(&self.subject()),
            urlencoding::encode(&self.body())
        ))
    }
}

/// "Copied!" feedback after copying the email address
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CopyFeedback {
    copied_at: Option<f64>,
}

impl CopyFeedback {
    pub fn mark_copied(&mut self, now_ms: f64) {
        self.copied_at = Some(now_ms);
    }

    pub fn is_showing(&self, now_ms: f64) -> bool {
        self.copied_at
            .is_some_and(|at| now_ms - at < COPY_FEEDBACK_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello & welcome?".to_string(),
        }
    }

    #[test]
    fn test_mailto_encodes_subject_and_body() {
        let url = filled().mailto("me@example.com").unwrap();
        assert!(url.starts_with("mailto:me@example.com?subject=Portfolio%20Contact%20from%20Ada%20Lovelace&body="));
        assert!(url.contains("Name%3A%20Ada%20Lovelace%0AEmail%3A%20ada%40example.com"));
        assert!(url.ends_with("Hello%20%26%20welcome%3F"));
    }

    #[test]
    fn test_validation_errors() {
        let mut form = filled();
        form.name = "  ".to_string();
        assert_eq!(form.validate(), Err(ContactError::MissingName));

        let mut form = filled();
        form.email = String::new();
        assert_eq!(form.validate(), Err(ContactError::MissingEmail));

        let mut form = filled();
        form.email = "nobody@".to_string();
        assert_eq!(
            form.validate(),
            Err(ContactError::InvalidEmail("nobody@".to_string()))
        );

        let mut form = filled();
        form.message = "\n".to_string();
        assert_eq!(form.mailto("x@y"), Err(ContactError::MissingMessage));
    }

    #[test]
    fn test_set_field() {
        let mut form = ContactForm::default();
        form.set_field("name", "Grace");
        form.set_field("email", "g@h.io");
        form.set_field("message", "Hi");
        form.set_field("phone", "555");
        assert_eq!(form.body(), "Name: Grace\nEmail: g@h.io\n\nMessage:\nHi");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_copy_feedback_expires() {
        let mut feedback = CopyFeedback::default();
        assert!(!feedback.is_showing(0.0));
        feedback.mark_copied(1000.0);
        assert!(feedback.is_showing(2999.0));
        assert!(!feedback.is_showing(3000.0));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ContactError::MissingName.to_string(), "name is required");
    }
}
