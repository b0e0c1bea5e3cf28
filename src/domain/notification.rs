//! Outbound notification model for the send-email action.
//!
//! The sender address, subject and message bodies are explicit configuration
//! with documented defaults rather than process-wide literals; an invocation
//! may override any of them. The email path reports a code-less
//! [`DeliveryStatus`] instead of an envelope.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default sender address used when the invocation does not override it.
pub const DEFAULT_SENDER: &str = "cats@clowder.example";
/// Default subject prefix; the send time is appended at render time.
pub const DEFAULT_SUBJECT: &str = "You got meowed - new cat arrival";
/// Default plain-text body.
pub const DEFAULT_TEXT_BODY: &str = "A new cat was just created!";
/// Default HTML body.
pub const DEFAULT_HTML_BODY: &str = "<strong>A new cat was just created!</strong>";

/// Validation errors for email addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailAddressValidationError {
    /// Address is empty after trimming whitespace.
    #[error("email address must not be empty")]
    Empty,
    /// Address is missing the `@` separator.
    #[error("email address must contain '@'")]
    MissingAtSign,
}

/// A lightly validated email address.
///
/// Full RFC validation belongs to the delivery API; this only rejects values
/// that could never be deliverable.
///
/// # Examples
/// ```
/// use clowder::domain::EmailAddress;
///
/// let address = EmailAddress::try_new("a@b.com").expect("valid address");
/// assert_eq!(address.as_str(), "a@b.com");
/// assert!(EmailAddress::try_new("nobody").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Construct an address, panicking if validation fails.
    ///
    /// Reserved for compile-time constant inputs such as [`DEFAULT_SENDER`].
    pub fn new(value: impl Into<String>) -> Self {
        match Self::try_new(value) {
            Ok(address) => address,
            Err(err) => panic!("email addresses must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor validating the address shape.
    pub fn try_new(value: impl Into<String>) -> Result<Self, EmailAddressValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(EmailAddressValidationError::Empty);
        }
        if !raw.contains('@') {
            return Err(EmailAddressValidationError::MissingAtSign);
        }
        Ok(Self(raw))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailAddressValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Message template for the creation notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTemplate {
    /// Sender address placed in the `from` field.
    pub sender: EmailAddress,
    /// Subject prefix; the send time is appended at render time.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// HTML body.
    pub html_body: String,
}

impl Default for NotificationTemplate {
    fn default() -> Self {
        Self {
            sender: EmailAddress::new(DEFAULT_SENDER),
            subject: DEFAULT_SUBJECT.to_owned(),
            text_body: DEFAULT_TEXT_BODY.to_owned(),
            html_body: DEFAULT_HTML_BODY.to_owned(),
        }
    }
}

impl NotificationTemplate {
    /// Render the template into a sendable message.
    ///
    /// The subject carries the send time so repeated notifications remain
    /// distinguishable in a mailbox.
    pub fn render(&self, to: EmailAddress, sent_at: DateTime<Utc>) -> OutboundEmail {
        OutboundEmail {
            to,
            from: self.sender.clone(),
            subject: format!("{} - {}", self.subject, sent_at.format("%H:%M:%S")),
            text_body: self.text_body.clone(),
            html_body: self.html_body.clone(),
        }
    }
}

/// A fully rendered message handed to the mailer port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Recipient address.
    pub to: EmailAddress,
    /// Sender address.
    pub from: EmailAddress,
    /// Rendered subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// HTML body.
    pub html_body: String,
}

/// Result of the send-email action.
///
/// Carries only a status string: `"OK"` on acceptance, otherwise the error
/// description. Produced on every path; the action never surfaces a raw
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryStatus {
    status: String,
}

impl DeliveryStatus {
    /// Acceptance marker.
    pub fn ok() -> Self {
        Self {
            status: "OK".to_owned(),
        }
    }

    /// Failure carrying the error description.
    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            status: description.into(),
        }
    }

    /// The status string.
    pub fn status(&self) -> &str {
        self.status.as_str()
    }

    /// Whether the delivery API accepted the message.
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn render_appends_the_send_time_to_the_subject() {
        let sent_at = Utc
            .with_ymd_and_hms(2024, 5, 4, 13, 7, 9)
            .single()
            .expect("valid timestamp");
        let email = NotificationTemplate::default()
            .render(EmailAddress::new("a@b.com"), sent_at);
        assert_eq!(email.subject, format!("{DEFAULT_SUBJECT} - 13:07:09"));
        assert_eq!(email.from.as_str(), DEFAULT_SENDER);
        assert_eq!(email.to.as_str(), "a@b.com");
    }

    #[test]
    fn overridden_template_fields_reach_the_rendered_message() {
        let template = NotificationTemplate {
            sender: EmailAddress::new("keeper@cattery.example"),
            subject: "Litter update".to_owned(),
            text_body: "plain".to_owned(),
            html_body: "<p>rich</p>".to_owned(),
        };
        let email = template.render(EmailAddress::new("a@b.com"), Utc::now());
        assert!(email.subject.starts_with("Litter update - "));
        assert_eq!(email.text_body, "plain");
        assert_eq!(email.html_body, "<p>rich</p>");
    }

    #[test]
    fn delivery_status_serialises_to_a_bare_status_field() {
        let value = serde_json::to_value(DeliveryStatus::ok()).expect("serialises");
        assert_eq!(value, serde_json::json!({ "status": "OK" }));
        assert!(DeliveryStatus::ok().is_ok());
        assert!(!DeliveryStatus::failed("quota exceeded").is_ok());
    }

    #[test]
    fn email_address_rejects_values_without_at_sign() {
        assert_eq!(
            EmailAddress::try_new("nobody").unwrap_err(),
            EmailAddressValidationError::MissingAtSign,
        );
    }
}
