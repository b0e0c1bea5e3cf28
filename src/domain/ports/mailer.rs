//! Port for the transactional mail-delivery service.

use async_trait::async_trait;

use crate::domain::OutboundEmail;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail-delivery adapters.
    pub enum MailerError {
        /// The delivery API refused the message (bad key, bad address).
        Rejected { message: String } =>
            "mail delivery rejected: {message}",
        /// The delivery API throttled the sender.
        RateLimited { message: String } =>
            "mail delivery rate limited: {message}",
        /// The delivery API could not be reached.
        Transport { message: String } =>
            "mail transport failed: {message}",
    }
}

/// Port for sending one transactional message.
///
/// At-most-once semantics: a successful return means the delivery API
/// accepted the message, not that it reached the recipient. No retries, no
/// delivery tracking.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand one message to the delivery API.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}

/// Fixture mailer that accepts and discards every message.
///
/// Use it in tests where delivery behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMailer;

#[async_trait]
impl Mailer for FixtureMailer {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), MailerError> {
        Ok(())
    }
}
