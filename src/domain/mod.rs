//! Transport-agnostic domain types and the ports they travel through.

pub mod ports;

mod cat;
mod envelope;
mod error;
mod notification;

pub use cat::{
    Cat, CatDraft, CatDraftValidationError, CatId, CatIdentity, CatValidationError, VersionToken,
};
pub use envelope::{Envelope, CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE};
pub use error::{DomainError, ErrorCode};
pub use notification::{
    DEFAULT_HTML_BODY, DEFAULT_SENDER, DEFAULT_SUBJECT, DEFAULT_TEXT_BODY, DeliveryStatus,
    EmailAddress, EmailAddressValidationError, NotificationTemplate, OutboundEmail,
};
