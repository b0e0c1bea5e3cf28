//! Invocation parameter objects and their validated request forms.
//!
//! Every action is invoked with one JSON object of named parameters, e.g.
//!
//! ```json
//! {
//!   "storeUrl": "https://db.example.com",
//!   "storeApiKey": "...",
//!   "id": "c1",
//!   "name": "Tom",
//!   "color": "orange"
//! }
//! ```
//!
//! Credentials are split from the per-operation fields so the binaries can
//! construct an adapter while the handlers see only the operation. The
//! `TryFrom` conversions own validation and report field-level details, so
//! a handler can never observe an invalid request.

use serde::Deserialize;
use serde_json::json;

use crate::domain::{
    CatDraft, CatDraftValidationError, CatId, CatValidationError, DomainError, EmailAddress,
    NotificationTemplate,
};

/// Document-store credentials supplied fresh on every invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCredentials {
    /// Store endpoint URL.
    pub store_url: String,
    /// Store API key.
    pub store_api_key: String,
}

/// Mail-service credentials supplied fresh on every invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailCredentials {
    /// Delivery-service API key.
    pub mail_api_key: String,
}

/// Parameters of the fetch action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchCatParams {
    /// Identifier of the record to fetch.
    pub id: String,
}

/// Parameters of the create action.
///
/// `name` and `color` are optional at the wire so a missing field reports
/// the same explanatory 400 as a blank one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatParams {
    /// Display name of the new record.
    #[serde(default)]
    pub name: Option<String>,
    /// Coat colour of the new record.
    #[serde(default)]
    pub color: Option<String>,
}

/// Parameters of the update action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCatParams {
    /// Identifier of the record to update.
    pub id: String,
    /// Replacement display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement coat colour.
    #[serde(default)]
    pub color: Option<String>,
}

/// Parameters of the send-email action.
///
/// The template fields default to the documented constants in
/// [`crate::domain::NotificationTemplate`]; an invocation may override any
/// of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyParams {
    /// Recipient address.
    pub to_email: String,
    /// Override for the sender address.
    #[serde(default)]
    pub sender: Option<String>,
    /// Override for the subject prefix.
    #[serde(default)]
    pub subject: Option<String>,
    /// Override for the plain-text body.
    #[serde(default)]
    pub text_body: Option<String>,
    /// Override for the HTML body.
    #[serde(default)]
    pub html_body: Option<String>,
}

/// Validated fetch request.
#[derive(Debug, Clone)]
pub struct FetchCatRequest {
    /// Identifier to look up.
    pub id: CatId,
}

/// Validated create request.
#[derive(Debug, Clone)]
pub struct CreateCatRequest {
    /// Validated record fields.
    pub draft: CatDraft,
}

/// Validated update request.
#[derive(Debug, Clone)]
pub struct UpdateCatRequest {
    /// Identifier to locate.
    pub id: CatId,
    /// Validated replacement fields.
    pub draft: CatDraft,
}

/// Validated notify request.
#[derive(Debug, Clone)]
pub struct NotifyRequest {
    /// Recipient address.
    pub to: EmailAddress,
    /// Resolved message template.
    pub template: NotificationTemplate,
}

fn map_id_error(error: &CatValidationError) -> DomainError {
    DomainError::invalid_request(error.to_string())
        .with_details(json!({ "field": "id", "code": "invalid_id" }))
}

fn map_draft_error(error: &CatDraftValidationError) -> DomainError {
    let field = match error {
        CatDraftValidationError::EmptyName => "name",
        CatDraftValidationError::EmptyColor => "color",
    };
    DomainError::invalid_request("Bad request: check that name and color are not missing.")
        .with_details(json!({ "field": field, "code": format!("missing_{field}") }))
}

fn draft_from_optional(
    name: Option<String>,
    color: Option<String>,
) -> Result<CatDraft, DomainError> {
    CatDraft::new(name.unwrap_or_default(), color.unwrap_or_default())
        .map_err(|error| map_draft_error(&error))
}

impl TryFrom<FetchCatParams> for FetchCatRequest {
    type Error = DomainError;

    fn try_from(value: FetchCatParams) -> Result<Self, Self::Error> {
        let id = CatId::new(value.id).map_err(|error| map_id_error(&error))?;
        Ok(Self { id })
    }
}

impl TryFrom<CreateCatParams> for CreateCatRequest {
    type Error = DomainError;

    fn try_from(value: CreateCatParams) -> Result<Self, Self::Error> {
        let draft = draft_from_optional(value.name, value.color)?;
        Ok(Self { draft })
    }
}

impl TryFrom<UpdateCatParams> for UpdateCatRequest {
    type Error = DomainError;

    fn try_from(value: UpdateCatParams) -> Result<Self, Self::Error> {
        let id = CatId::new(value.id).map_err(|error| map_id_error(&error))?;
        let draft = draft_from_optional(value.name, value.color)?;
        Ok(Self { id, draft })
    }
}

impl TryFrom<NotifyParams> for NotifyRequest {
    type Error = DomainError;

    fn try_from(value: NotifyParams) -> Result<Self, Self::Error> {
        let to = EmailAddress::try_new(value.to_email).map_err(|error| {
            DomainError::invalid_request(error.to_string())
                .with_details(json!({ "field": "toEmail", "code": "invalid_recipient" }))
        })?;

        let mut template = NotificationTemplate::default();
        if let Some(sender) = value.sender {
            template.sender = EmailAddress::try_new(sender).map_err(|error| {
                DomainError::invalid_request(error.to_string())
                    .with_details(json!({ "field": "sender", "code": "invalid_sender" }))
            })?;
        }
        if let Some(subject) = value.subject {
            template.subject = subject;
        }
        if let Some(text_body) = value.text_body {
            template.text_body = text_body;
        }
        if let Some(html_body) = value.html_body {
            template.html_body = html_body;
        }

        Ok(Self { to, template })
    }
}
