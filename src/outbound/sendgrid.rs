//! Reqwest-backed mail-delivery adapter.
//!
//! Posts the v3-style JSON payload to the delivery API and maps its verdict
//! into port errors. Acceptance is asynchronous on the provider side; a
//! success here only means the message was taken on.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::domain::OutboundEmail;
use crate::domain::ports::{Mailer, MailerError};
use crate::outbound::body_preview;

/// Default delivery endpoint.
pub const DEFAULT_MAIL_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Mail-delivery adapter bound to one endpoint.
pub struct SendGridMailer {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl SendGridMailer {
    /// Build an adapter against the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let endpoint = Url::parse(DEFAULT_MAIL_ENDPOINT)
            .unwrap_or_else(|error| panic!("default mail endpoint must parse: {error}"));
        Self::with_endpoint(endpoint, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit endpoint and request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_endpoint(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        debug!(to = %email.to, "submitting message to delivery api");
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&build_payload(email))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

#[derive(Debug, Serialize)]
struct MailSendDto<'a> {
    personalizations: [PersonalizationDto<'a>; 1],
    from: AddressDto<'a>,
    subject: &'a str,
    content: [ContentDto<'a>; 2],
}

#[derive(Debug, Serialize)]
struct PersonalizationDto<'a> {
    to: [AddressDto<'a>; 1],
}

#[derive(Debug, Serialize)]
struct AddressDto<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct ContentDto<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

fn build_payload(email: &OutboundEmail) -> MailSendDto<'_> {
    MailSendDto {
        personalizations: [PersonalizationDto {
            to: [AddressDto {
                email: email.to.as_str(),
            }],
        }],
        from: AddressDto {
            email: email.from.as_str(),
        },
        subject: email.subject.as_str(),
        // Plain text must precede HTML in the content list.
        content: [
            ContentDto {
                content_type: "text/plain",
                value: email.text_body.as_str(),
            },
            ContentDto {
                content_type: "text/html",
                value: email.html_body.as_str(),
            },
        ],
    }
}

fn map_transport_error(error: reqwest::Error) -> MailerError {
    MailerError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MailerError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => MailerError::rate_limited(message),
        _ if status.is_client_error() => MailerError::rejected(message),
        _ => MailerError::transport(message),
    }
}
