//! The normalized response envelope every store-backed handler returns.
//!
//! A single status mapping turns domain errors into envelopes so every
//! handler boundary produces the same shape on the same failure class, and
//! no code path can leave the caller without a structured result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{DomainError, ErrorCode};

/// Header name carried by every envelope.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
/// Content type declared by every envelope.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Normalized `{statusCode, headers, body}` handler result.
///
/// # Examples
/// ```
/// use clowder::domain::{DomainError, Envelope};
/// use serde_json::json;
///
/// let ok = Envelope::ok(json!({ "name": "Tom" }));
/// assert_eq!(ok.status_code, 200);
///
/// let missing = Envelope::from_error(&DomainError::not_found("Not found."));
/// assert_eq!(missing.status_code, 404);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// HTTP-shaped status code.
    pub status_code: u16,
    /// Response headers, always including the content-type declaration.
    pub headers: BTreeMap<String, String>,
    /// Response body: a record, an acknowledgment, or an error description.
    pub body: Value,
}

fn status_for(code: ErrorCode) -> u16 {
    match code {
        ErrorCode::InvalidRequest => 400,
        ErrorCode::NotFound => 404,
        ErrorCode::Conflict => 409,
        ErrorCode::ServiceUnavailable => 503,
        ErrorCode::InternalError => 500,
    }
}

fn redact_if_internal(error: &DomainError) -> DomainError {
    if matches!(error.code(), ErrorCode::InternalError) {
        // Internal messages describe collaborator failures; keep those out
        // of the outward body.
        DomainError::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl Envelope {
    /// Build an envelope with the JSON content-type header preset.
    pub fn with_status(status_code: u16, body: Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE_HEADER.to_owned(), JSON_CONTENT_TYPE.to_owned());
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// 200 envelope.
    pub fn ok(body: Value) -> Self {
        Self::with_status(200, body)
    }

    /// 201 envelope.
    pub fn created(body: Value) -> Self {
        Self::with_status(201, body)
    }

    /// Map a domain error onto its envelope, redacting internal messages.
    ///
    /// This is the only error-to-envelope path in the crate; every handler
    /// failure funnels through it.
    pub fn from_error(error: &DomainError) -> Self {
        let outward = redact_if_internal(error);
        let body = serde_json::to_value(&outward)
            .unwrap_or_else(|_| Value::String(outward.message().to_owned()));
        Self::with_status(status_for(error.code()), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(DomainError::invalid_request("bad"), 400)]
    #[case(DomainError::not_found("missing"), 404)]
    #[case(DomainError::conflict("raced"), 409)]
    #[case(DomainError::service_unavailable("down"), 503)]
    #[case(DomainError::internal("boom"), 500)]
    fn error_codes_map_onto_statuses(#[case] error: DomainError, #[case] expected: u16) {
        assert_eq!(Envelope::from_error(&error).status_code, expected);
    }

    #[test]
    fn every_envelope_declares_the_json_content_type() {
        let envelopes = [
            Envelope::ok(json!({})),
            Envelope::created(json!({})),
            Envelope::from_error(&DomainError::not_found("missing")),
        ];
        for envelope in envelopes {
            assert_eq!(
                envelope.headers.get(CONTENT_TYPE_HEADER).map(String::as_str),
                Some(JSON_CONTENT_TYPE),
            );
        }
    }

    #[test]
    fn internal_messages_are_redacted_from_the_body() {
        let envelope = Envelope::from_error(&DomainError::internal("pool exhausted at 10.0.0.3"));
        assert_eq!(envelope.body["message"], "Internal server error");
    }

    #[test]
    fn non_internal_messages_and_details_are_preserved() {
        let error = DomainError::invalid_request("bad").with_details(json!({ "field": "name" }));
        let envelope = Envelope::from_error(&error);
        assert_eq!(envelope.body["message"], "bad");
        assert_eq!(envelope.body["details"]["field"], "name");
    }

    #[test]
    fn envelope_serialises_with_camel_case_keys() {
        let value = serde_json::to_value(Envelope::ok(json!({ "id": "c1" }))).expect("serialises");
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["headers"][CONTENT_TYPE_HEADER], JSON_CONTENT_TYPE);
        assert_eq!(value["body"]["id"], "c1");
    }
}
