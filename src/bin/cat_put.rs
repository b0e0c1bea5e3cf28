//! `cat-put` action entry point: read-then-conditional-write update.

use std::io;

use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use tokio::runtime::Builder;
use url::Url;

use clowder::domain::{DomainError, Envelope};
use clowder::inbound::actions::params::{StoreCredentials, UpdateCatParams};
use clowder::inbound::actions::update_cat;
use clowder::inbound::invocation::{decode_params, emit, init_tracing, read_payload};
use clowder::outbound::cloudant::CloudantCatStore;

/// `cat-put` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cat-put",
    about = "Replace a cat record's name and color by identifier",
    version
)]
struct CliArgs {
    /// Invocation parameters as one JSON object. Read from stdin when
    /// omitted.
    #[arg(long = "params", value_name = "json")]
    params: Option<String>,
}

/// Full invocation payload: credentials plus operation parameters.
#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(flatten)]
    credentials: StoreCredentials,
    #[serde(flatten)]
    params: UpdateCatParams,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    init_tracing();
    let raw = read_payload(args.params)?;
    let envelope = run(&raw).await;
    emit(&envelope)
}

async fn run(raw: &str) -> Envelope {
    let payload = match decode_params::<Payload>(raw) {
        Ok(payload) => payload,
        Err(error) => return Envelope::from_error(&error),
    };
    let store = match document_store(&payload.credentials) {
        Ok(store) => store,
        Err(error) => return Envelope::from_error(&error),
    };
    update_cat(&store, payload.params).await
}

fn document_store(credentials: &StoreCredentials) -> Result<CloudantCatStore, DomainError> {
    let base_url = Url::parse(&credentials.store_url).map_err(|error| {
        DomainError::invalid_request(format!("invalid store URL: {error}"))
            .with_details(json!({ "field": "storeUrl", "code": "invalid_url" }))
    })?;
    CloudantCatStore::new(base_url, credentials.store_api_key.as_str()).map_err(|error| {
        DomainError::internal(format!("failed to construct store client: {error}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_decode_credentials_and_operation_fields_side_by_side() {
        let payload: Payload = serde_json::from_str(
            r#"{
                "storeUrl": "https://db.example.com",
                "storeApiKey": "k",
                "id": "c1",
                "name": "Tom",
                "color": "orange"
            }"#,
        )
        .expect("payload decodes");
        assert_eq!(payload.credentials.store_url, "https://db.example.com");
        assert_eq!(payload.params.id, "c1");
        assert_eq!(payload.params.color.as_deref(), Some("orange"));
    }

    #[tokio::test]
    async fn a_payload_missing_credentials_yields_a_400_envelope() {
        let envelope = run(r#"{ "id": "c1", "name": "Tom", "color": "orange" }"#).await;
        assert_eq!(envelope.status_code, 400);
    }
}
