//! `cat-post` action entry point: insert a new cat record.

use std::io;

use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use tokio::runtime::Builder;
use url::Url;

use clowder::domain::{DomainError, Envelope};
use clowder::inbound::actions::create_cat;
use clowder::inbound::actions::params::{CreateCatParams, StoreCredentials};
use clowder::inbound::invocation::{decode_params, emit, init_tracing, read_payload};
use clowder::outbound::cloudant::CloudantCatStore;

/// `cat-post` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cat-post",
    about = "Insert a new cat record from name and color",
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
    params: CreateCatParams,
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
    create_cat(&store, payload.params).await
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
