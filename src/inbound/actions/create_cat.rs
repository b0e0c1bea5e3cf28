//! Create action.

use serde_json::json;
use tracing::info;

use crate::domain::ports::CatStore;
use crate::domain::{DomainError, Envelope};

use super::map_store_error;
use super::params::{CreateCatParams, CreateCatRequest};

/// Insert a new cat record from the two required fields.
///
/// Validation failures return a 400 envelope before any store call; the
/// insert is only reached with a fully validated draft. Success is a 201
/// carrying the generated identifier.
pub async fn create_cat(store: &impl CatStore, params: CreateCatParams) -> Envelope {
    // Unconditional early return: an invalid draft must never reach the
    // insert call.
    let request = match CreateCatRequest::try_from(params) {
        Ok(request) => request,
        Err(error) => return Envelope::from_error(&error),
    };
    match run(store, &request).await {
        Ok(envelope) => envelope,
        Err(error) => Envelope::from_error(&error),
    }
}

async fn run(store: &impl CatStore, request: &CreateCatRequest) -> Result<Envelope, DomainError> {
    let identity = store
        .insert(&request.draft)
        .await
        .map_err(map_store_error)?;
    info!(id = %identity.id, "cat created");
    Ok(Envelope::created(json!({ "id": identity.id })))
}
