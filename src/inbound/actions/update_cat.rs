//! Update action: locate, then conditional write.

use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::CatStore;
use crate::domain::{DomainError, Envelope};

use super::map_store_error;
use super::params::{UpdateCatParams, UpdateCatRequest};

/// Replace a record's `name` and `color` via a read-then-conditional-write.
///
/// The locate stage carries the stored version token into the write stage;
/// the store's optimistic-concurrency check rejects the write if the token
/// went stale in between. Failures keep their class: 404 when the record is
/// not located, 409 on a version conflict, 5xx otherwise.
pub async fn update_cat(store: &impl CatStore, params: UpdateCatParams) -> Envelope {
    let request = match UpdateCatRequest::try_from(params) {
        Ok(request) => request,
        Err(error) => return Envelope::from_error(&error),
    };
    match run(store, &request).await {
        Ok(envelope) => envelope,
        Err(error) => Envelope::from_error(&error),
    }
}

async fn run(store: &impl CatStore, request: &UpdateCatRequest) -> Result<Envelope, DomainError> {
    let Some(cat) = store
        .find_by_id(&request.id)
        .await
        .map_err(map_store_error)?
    else {
        return Err(DomainError::not_found(format!(
            "No cat found with id {}.",
            request.id
        )));
    };
    debug!(id = %cat.id, version = %cat.version, "cat located for update");

    let version = store
        .update(&cat.id, &cat.version, &request.draft)
        .await
        .map_err(map_store_error)?;
    info!(id = %cat.id, new_version = %version, "cat updated");
    Ok(Envelope::ok(json!({ "success": "Cat updated." })))
}
