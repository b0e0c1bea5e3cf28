//! Fetch-by-id action.

use tracing::{debug, info};

use crate::domain::ports::CatStore;
use crate::domain::{DomainError, Envelope};

use super::map_store_error;
use super::params::{FetchCatParams, FetchCatRequest};

/// Fetch a cat record by identifier.
///
/// - Found → 200 with the record as the body.
/// - Not found → 404 with a structured error body.
/// - Invalid identifier → 400, no store call.
/// - Store failure → 5xx envelope; a raw error never escapes.
pub async fn fetch_cat(store: &impl CatStore, params: FetchCatParams) -> Envelope {
    let request = match FetchCatRequest::try_from(params) {
        Ok(request) => request,
        Err(error) => return Envelope::from_error(&error),
    };
    match run(store, &request).await {
        Ok(envelope) => envelope,
        Err(error) => Envelope::from_error(&error),
    }
}

async fn run(store: &impl CatStore, request: &FetchCatRequest) -> Result<Envelope, DomainError> {
    debug!(id = %request.id, "fetching cat");
    let Some(cat) = store
        .find_by_id(&request.id)
        .await
        .map_err(map_store_error)?
    else {
        return Err(DomainError::not_found("Not found."));
    };
    info!(id = %cat.id, "cat located");
    let body = serde_json::to_value(&cat)
        .map_err(|error| DomainError::internal(format!("failed to serialise record: {error}")))?;
    Ok(Envelope::ok(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{CatStoreError, MockCatStore};
    use crate::domain::{Cat, CatId, VersionToken};

    fn stored_cat() -> Cat {
        Cat {
            id: CatId::new("c1").expect("id"),
            version: VersionToken::new("1-a").expect("version"),
            name: "Tom".to_owned(),
            color: "gray".to_owned(),
        }
    }

    fn params(id: &str) -> FetchCatParams {
        FetchCatParams { id: id.to_owned() }
    }

    #[tokio::test]
    async fn present_records_come_back_as_200_with_the_record_body() {
        let cat = stored_cat();
        let expected = serde_json::to_value(&cat).expect("record serialises");
        let mut store = MockCatStore::new();
        store
            .expect_find_by_id()
            .withf(|id| id.as_str() == "c1")
            .times(1)
            .return_once(move |_| Ok(Some(cat)));

        let envelope = fetch_cat(&store, params("c1")).await;
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.body, expected);
    }

    #[tokio::test]
    async fn absent_records_come_back_as_404_with_an_error_body() {
        let mut store = MockCatStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));

        let envelope = fetch_cat(&store, params("ghost")).await;
        assert_eq!(envelope.status_code, 404);
        assert_eq!(envelope.body["message"], "Not found.");
    }

    #[tokio::test]
    async fn blank_identifiers_are_rejected_before_any_store_call() {
        let mut store = MockCatStore::new();
        store.expect_find_by_id().times(0);

        let envelope = fetch_cat(&store, params("   ")).await;
        assert_eq!(envelope.status_code, 400);
    }

    #[tokio::test]
    async fn store_failures_become_structured_envelopes() {
        let mut store = MockCatStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Err(CatStoreError::connection("refused")));

        let envelope = fetch_cat(&store, params("c1")).await;
        assert_eq!(envelope.status_code, 503);
        assert!(envelope.body["message"].is_string());
    }
}
