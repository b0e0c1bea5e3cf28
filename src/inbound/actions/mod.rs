//! The four action handlers.
//!
//! Each handler receives its typed parameter object plus the port it needs,
//! and produces a normalized result on every path: an [`Envelope`] for the
//! store-backed actions, a [`DeliveryStatus`] for the email action. Port
//! errors funnel through one mapping so every handler reports the same
//! failure class the same way.
//!
//! [`Envelope`]: crate::domain::Envelope
//! [`DeliveryStatus`]: crate::domain::DeliveryStatus

pub mod params;

mod create_cat;
mod fetch_cat;
mod notify;
mod update_cat;

pub use create_cat::create_cat;
pub use fetch_cat::fetch_cat;
pub use notify::notify;
pub use update_cat::update_cat;

use crate::domain::DomainError;
use crate::domain::ports::CatStoreError;

/// Map a store port error into the domain error vocabulary.
///
/// Applied at every store-backed handler boundary. Connection failures
/// surface as 503s, optimistic-concurrency losses as 409s, and everything
/// else as redacted 500s.
pub(crate) fn map_store_error(error: CatStoreError) -> DomainError {
    match error {
        CatStoreError::Connection { message } => {
            DomainError::service_unavailable(format!("cat store unavailable: {message}"))
        }
        CatStoreError::Query { message } => {
            DomainError::internal(format!("cat store query failed: {message}"))
        }
        CatStoreError::Conflict { message } => {
            DomainError::conflict("Cat could not be updated.")
                .with_details(serde_json::json!({ "code": "version_conflict", "reason": message }))
        }
        CatStoreError::Decode { message } => {
            DomainError::internal(format!("cat store payload invalid: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(CatStoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(CatStoreError::query("status 500"), ErrorCode::InternalError)]
    #[case(CatStoreError::conflict("stale token"), ErrorCode::Conflict)]
    #[case(CatStoreError::decode("bad json"), ErrorCode::InternalError)]
    fn store_errors_map_onto_stable_codes(
        #[case] error: CatStoreError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_store_error(error).code(), expected);
    }

    #[test]
    fn conflicts_keep_the_outward_update_failure_message() {
        let error = map_store_error(CatStoreError::conflict("expected 1-a, found 2-b"));
        assert_eq!(error.message(), "Cat could not be updated.");
    }
}
