//! Port for the document store holding cat records.
//!
//! The [`CatStore`] trait is the only seam through which handlers reach the
//! store, so a test double can stand in for the remote database. The store
//! owns identifier and version-token assignment and enforces optimistic
//! concurrency on conditional writes.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Cat, CatDraft, CatId, CatIdentity, VersionToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document-store adapters.
    pub enum CatStoreError {
        /// The store endpoint could not be reached.
        Connection { message: String } =>
            "cat store connection failed: {message}",
        /// The store rejected or failed the operation.
        Query { message: String } =>
            "cat store query failed: {message}",
        /// A conditional write lost the optimistic-concurrency race.
        Conflict { message: String } =>
            "cat store version conflict: {message}",
        /// The store returned a payload that could not be decoded.
        Decode { message: String } =>
            "cat store payload could not be decoded: {message}",
    }
}

/// Port for cat record storage and retrieval.
///
/// # Version Semantics
///
/// - [`CatStore::insert`] assigns both the identifier and the initial
///   version token.
/// - [`CatStore::update`] only succeeds when `expected_version` matches the
///   stored token; a stale token yields [`CatStoreError::Conflict`]. The new
///   token is returned so callers can observe that it changed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatStore: Send + Sync {
    /// Fetch a record by its identifier.
    ///
    /// Returns `None` when no record matches; absence is not an error at
    /// this boundary.
    async fn find_by_id(&self, id: &CatId) -> Result<Option<Cat>, CatStoreError>;

    /// Insert a new record, returning the assigned identity.
    async fn insert(&self, draft: &CatDraft) -> Result<CatIdentity, CatStoreError>;

    /// Conditionally overwrite a record, returning the new version token.
    async fn update(
        &self,
        id: &CatId,
        expected_version: &VersionToken,
        draft: &CatDraft,
    ) -> Result<VersionToken, CatStoreError>;
}

/// In-memory store for tests and local runs.
///
/// Mints uuid identifiers, bumps a generation counter inside the version
/// token on every write, and enforces the same conflict semantics the remote
/// store does.
///
/// # Examples
/// ```
/// use clowder::domain::ports::{CatStore, InMemoryCatStore};
/// use clowder::domain::CatDraft;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = InMemoryCatStore::default();
/// let draft = CatDraft::new("Tom", "gray").expect("valid draft");
/// let identity = store.insert(&draft).await.expect("insert succeeds");
/// let cat = store.find_by_id(&identity.id).await.expect("find succeeds");
/// assert_eq!(cat.expect("record present").name, "Tom");
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCatStore {
    cats: Mutex<HashMap<CatId, Cat>>,
}

fn next_version(current: Option<&VersionToken>) -> Result<VersionToken, CatStoreError> {
    let generation = current
        .and_then(|token| token.as_str().split('-').next())
        .and_then(|prefix| prefix.parse::<u64>().ok())
        .unwrap_or(0)
        + 1;
    VersionToken::new(format!("{generation}-{}", Uuid::new_v4().simple()))
        .map_err(|error| CatStoreError::query(format!("generated version invalid: {error}")))
}

impl InMemoryCatStore {
    /// Seed a record, replacing any existing one with the same identifier.
    pub fn seed(&self, cat: Cat) {
        self.lock().insert(cat.id.clone(), cat);
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CatId, Cat>> {
        self.cats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CatStore for InMemoryCatStore {
    async fn find_by_id(&self, id: &CatId) -> Result<Option<Cat>, CatStoreError> {
        Ok(self.lock().get(id).cloned())
    }

    async fn insert(&self, draft: &CatDraft) -> Result<CatIdentity, CatStoreError> {
        let id = CatId::new(Uuid::new_v4().simple().to_string())
            .map_err(|error| CatStoreError::query(format!("generated identifier invalid: {error}")))?;
        let version = next_version(None)?;
        let cat = Cat {
            id: id.clone(),
            version: version.clone(),
            name: draft.name().to_owned(),
            color: draft.color().to_owned(),
        };
        self.lock().insert(id.clone(), cat);
        Ok(CatIdentity { id, version })
    }

    async fn update(
        &self,
        id: &CatId,
        expected_version: &VersionToken,
        draft: &CatDraft,
    ) -> Result<VersionToken, CatStoreError> {
        let mut cats = self.lock();
        let Some(existing) = cats.get(id) else {
            return Err(CatStoreError::conflict(format!(
                "cat {id} no longer exists"
            )));
        };
        if existing.version != *expected_version {
            return Err(CatStoreError::conflict(format!(
                "expected version {expected_version}, found {}",
                existing.version
            )));
        }
        let version = next_version(Some(expected_version))?;
        cats.insert(
            id.clone(),
            Cat {
                id: id.clone(),
                version: version.clone(),
                name: draft.name().to_owned(),
                color: draft.color().to_owned(),
            },
        );
        Ok(version)
    }
}
