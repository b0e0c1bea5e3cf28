//! Reqwest-backed document-store adapter.
//!
//! Speaks the CouchDB-style HTTP API: `_find` selector queries for reads, a
//! collection POST for inserts, and a `_rev`-carrying PUT for conditional
//! writes. The store enforces optimistic concurrency; this adapter only maps
//! its verdicts into port errors.

mod dto;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::domain::ports::{CatStore, CatStoreError};
use crate::domain::{Cat, CatDraft, CatId, CatIdentity, VersionToken};
use crate::outbound::body_preview;

use dto::{FindResponseDto, NewDocumentDto, ReplaceDocumentDto, WriteAckDto};

const DEFAULT_DATABASE: &str = "cats";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Document-store adapter bound to one endpoint and one database.
#[derive(Debug)]
pub struct CloudantCatStore {
    client: Client,
    base_url: Url,
    database: String,
    api_key: String,
}

impl CloudantCatStore {
    /// Build an adapter for the `cats` database with the default request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            database: DEFAULT_DATABASE.to_owned(),
            api_key: api_key.into(),
        })
    }

    fn collection_url(&self, suffix: Option<&str>) -> Result<Url, CatStoreError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| CatStoreError::query("store URL cannot be a base"))?;
            segments.pop_if_empty().push(&self.database);
            if let Some(segment) = suffix {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        request: reqwest::RequestBuilder,
        body: &B,
    ) -> Result<Vec<u8>, CatStoreError> {
        let response = request
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl CatStore for CloudantCatStore {
    async fn find_by_id(&self, id: &CatId) -> Result<Option<Cat>, CatStoreError> {
        let url = self.collection_url(Some("_find"))?;
        debug!(id = %id, "querying store by identifier");
        let body = self
            .send_json(
                self.client.post(url),
                &json!({ "selector": { "_id": id }, "limit": 1 }),
            )
            .await?;

        let decoded: FindResponseDto = serde_json::from_slice(&body)
            .map_err(|error| CatStoreError::decode(format!("invalid find payload: {error}")))?;
        decoded
            .docs
            .into_iter()
            .next()
            .map(|doc| doc.into_domain().map_err(CatStoreError::decode))
            .transpose()
    }

    async fn insert(&self, draft: &CatDraft) -> Result<CatIdentity, CatStoreError> {
        let url = self.collection_url(None)?;
        let body = self
            .send_json(
                self.client.post(url),
                &NewDocumentDto {
                    name: draft.name(),
                    color: draft.color(),
                },
            )
            .await?;

        let decoded: WriteAckDto = serde_json::from_slice(&body)
            .map_err(|error| CatStoreError::decode(format!("invalid insert ack: {error}")))?;
        decoded.into_identity().map_err(CatStoreError::decode)
    }

    async fn update(
        &self,
        id: &CatId,
        expected_version: &VersionToken,
        draft: &CatDraft,
    ) -> Result<VersionToken, CatStoreError> {
        let url = self.collection_url(Some(id.as_str()))?;
        let body = self
            .send_json(
                self.client.put(url),
                &ReplaceDocumentDto {
                    rev: expected_version.as_str(),
                    name: draft.name(),
                    color: draft.color(),
                },
            )
            .await?;

        let decoded: WriteAckDto = serde_json::from_slice(&body)
            .map_err(|error| CatStoreError::decode(format!("invalid write ack: {error}")))?;
        let identity = decoded.into_identity().map_err(CatStoreError::decode)?;
        Ok(identity.version)
    }
}

fn map_transport_error(error: reqwest::Error) -> CatStoreError {
    if error.is_timeout() || error.is_connect() {
        CatStoreError::connection(error.to_string())
    } else {
        CatStoreError::query(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CatStoreError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        // A rejected conditional write; the record moved on since the read.
        StatusCode::CONFLICT => CatStoreError::conflict(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CatStoreError::connection(message)
        }
        _ => CatStoreError::query(message),
    }
}
