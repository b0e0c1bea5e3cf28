//! Wire representations of the document store's JSON payloads.

use serde::{Deserialize, Serialize};

use crate::domain::{Cat, CatId, CatIdentity, VersionToken};

/// Response of a `_find` selector query.
#[derive(Debug, Deserialize)]
pub(crate) struct FindResponseDto {
    #[serde(default)]
    pub docs: Vec<CatDocumentDto>,
}

/// One stored document.
#[derive(Debug, Deserialize)]
pub(crate) struct CatDocumentDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_rev")]
    rev: String,
    name: String,
    color: String,
}

impl CatDocumentDto {
    /// Convert the wire document into the domain record.
    pub fn into_domain(self) -> Result<Cat, String> {
        let id = CatId::new(self.id).map_err(|error| error.to_string())?;
        let version = VersionToken::new(self.rev).map_err(|error| error.to_string())?;
        Ok(Cat {
            id,
            version,
            name: self.name,
            color: self.color,
        })
    }
}

/// Acknowledgment of an insert or conditional write.
#[derive(Debug, Deserialize)]
pub(crate) struct WriteAckDto {
    pub id: String,
    pub rev: String,
}

impl WriteAckDto {
    /// Convert the acknowledgment into the assigned identity.
    pub fn into_identity(self) -> Result<CatIdentity, String> {
        let id = CatId::new(self.id).map_err(|error| error.to_string())?;
        let version = VersionToken::new(self.rev).map_err(|error| error.to_string())?;
        Ok(CatIdentity { id, version })
    }
}

/// Body of an insert request.
#[derive(Debug, Serialize)]
pub(crate) struct NewDocumentDto<'a> {
    pub name: &'a str,
    pub color: &'a str,
}

/// Body of a conditional write, carrying the expected version token.
#[derive(Debug, Serialize)]
pub(crate) struct ReplaceDocumentDto<'a> {
    #[serde(rename = "_rev")]
    pub rev: &'a str,
    pub name: &'a str,
    pub color: &'a str,
}
