//! The cat record and its validated building blocks.
//!
//! Identifiers and version tokens are assigned by the document store; this
//! module only guarantees they are well formed once they cross into the
//! domain. Caller-supplied fields travel as a [`CatDraft`] so an empty name
//! or colour can never reach a store operation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for store-assigned values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatValidationError {
    /// Value is empty after trimming whitespace.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    /// Value carries leading or trailing whitespace.
    #[error("{field} must not contain surrounding whitespace")]
    ContainsWhitespace { field: &'static str },
}

fn validate_opaque(field: &'static str, raw: &str) -> Result<(), CatValidationError> {
    if raw.trim().is_empty() {
        return Err(CatValidationError::Empty { field });
    }
    if raw.trim() != raw {
        return Err(CatValidationError::ContainsWhitespace { field });
    }
    Ok(())
}

/// Store-assigned record identifier.
///
/// # Examples
/// ```
/// use clowder::domain::CatId;
///
/// let id = CatId::new("c1").expect("valid identifier");
/// assert_eq!(id.as_str(), "c1");
/// assert!(CatId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CatId(String);

impl CatId {
    /// Construct an identifier after validating it is non-empty and trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, CatValidationError> {
        let raw = value.into();
        validate_opaque("cat identifier", &raw)?;
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CatId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for CatId {
    type Error = CatValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CatId> for String {
    fn from(value: CatId) -> Self {
        value.0
    }
}

/// Opaque optimistic-concurrency token, replaced by the store on every write.
///
/// The token is never interpreted; it is carried from a read into the next
/// conditional write so the store can reject stale updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionToken(String);

impl VersionToken {
    /// Construct a token after validating it is non-empty and trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, CatValidationError> {
        let raw = value.into();
        validate_opaque("version token", &raw)?;
        Ok(Self(raw))
    }

    /// Borrow the token as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for VersionToken {
    type Error = CatValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VersionToken> for String {
    fn from(value: VersionToken) -> Self {
        value.0
    }
}

/// A persisted cat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    /// Store-assigned identifier, immutable after creation.
    pub id: CatId,
    /// Current optimistic-concurrency token.
    pub version: VersionToken,
    /// Display name.
    pub name: String,
    /// Coat colour.
    pub color: String,
}

/// Validation errors for caller-supplied record fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatDraftValidationError {
    /// `name` is missing or blank.
    #[error("name must not be empty")]
    EmptyName,
    /// `color` is missing or blank.
    #[error("color must not be empty")]
    EmptyColor,
}

/// The two caller-supplied fields of a record, validated at construction.
///
/// # Examples
/// ```
/// use clowder::domain::{CatDraft, CatDraftValidationError};
///
/// let draft = CatDraft::new("Tom", "gray").expect("valid draft");
/// assert_eq!(draft.name(), "Tom");
/// assert_eq!(
///     CatDraft::new("", "black").unwrap_err(),
///     CatDraftValidationError::EmptyName,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatDraft {
    name: String,
    color: String,
}

impl CatDraft {
    /// Construct a draft, rejecting blank fields.
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<Self, CatDraftValidationError> {
        let name = name.into();
        let color = color.into();
        if name.trim().is_empty() {
            return Err(CatDraftValidationError::EmptyName);
        }
        if color.trim().is_empty() {
            return Err(CatDraftValidationError::EmptyColor);
        }
        Ok(Self { name, color })
    }

    /// Display name carried by the draft.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Coat colour carried by the draft.
    pub fn color(&self) -> &str {
        self.color.as_str()
    }
}

/// Identity assigned by the store when a record is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatIdentity {
    /// Generated identifier.
    pub id: CatId,
    /// Initial version token.
    pub version: VersionToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("c1")]
    #[case("f2af31c8a8f4")]
    fn cat_id_accepts_trimmed_values(#[case] raw: &str) {
        let id = CatId::new(raw).expect("identifier should validate");
        assert_eq!(id.as_str(), raw);
    }

    #[rstest]
    #[case("", CatValidationError::Empty { field: "cat identifier" })]
    #[case("   ", CatValidationError::Empty { field: "cat identifier" })]
    #[case(" c1", CatValidationError::ContainsWhitespace { field: "cat identifier" })]
    fn cat_id_rejects_blank_or_padded_values(#[case] raw: &str, #[case] expected: CatValidationError) {
        assert_eq!(CatId::new(raw).unwrap_err(), expected);
    }

    #[test]
    fn version_token_round_trips_through_serde() {
        let token = VersionToken::new("2-abc123").expect("token should validate");
        let json = serde_json::to_string(&token).expect("token serialises");
        let decoded: VersionToken = serde_json::from_str(&json).expect("token deserialises");
        assert_eq!(decoded, token);
    }

    #[test]
    fn version_token_deserialisation_rejects_empty_strings() {
        let error = serde_json::from_str::<VersionToken>("\"\"").unwrap_err();
        assert!(error.to_string().contains("must not be empty"));
    }

    #[rstest]
    #[case("", "black", CatDraftValidationError::EmptyName)]
    #[case("Tom", "  ", CatDraftValidationError::EmptyColor)]
    fn draft_rejects_blank_fields(
        #[case] name: &str,
        #[case] color: &str,
        #[case] expected: CatDraftValidationError,
    ) {
        assert_eq!(CatDraft::new(name, color).unwrap_err(), expected);
    }

    #[test]
    fn cat_serialises_with_camel_case_keys() {
        let cat = Cat {
            id: CatId::new("c1").expect("id"),
            version: VersionToken::new("1-a").expect("version"),
            name: "Tom".to_owned(),
            color: "gray".to_owned(),
        };
        let value = serde_json::to_value(&cat).expect("cat serialises");
        assert_eq!(value["id"], "c1");
        assert_eq!(value["version"], "1-a");
        assert_eq!(value["color"], "gray");
    }
}
