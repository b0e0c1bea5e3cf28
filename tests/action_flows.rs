//! End-to-end action flows against the in-memory store fixture.

use async_trait::async_trait;

use clowder::domain::ports::{CatStore, FixtureMailer, InMemoryCatStore, Mailer, MailerError};
use clowder::domain::{Cat, CatId, OutboundEmail, VersionToken};
use clowder::inbound::actions::params::{
    CreateCatParams, FetchCatParams, NotifyParams, UpdateCatParams,
};
use clowder::inbound::actions::{create_cat, fetch_cat, notify, update_cat};

fn seeded_store() -> InMemoryCatStore {
    let store = InMemoryCatStore::default();
    store.seed(Cat {
        id: CatId::new("c1").expect("id"),
        version: VersionToken::new("v1").expect("version"),
        name: "Tom".to_owned(),
        color: "gray".to_owned(),
    });
    store
}

fn update_params(id: &str, name: &str, color: &str) -> UpdateCatParams {
    UpdateCatParams {
        id: id.to_owned(),
        name: Some(name.to_owned()),
        color: Some(color.to_owned()),
    }
}

#[tokio::test]
async fn fetch_returns_the_stored_record() {
    let store = seeded_store();
    let envelope = fetch_cat(&store, FetchCatParams { id: "c1".to_owned() }).await;

    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.body["id"], "c1");
    assert_eq!(envelope.body["name"], "Tom");
    assert_eq!(envelope.body["color"], "gray");
}

#[tokio::test]
async fn fetch_of_an_absent_identifier_is_a_404_with_an_error_body() {
    let store = seeded_store();
    let envelope = fetch_cat(&store, FetchCatParams { id: "c2".to_owned() }).await;

    assert_eq!(envelope.status_code, 404);
    assert_eq!(envelope.body["message"], "Not found.");
}

#[tokio::test]
async fn create_adds_exactly_one_record_matching_the_returned_identifier() {
    let store = InMemoryCatStore::default();
    let envelope = create_cat(
        &store,
        CreateCatParams {
            name: Some("Jerry".to_owned()),
            color: Some("brown".to_owned()),
        },
    )
    .await;

    assert_eq!(envelope.status_code, 201);
    assert_eq!(store.len(), 1);

    let id = CatId::new(envelope.body["id"].as_str().expect("identifier is a string"))
        .expect("identifier validates");
    let stored = store
        .find_by_id(&id)
        .await
        .expect("find succeeds")
        .expect("record present");
    assert_eq!(stored.name, "Jerry");
    assert_eq!(stored.color, "brown");
}

#[tokio::test]
async fn create_with_a_blank_name_leaves_the_store_unchanged() {
    let store = InMemoryCatStore::default();
    let envelope = create_cat(
        &store,
        CreateCatParams {
            name: Some(String::new()),
            color: Some("black".to_owned()),
        },
    )
    .await;

    assert_eq!(envelope.status_code, 400);
    assert!(store.is_empty());
}

#[tokio::test]
async fn update_replaces_the_fields_and_rotates_the_version_token() {
    let store = seeded_store();
    let envelope = update_cat(&store, update_params("c1", "Tom", "orange")).await;

    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.body["success"], "Cat updated.");

    let stored = store
        .find_by_id(&CatId::new("c1").expect("id"))
        .await
        .expect("find succeeds")
        .expect("record present");
    assert_eq!(stored.name, "Tom");
    assert_eq!(stored.color, "orange");
    assert_ne!(stored.version.as_str(), "v1");
}

#[tokio::test]
async fn update_of_an_absent_identifier_modifies_nothing_and_signals_failure() {
    let store = seeded_store();
    let envelope = update_cat(&store, update_params("c2", "Tom", "orange")).await;

    assert_eq!(envelope.status_code, 404);
    let untouched = store
        .find_by_id(&CatId::new("c1").expect("id"))
        .await
        .expect("find succeeds")
        .expect("record present");
    assert_eq!(untouched.color, "gray");
    assert_eq!(untouched.version.as_str(), "v1");
}

fn notify_params(to_email: &str) -> NotifyParams {
    NotifyParams {
        to_email: to_email.to_owned(),
        sender: None,
        subject: None,
        text_body: None,
        html_body: None,
    }
}

#[tokio::test]
async fn notify_reports_ok_when_the_delivery_api_accepts() {
    let status = notify(&FixtureMailer, notify_params("a@b.com")).await;
    assert!(status.is_ok());
    assert_eq!(status.status(), "OK");
}

struct RejectingMailer;

#[async_trait]
impl Mailer for RejectingMailer {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), MailerError> {
        Err(MailerError::rejected("invalid api key"))
    }
}

#[tokio::test]
async fn notify_reports_the_error_description_when_delivery_fails() {
    let status = notify(&RejectingMailer, notify_params("a@b.com")).await;
    assert!(!status.is_ok());
    assert_eq!(status.status(), "mail delivery rejected: invalid api key");
}
