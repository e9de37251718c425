use std::sync::Arc;

use contactbook_api::app::services::AppServices;
use contactbook_contacts::{Contact, NewContact};
use contactbook_infra::contact_store::{ContactStore, InMemoryContactStore, StoreError};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(services: AppServices) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = contactbook_api::app::build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn in_memory() -> Self {
        Self::spawn(AppServices::in_memory()).await
    }

    fn contacts_url(&self) -> String {
        format!("{}/api/v1/contacts", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Store whose every operation fails as if the database were down.
struct UnavailableStore;

#[async_trait::async_trait]
impl ContactStore for UnavailableStore {
    async fn save(&self, _contact: NewContact) -> Result<Contact, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<Contact>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::in_memory().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_contact_returns_created_with_body() {
    let srv = TestServer::in_memory().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.contacts_url())
        .json(&json!({ "name": "Ann", "email": "ann@x.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["email"], "ann@x.com");
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn saved_contact_is_found_by_email() {
    let srv = TestServer::in_memory().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.contacts_url())
        .json(&json!({ "name": "Ann", "email": "ann@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();

    let res = client
        .get(format!("{}/ann@x.com", srv.contacts_url()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let found: serde_json::Value = res.json().await.unwrap();
    assert_eq!(found, created);
    assert_eq!(found["name"], "Ann");
    assert_eq!(found["email"], "ann@x.com");
}

#[tokio::test]
async fn unknown_email_is_not_found() {
    let srv = TestServer::in_memory().await;

    let res = reqwest::get(format!("{}/nobody@x.com", srv.contacts_url()))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Contact not found by email");
}

#[tokio::test]
async fn create_with_empty_or_missing_fields_is_rejected_without_persisting() {
    let store = Arc::new(InMemoryContactStore::new());
    let srv = TestServer::spawn(AppServices::with_store(store.clone())).await;
    let client = reqwest::Client::new();

    let bodies = [
        json!({ "name": "", "email": "ann@x.com" }),
        json!({ "name": "Ann", "email": "" }),
        json!({ "name": "   ", "email": "ann@x.com" }),
        json!({ "email": "ann@x.com" }),
        json!({ "name": "Ann" }),
        json!({}),
    ];

    for body in bodies {
        let res = client.post(srv.contacts_url()).json(&body).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(res.text().await.unwrap(), "Request has to be valid");
    }

    assert!(store.is_empty());
}

#[tokio::test]
async fn create_with_malformed_json_is_rejected() {
    let store = Arc::new(InMemoryContactStore::new());
    let srv = TestServer::spawn(AppServices::with_store(store.clone())).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.contacts_url())
        .header("content-type", "application/json")
        .body("{\"name\": \"Ann\", ")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn lookup_with_empty_email_is_bad_request() {
    let srv = TestServer::in_memory().await;
    let client = reqwest::Client::new();

    for url in [
        srv.contacts_url(),
        format!("{}/", srv.contacts_url()),
        format!("{}/%20%20", srv.contacts_url()),
    ] {
        let res = client.get(&url).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "url: {url}");
        assert_eq!(res.text().await.unwrap(), "Email has to be valid");
    }
}

#[tokio::test]
async fn duplicate_emails_resolve_to_first_saved() {
    let srv = TestServer::in_memory().await;
    let client = reqwest::Client::new();

    for name in ["Ann", "Annie"] {
        let res = client
            .post(srv.contacts_url())
            .json(&json!({ "name": name, "email": "shared@x.com" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!("{}/shared@x.com", srv.contacts_url()))
        .send()
        .await
        .unwrap();
    let found: serde_json::Value = res.json().await.unwrap();
    assert_eq!(found["name"], "Ann");
}

#[tokio::test]
async fn store_failures_surface_as_server_errors() {
    let srv = TestServer::spawn(AppServices::with_store(Arc::new(UnavailableStore))).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.contacts_url())
        .json(&json!({ "name": "Ann", "email": "ann@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let res = client
        .get(format!("{}/ann@x.com", srv.contacts_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text().await.unwrap(), "Internal server error");
}
