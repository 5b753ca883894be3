use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use memberhub_gateway::{build_router, GatewayState, TRANSACTION_ID_HEADER};
use memberhub_members::memory::{
    FixedFact, InMemoryMemberStore, RecordingLegacyStore, RecordingPublisher,
};
use memberhub_members::model::{AUTHENTICATION_FAILED, REGISTERED_USER};
use memberhub_members::{
    AuthenticationService, LoginService, Member, MemberMetrics, MemberService, Simulation,
};
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: InMemoryMemberStore,
    legacy: RecordingLegacyStore,
    publisher: RecordingPublisher,
}

impl TestApp {
    fn new(failure_rate: f64) -> Self {
        Self::with_store(failure_rate, InMemoryMemberStore::new())
    }

    fn with_store(failure_rate: f64, store: InMemoryMemberStore) -> Self {
        let legacy = RecordingLegacyStore::new();
        let publisher = RecordingPublisher::new();
        let simulation = Arc::new(Simulation::new(failure_rate, 1..=1000, Some(42)));
        let metrics = MemberMetrics::from_global();

        let state = GatewayState::new(
            Arc::new(LoginService::new(simulation.clone(), metrics.clone())),
            Arc::new(AuthenticationService::new(
                simulation.clone(),
                Arc::new(publisher.clone()),
                metrics.clone(),
            )),
            Arc::new(MemberService::new(
                Arc::new(store.clone()),
                Arc::new(legacy.clone()),
                Arc::new(publisher.clone()),
                Arc::new(FixedFact("Cats have five toes on their front paws.".into())),
                simulation,
                metrics,
            )),
        );

        Self {
            router: build_router(state),
            store,
            legacy,
            publisher,
        }
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json_body) = body {
            let bytes = serde_json::to_vec(&json_body).expect("serialize request body");
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(bytes)
        } else {
            Body::empty()
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("router responds");

        let status = response.status();
        let transaction_id = response
            .headers()
            .get(TRANSACTION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };

        TestResponse {
            status,
            transaction_id,
            body,
        }
    }
}

struct TestResponse {
    status: StatusCode,
    transaction_id: Option<String>,
    body: Value,
}

#[tokio::test]
async fn login_issues_id_in_range() {
    let app = TestApp::new(0.0);

    let response = app.request(Method::POST, "/login", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.transaction_id.is_some());
    let id: u64 = response.body["userId"]
        .as_str()
        .expect("userId string")
        .parse()
        .expect("numeric id");
    assert!((1..=1000).contains(&id));
}

#[tokio::test]
async fn authenticate_succeeds_at_zero_failure_rate() {
    let app = TestApp::new(0.0);

    let response = app
        .request(Method::POST, "/authenticate", Some(json!({"userId": "17"})))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"userId": "17", "authenticated": true}));
    assert!(app.publisher.events().await.is_empty());
}

#[tokio::test]
async fn authenticate_rejection_is_401_with_event() {
    let app = TestApp::new(1.0);

    let response = app
        .request(Method::POST, "/authenticate", Some(json!({"userId": 5})))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");

    let events = app.publisher.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, AUTHENTICATION_FAILED);
    assert_eq!(events[0].user, json!({"userId": "5"}));
    assert_eq!(Some(events[0].id.as_str()), response.transaction_id.as_deref());
}

#[tokio::test]
async fn missing_user_id_is_bad_request() {
    let app = TestApp::new(0.0);

    for uri in ["/authenticate", "/members"] {
        let empty = app.request(Method::POST, uri, None).await;
        assert_eq!(empty.status, StatusCode::BAD_REQUEST, "{uri} without body");

        let blank = app
            .request(Method::POST, uri, Some(json!({"userId": ""})))
            .await;
        assert_eq!(blank.status, StatusCode::BAD_REQUEST, "{uri} with blank id");
        assert_eq!(blank.body["error"], "BAD REQUEST");

        let zero = app
            .request(Method::POST, uri, Some(json!({"userId": 0})))
            .await;
        assert_eq!(zero.status, StatusCode::BAD_REQUEST, "{uri} with zero id");
    }
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn unknown_member_is_registered() {
    let app = TestApp::new(0.0);

    let response = app
        .request(Method::POST, "/members", Some(json!({"userId": "321"})))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["userId"], "321");
    assert!(!response.body["firstName"].as_str().unwrap().is_empty());
    assert!(!response.body["lastName"].as_str().unwrap().is_empty());
    assert_eq!(
        response.body["catFact"],
        "Cats have five toes on their front paws."
    );

    assert_eq!(app.store.len().await, 1);
    assert_eq!(app.legacy.records().await.len(), 1);
    let events = app.publisher.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, REGISTERED_USER);
}

#[tokio::test]
async fn existing_member_is_returned_unchanged() {
    let store = InMemoryMemberStore::new();
    store
        .seed(Member {
            user_id: "8".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
        })
        .await;
    let app = TestApp::with_store(0.0, store);

    let response = app
        .request(Method::POST, "/members", Some(json!({"userId": "8"})))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["firstName"], "Grace");
    assert_eq!(response.body["lastName"], "Hopper");
    assert!(app.legacy.records().await.is_empty());
    assert!(app.publisher.events().await.is_empty());
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let app = TestApp::with_store(0.0, InMemoryMemberStore::failing());

    let response = app
        .request(Method::POST, "/members", Some(json!({"userId": "1"})))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "INTERNAL SERVER ERROR");
    assert!(response.body["details"].is_string());
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let app = TestApp::new(0.0);

    let health = app.request(Method::GET, "/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let docs = app
        .request(Method::GET, "/api-docs/openapi.json", None)
        .await;
    assert_eq!(docs.status, StatusCode::OK);
    assert!(docs.body["paths"]["/members"].is_object());
}
