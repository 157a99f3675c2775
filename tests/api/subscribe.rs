use serde_json::json;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{TestApp, SERVICE_ROLE_KEY};
use lead_intake::domain::contact::ContactScheme;
use lead_intake::routes::SubscribeResponse;
use lead_intake::startup::Application;

async fn mount_store(test_app: &TestApp, status: u16, expected_calls: u64) {
    Mock::given(path("/rest/v1/subscribers"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(&test_app.store_server)
        .await;
}

#[tokio::test]
async fn subscribe_returns_200_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;

    mount_store(&test_app, 201, 1).await;

    let response = test_app
        .post_subscribe(json!({ "contact": "@validuser", "specialty": "QA" }))
        .await;

    assert_eq!(200, response.status().as_u16());

    let body: SubscribeResponse = response.json().await.unwrap();
    assert!(body.ok);
    assert!(body.error.is_none());
}

#[tokio::test]
async fn subscribe_inserts_exactly_one_normalized_row() {
    let test_app = TestApp::spawn_app().await;

    mount_store(&test_app, 201, 1).await;

    test_app
        .post_subscribe(json!({ "contact": "@validuser", "specialty": "QA" }))
        .await;

    let rows = test_app.inserted_rows().await;

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0],
        json!({
            "contact": "@validuser",
            "specialty": "QA",
            "referrer": null,
            "utm_params": null,
            "user_agent": null,
            "locale": null,
            "tz_offset_min": null
        })
    );
}

#[tokio::test]
async fn subscribe_forwards_the_service_role_credentials() {
    let test_app = TestApp::spawn_app().await;
    let key = SERVICE_ROLE_KEY;

    Mock::given(path("/rest/v1/subscribers"))
        .and(method("POST"))
        .and(header("apikey", key))
        .and(header("Authorization", format!("Bearer {}", key).as_str()))
        .and(header("Prefer", "return=minimal"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&test_app.store_server)
        .await;

    let response = test_app
        .post_subscribe(json!({ "contact": "https://t.me/validname" }))
        .await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn subscribe_normalizes_tracking_metadata() {
    let test_app = TestApp::spawn_app().await;

    mount_store(&test_app, 201, 1).await;

    test_app
        .post_subscribe(json!({
            "contact": "  @validuser  ",
            "specialty": "  Backend Dev  ",
            "referrer": "direct",
            "utm": "?utm_source=x&utm_medium=y",
            "userAgent": "Mozilla/5.0",
            "locale": "kz",
            "tzOffsetMin": "-360"
        }))
        .await;

    let rows = test_app.inserted_rows().await;

    assert_eq!(rows[0]["contact"], json!("@validuser"));
    assert_eq!(rows[0]["specialty"], json!("Backend Dev"));
    assert_eq!(rows[0]["referrer"], json!("direct"));
    assert_eq!(
        rows[0]["utm_params"],
        json!({ "utm_source": "x", "utm_medium": "y" })
    );
    assert_eq!(rows[0]["user_agent"], json!("Mozilla/5.0"));
    assert_eq!(rows[0]["locale"], json!("kz"));
    assert_eq!(rows[0]["tz_offset_min"], json!(-360));
}

#[tokio::test]
async fn subscribe_returns_400_when_contact_is_invalid() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&test_app.store_server)
        .await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases = vec![
        (json!({ "contact": "short" }), "contact without @"),
        (json!({ "contact": "@ab" }), "handle too short"),
        (json!({ "contact": "https://facebook.com/x" }), "domain not allowed"),
        (json!({ "specialty": "QA" }), "missing contact"),
        (json!({ "contact": 12345 }), "contact is not a string"),
        (json!({}), "empty object"),
        (json!([]), "not an object"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_subscribe(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );

        let body: SubscribeResponse = response.json().await.unwrap();
        assert!(!body.ok);
        assert_eq!(
            body.error.as_deref(),
            Some("Invalid contact (expect @handle or link)")
        );
    }
}

#[tokio::test]
async fn subscribe_returns_400_when_json_is_malformed() {
    let test_app = TestApp::spawn_app().await;

    mount_store(&test_app, 201, 0).await;

    let test_cases = vec![
        ("{", "unterminated object"),
        ("", "empty body"),
        ("contact=@validuser", "form encoded body"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_subscribe_raw(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );

        let body: SubscribeResponse = response.json().await.unwrap();
        assert_eq!(body.error.as_deref(), Some("Invalid JSON"));
    }
}

#[tokio::test]
async fn subscribe_returns_500_when_the_store_rejects_the_row() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(path("/rest/v1/subscribers"))
        .respond_with(
            ResponseTemplate::new(409).set_body_string("duplicate key value violates constraint"),
        )
        .expect(1)
        .mount(&test_app.store_server)
        .await;

    let response = test_app.post_subscribe(json!({ "contact": "@validuser" })).await;

    assert_eq!(500, response.status().as_u16());

    let body = response.text().await.unwrap();
    assert_eq!(body, r#"{"ok":false,"error":"DB error"}"#);
}

#[tokio::test]
async fn subscribe_returns_500_when_the_store_is_unreachable() {
    let test_app = TestApp::spawn_app().await;

    // Nothing listens on port 1, so the insert fails before any response arrives
    let mut config = test_app.config.clone();
    config.set_store_base_url(String::from("http://127.0.0.1:1"));
    config.store.timeout_milliseconds = 500;

    let application = Application::build(config)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.get_port());

    tokio::spawn(application.run_until_stop());

    let response = test_app
        .api_client
        .post(format!("{}/api/subscribe", address))
        .json(&json!({ "contact": "@validuser" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(500, response.status().as_u16());

    let body: SubscribeResponse = response.json().await.unwrap();
    assert_eq!(body.error.as_deref(), Some("Server error"));
}

#[tokio::test]
async fn subscribe_rejects_other_methods_with_405() {
    let test_app = TestApp::spawn_app().await;

    mount_store(&test_app, 201, 0).await;

    for method in [reqwest::Method::GET, reqwest::Method::PUT, reqwest::Method::DELETE] {
        let response = test_app
            .api_client
            .request(method.clone(), test_app.subscribe_url())
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(
            405,
            response.status().as_u16(),
            "The API did not fail with 405 status for {}",
            method
        );
        assert_eq!(response.headers().get("allow").unwrap(), "POST");

        let body: SubscribeResponse = response.json().await.unwrap();
        assert_eq!(body.error.as_deref(), Some("Method not allowed"));
    }
}

#[tokio::test]
async fn email_scheme_validates_and_stores_emails() {
    let test_app = TestApp::spawn_app_with_scheme(ContactScheme::Email).await;

    mount_store(&test_app, 201, 1).await;

    let rejected = test_app.post_subscribe(json!({ "email": "user@example" })).await;
    let accepted = test_app
        .post_subscribe(json!({ "email": "user@example.com", "tzOffsetMin": -180 }))
        .await;

    assert_eq!(400, rejected.status().as_u16());
    let body: SubscribeResponse = rejected.json().await.unwrap();
    assert_eq!(body.error.as_deref(), Some("Invalid email"));

    assert_eq!(200, accepted.status().as_u16());

    let rows = test_app.inserted_rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["email"], json!("user@example.com"));
    assert_eq!(rows[0]["tz_offset_min"], json!(-180));
    assert!(rows[0].get("contact").is_none());
}
