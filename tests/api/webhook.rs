use reqwest::Response;
use serde_json::json;
use wiremock::{
    matchers::{header, header_exists, method, path},
    Mock, ResponseTemplate,
};

use crate::helper::spawn_app;

async fn post_webhook(address: &str, body: &serde_json::Value) -> Response {
    let client = reqwest::Client::new();
    client
        .post(format!("{address}/webhook/klaviyo"))
        .json(body)
        .send()
        .await
        .expect("failed to execute request.")
}

#[tokio::test]
async fn valid_submission_is_upserted() {
    let (address, klaviyo_server) = spawn_app().await;

    Mock::given(path("/api/profiles/"))
        .and(method("POST"))
        .and(header_exists("Authorization"))
        .and(header("revision", "2024-10-15"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "01ABC" } })),
        )
        .expect(1)
        .mount(&klaviyo_server)
        .await;

    let body = json!({
        "form": "wf-form-Sweepstakes-2025",
        "Email": "a@b.com",
        "Name": "Jane Doe",
        "Phone": "555-0100",
        "Zip-Code": "94107",
    });
    let res = post_webhook(&address, &body).await;
    assert_eq!(200, res.status().as_u16());
    let reply: serde_json::Value = res.json().await.unwrap();
    assert_eq!(json!(true), reply["success"]);
    assert_eq!("Profile updated in Klaviyo", reply["message"]);

    let request = &klaviyo_server.received_requests().await.unwrap()[0];
    let payload: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!("profile", payload["data"]["type"]);
    let attributes = &payload["data"]["attributes"];
    assert_eq!("a@b.com", attributes["email"]);
    assert_eq!("Jane", attributes["first_name"]);
    assert_eq!("Doe", attributes["last_name"]);
    assert_eq!("555-0100", attributes["phone_number"]);
    assert_eq!("94107", attributes["location"]["zip"]);
    assert_eq!(json!(true), attributes["properties"]["sweepstakes-2025"]);
}

#[tokio::test]
async fn submission_matched_by_display_name_is_upserted() {
    let (address, klaviyo_server) = spawn_app().await;

    Mock::given(path("/api/profiles/"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&klaviyo_server)
        .await;

    let body = json!({ "name": "Sweepstakes 2025", "Email": "a@b.com", "Name": "Jane Doe" });
    let res = post_webhook(&address, &body).await;
    assert_eq!(200, res.status().as_u16());
}

#[tokio::test]
async fn unmatched_form_is_acknowledged_without_an_upsert() {
    let (address, klaviyo_server) = spawn_app().await;

    // 不应有任何外呼
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&klaviyo_server)
        .await;

    let res = post_webhook(&address, &json!({ "form": "other-form" })).await;
    assert_eq!(200, res.status().as_u16());
    let reply: serde_json::Value = res.json().await.unwrap();
    assert_eq!("Form not matched", reply["message"]);
}

#[tokio::test]
async fn missing_email_is_rejected() {
    let (address, _) = spawn_app().await;

    let body = json!({
        "form": "wf-form-Sweepstakes-2025",
        "Name": "Jane Doe",
        "Phone": "555-0100",
    });
    let res = post_webhook(&address, &body).await;
    assert_eq!(400, res.status().as_u16());
    let reply: serde_json::Value = res.json().await.unwrap();
    assert_eq!("Email is required", reply["error"]);
}

#[tokio::test]
async fn upstream_error_maps_to_500() {
    let (address, klaviyo_server) = spawn_app().await;

    Mock::given(path("/api/profiles/"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server exploded"))
        .expect(1)
        .mount(&klaviyo_server)
        .await;

    let body = json!({ "form": "wf-form-Sweepstakes-2025", "Email": "a@b.com" });
    let res = post_webhook(&address, &body).await;
    assert_eq!(500, res.status().as_u16());
    let reply: serde_json::Value = res.json().await.unwrap();
    assert_eq!(json!(false), reply["success"]);
    let error = reply["error"].as_str().unwrap();
    assert!(error.contains("500"), "{error}");
}

#[tokio::test]
async fn non_post_method_is_rejected() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{address}/webhook/klaviyo"))
        .send()
        .await
        .expect("failed to execute request.");
    assert_eq!(405, res.status().as_u16());
}
