//! Router-level tests exercising the HTTP surface end to end.

mod helpers;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use serial_test::serial;
use tower::util::ServiceExt;

use helpers::TestContext;

fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    builder.body(body).expect("request")
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().expect("token").to_string()
}

async fn create_user(ctx: &TestContext, role: &str) -> (String, i64) {
    let request = helpers::create_user_request(role);
    let email = request.email.clone();
    let user = ctx
        .services
        .user_service
        .create_user(request)
        .await
        .expect("create user");
    (email, user.id)
}

#[tokio::test]
#[serial]
async fn protected_routes_require_a_token() {
    let ctx = TestContext::new().await.expect("test context");
    let app = threadline::handlers::app(ctx.state.clone());

    let (status, _) = send(&app, request("GET", "/api/leads", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request("GET", "/api/navigation", Some("not-a-real-token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The health probe stays open.
    let (status, _) = send(&app, request("GET", "/healthz", None, None)).await;
    assert_eq!(status, StatusCode::OK);

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn login_identifies_the_caller() {
    let ctx = TestContext::new().await.expect("test context");
    let app = threadline::handlers::app(ctx.state.clone());

    let (email, user_id) = create_user(&ctx, "sales").await;
    let token = login(&app, &email, "correct-horse-battery").await;

    let (status, body) = send(&app, request("GET", "/api/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_i64(), Some(user_id));
    assert_eq!(body["role"].as_str(), Some("sales"));
    // The password digest never leaves the service.
    assert!(body.get("password_hash").is_none());

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn roles_gate_the_admin_surface() {
    let ctx = TestContext::new().await.expect("test context");
    let app = threadline::handlers::app(ctx.state.clone());

    let (sales_email, _) = create_user(&ctx, "sales").await;
    let (admin_email, _) = create_user(&ctx, "admin").await;

    let sales_token = login(&app, &sales_email, "correct-horse-battery").await;
    let admin_token = login(&app, &admin_email, "correct-horse-battery").await;

    let (status, _) = send(&app, request("GET", "/api/users", Some(&sales_token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, request("GET", "/api/users", Some(&admin_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().is_some());

    // Sales also cannot reach camp management.
    let (status, _) = send(&app, request("GET", "/api/camps", Some(&sales_token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn navigation_is_filtered_by_role_and_allow_list() {
    let ctx = TestContext::new().await.expect("test context");
    let app = threadline::handlers::app(ctx.state.clone());

    let (email, user_id) = create_user(&ctx, "sales").await;
    let token = login(&app, &email, "correct-horse-battery").await;

    let (status, body) = send(&app, request("GET", "/api/navigation", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = body
        .as_array()
        .expect("tree")
        .iter()
        .filter_map(|entry| entry["key"].as_str())
        .collect();
    assert!(keys.contains(&"sales"));
    assert!(!keys.contains(&"admin"));

    // Tighten the allow-list and the cached tree is rebuilt.
    let (admin_email, _) = create_user(&ctx, "admin").await;
    let admin_token = login(&app, &admin_email, "correct-horse-battery").await;
    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/api/users/{}/visible-pages", user_id),
            Some(&admin_token),
            Some(json!({ "visible_pages": ["dashboard"] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, request("GET", "/api/navigation", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = body
        .as_array()
        .expect("tree")
        .iter()
        .filter_map(|entry| entry["key"].as_str())
        .collect();
    assert_eq!(keys, vec!["dashboard"]);

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn lead_progress_endpoint_rejects_skipped_steps() {
    let ctx = TestContext::new().await.expect("test context");
    let app = threadline::handlers::app(ctx.state.clone());

    let (email, _) = create_user(&ctx, "sales").await;
    let token = login(&app, &email, "correct-horse-battery").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/leads",
            Some(&token),
            Some(json!({
                "company_name": "Harbor Football Club",
                "contact_name": "Jo Reyes"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create lead failed: {}", body);
    let lead_id = body["id"].as_i64().expect("lead id");

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/leads/{}/progress", lead_id),
            Some(&token),
            Some(json!({ "submitted_to_design": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/leads/{}/progress", lead_id),
            Some(&token),
            Some(json!({ "contacted": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contacted"].as_bool(), Some(true));
    assert_eq!(body["status"].as_str(), Some("active"));

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn mailbox_round_trip_over_http() {
    let ctx = TestContext::new().await.expect("test context");
    let app = threadline::handlers::app(ctx.state.clone());

    let (sender_email, _) = create_user(&ctx, "sales").await;
    let (recipient_email, recipient_id) = create_user(&ctx, "designer").await;

    let sender_token = login(&app, &sender_email, "correct-horse-battery").await;
    let recipient_token = login(&app, &recipient_email, "correct-horse-battery").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/mail/messages",
            Some(&sender_token),
            Some(json!({
                "to_user_ids": [recipient_id],
                "subject": "Sample approval",
                "body": "The jersey sample is ready for review."
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "compose failed: {}", body);

    let (status, body) = send(
        &app,
        request("GET", "/api/mail/folders/inbox", Some(&recipient_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let inbox = body.as_array().expect("inbox");
    assert_eq!(inbox.len(), 1);
    let message_id = inbox[0]["id"].as_str().expect("message id").to_string();
    assert_eq!(inbox[0]["read"].as_bool(), Some(false));

    let (status, body) = send(
        &app,
        request("GET", "/api/mail/summary", Some(&recipient_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unread"].as_u64(), Some(1));

    // Reading, starring, and trashing the recipient's copy.
    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/api/mail/messages/{}", message_id),
            Some(&recipient_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["read"].as_bool(), Some(true));

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/mail/messages/{}/star", message_id),
            Some(&recipient_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["starred"].as_bool(), Some(true));

    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/api/mail/messages/{}", message_id),
            Some(&recipient_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permanent"].as_bool(), Some(false));

    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/api/mail/messages/{}", message_id),
            Some(&recipient_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permanent"].as_bool(), Some(true));

    // The sender keeps an untouched copy in sent.
    let (status, body) = send(
        &app,
        request("GET", "/api/mail/folders/sent", Some(&sender_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("sent").len(), 1);

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn logout_revokes_the_session() {
    let ctx = TestContext::new().await.expect("test context");
    let app = threadline::handlers::app(ctx.state.clone());

    let (email, _) = create_user(&ctx, "production").await;
    let token = login(&app, &email, "correct-horse-battery").await;

    let (status, _) = send(&app, request("POST", "/api/auth/logout", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("GET", "/api/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.expect("cleanup");
}
