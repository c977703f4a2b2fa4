mod common;

use axum::http::StatusCode;
use common::setup_test_app;
use serde_json::json;

fn registration() -> serde_json::Value {
    json!({ "login": "john", "password": "qwerty1", "email": "john@mail.com" })
}

#[tokio::test]
async fn test_registration_flow() {
    let app = setup_test_app();

    let (status, _) = app
        .request("POST", "/auth/registration", None, Some(registration()))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    {
        let sent = app.mailer.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "john@mail.com");
        assert_eq!(sent[0].subject, "Registration confirmation");
        assert!(sent[0]
            .html
            .as_ref()
            .unwrap()
            .contains("https://localhost:3003/auth/confirm-registration?code="));
    }

    let code = app.mailer.last_code().await;

    let (status, _) = app
        .request(
            "POST",
            "/auth/registration-confirmation",
            None,
            Some(json!({ "code": code })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .request(
            "POST",
            "/auth/registration-confirmation",
            None,
            Some(json!({ "code": code })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorsMessages"][0]["field"], "code");
    assert_eq!(
        body["errorsMessages"][0]["message"],
        "the confirmation code is either incorrect or had already been applied"
    );
}

#[tokio::test]
async fn test_registration_with_taken_login() {
    let app = setup_test_app();
    app.create_user("john").await;

    let (status, body) = app
        .request(
            "POST",
            "/auth/registration",
            None,
            Some(json!({ "login": "john", "password": "qwerty1", "email": "other@mail.com" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errorsMessages": [{ "message": "login should be unique", "field": "login" }] })
    );
    assert!(app.mailer.sent.lock().await.is_empty());
}

#[tokio::test]
async fn test_resending() {
    let app = setup_test_app();

    let (status, body) = app
        .request(
            "POST",
            "/auth/registration-email-resending",
            None,
            Some(json!({ "email": "john@mail.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorsMessages"][0]["field"], "email");

    app.request("POST", "/auth/registration", None, Some(registration()))
        .await;
    let first = app.mailer.last_code().await;

    let (status, _) = app
        .request(
            "POST",
            "/auth/registration-email-resending",
            None,
            Some(json!({ "email": "john@mail.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let second = app.mailer.last_code().await;
    assert_ne!(first, second);

    // older codes stay valid after a resend
    let (status, _) = app
        .request(
            "POST",
            "/auth/registration-confirmation",
            None,
            Some(json!({ "code": first })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .request(
            "POST",
            "/auth/registration-email-resending",
            None,
            Some(json!({ "email": "john@mail.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorsMessages"][0]["message"], "the user is already confirmed");
}

#[tokio::test]
async fn test_resending_validates_email() {
    let app = setup_test_app();

    let (status, body) = app
        .request(
            "POST",
            "/auth/registration-email-resending",
            None,
            Some(json!({ "email": "not-an-email" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorsMessages"][0]["field"], "email");
}

#[tokio::test]
async fn test_login_and_me() {
    let app = setup_test_app();
    let user = app.create_user("john").await;

    let bearer = app.login("john@mail.com").await;

    let (status, me) = app.request("GET", "/auth/me", Some(&bearer), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        me,
        json!({ "email": "john@mail.com", "login": "john", "userId": user["id"] })
    );
}

#[tokio::test]
async fn test_login_failures() {
    let app = setup_test_app();
    app.create_user("john").await;

    let (status, _) = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "loginOrEmail": "john", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "loginOrEmail": "not valid", "password": "qwerty1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorsMessages"][0]["field"], "loginOrEmail");
}

#[tokio::test]
async fn test_me_requires_bearer() {
    let app = setup_test_app();

    let (status, body) = app.request("GET", "/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_null());

    let (status, _) = app
        .request("GET", "/auth/me", Some("Bearer abc.def.ghi"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
