mod common;

use axum::http::StatusCode;
use common::{setup_test_app, TestApp, MISSING_ID};
use serde_json::{json, Value};

const CONTENT: &str = "a comment long enough to be accepted";

async fn post_id(app: &TestApp) -> String {
    let blog = app.create_blog("Rust").await;
    let post = app.create_post(blog["id"].as_str().unwrap(), "hello").await;

    String::from(post["id"].as_str().unwrap())
}

async fn comment(app: &TestApp, post_id: &str, bearer: &str) -> Value {
    let (status, comment) = app
        .request(
            "POST",
            &format!("/posts/{}/comments", post_id),
            Some(bearer),
            Some(json!({ "content": CONTENT })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    comment
}

#[tokio::test]
async fn test_comment_a_post() {
    let app = setup_test_app();
    let post_id = post_id(&app).await;
    let user = app.create_user("john").await;
    let bearer = app.login("john").await;

    let created = comment(&app, &post_id, &bearer).await;

    assert_eq!(created["content"], CONTENT);
    assert_eq!(created["commentatorInfo"]["userId"], user["id"]);
    assert_eq!(created["commentatorInfo"]["userLogin"], "john");
    assert!(created.get("postId").is_none());

    let (status, page) = app
        .request("GET", &format!("/posts/{}/comments", post_id), None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalCount"], 1);
    assert_eq!(page["items"][0], created);

    let (status, found) = app
        .request("GET", &format!("/comments/{}", created["id"].as_str().unwrap()), None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, created);
}

#[tokio::test]
async fn test_comment_requires_bearer() {
    let app = setup_test_app();
    let post_id = post_id(&app).await;
    let uri = format!("/posts/{}/comments", post_id);
    let body = json!({ "content": CONTENT });

    let (status, _) = app.request("POST", &uri, None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request("POST", &uri, Some("Bearer not.a.jwt"), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request("POST", &uri, Some(common::ADMIN_AUTH), Some(body))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_comment_checks_post_before_body() {
    let app = setup_test_app();
    app.create_user("john").await;
    let bearer = app.login("john").await;

    let (status, _) = app
        .request(
            "POST",
            &format!("/posts/{}/comments", MISSING_ID),
            Some(&bearer),
            Some(json!({ "content": "short" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let post_id = post_id(&app).await;

    let (status, body) = app
        .request(
            "POST",
            &format!("/posts/{}/comments", post_id),
            Some(&bearer),
            Some(json!({ "content": "short" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorsMessages"][0]["field"], "content");
}

#[tokio::test]
async fn test_only_the_commentator_can_update_or_delete() {
    let app = setup_test_app();
    let post_id = post_id(&app).await;
    app.create_user("john").await;
    app.create_user("jane").await;
    let john = app.login("john").await;
    let jane = app.login("jane@mail.com").await;

    let created = comment(&app, &post_id, &john).await;
    let uri = format!("/comments/{}", created["id"].as_str().unwrap());
    let update = json!({ "content": "an updated comment that is long enough" });

    let (status, _) = app.request("PUT", &uri, Some(&jane), Some(update.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request("DELETE", &uri, Some(&jane), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request("PUT", &uri, Some(&john), Some(update)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, found) = app.request("GET", &uri, None, None).await;
    assert_eq!(found["content"], "an updated comment that is long enough");

    let (status, _) = app.request("DELETE", &uri, Some(&john), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_checks_existence_then_ownership_then_body() {
    let app = setup_test_app();
    let post_id = post_id(&app).await;
    app.create_user("john").await;
    app.create_user("jane").await;
    let john = app.login("john").await;
    let jane = app.login("jane").await;

    let invalid = json!({ "content": "short" });

    let (status, _) = app
        .request("PUT", &format!("/comments/{}", MISSING_ID), Some(&john), Some(invalid.clone()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let created = comment(&app, &post_id, &john).await;
    let uri = format!("/comments/{}", created["id"].as_str().unwrap());

    let (status, _) = app.request("PUT", &uri, Some(&jane), Some(invalid.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request("PUT", &uri, Some(&john), Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
