mod common;

use axum::http::StatusCode;
use common::{setup_test_app, ADMIN_AUTH, MISSING_ID};
use serde_json::json;

const BLOG_NOT_FOUND: &str = "there is no blog with an id value of blogId in the database";

#[tokio::test]
async fn test_create_post_copies_blog_name() {
    let app = setup_test_app();
    let blog = app.create_blog("Rust").await;

    let post = app.create_post(blog["id"].as_str().unwrap(), "hello").await;

    assert_eq!(post["title"], "hello");
    assert_eq!(post["blogName"], "Rust");
    assert!(post["createdAt"].as_str().unwrap().ends_with('Z'));

    let (status, found) = app
        .request("GET", &format!("/posts/{}", post["id"].as_str().unwrap()), None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, post);
}

#[tokio::test]
async fn test_create_post_with_missing_blog() {
    let app = setup_test_app();

    let (status, body) = app
        .request(
            "POST",
            "/posts",
            Some(ADMIN_AUTH),
            Some(json!({
                "title": "a title longer than thirty characters",
                "shortDescription": "s",
                "content": "c",
                "blogId": MISSING_ID,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errorsMessages": [
            { "message": "title can't be longer than 30 characters", "field": "title" },
            { "message": BLOG_NOT_FOUND, "field": "blogId" },
        ]})
    );
}

#[tokio::test]
async fn test_update_post() {
    let app = setup_test_app();
    let rust = app.create_blog("Rust").await;
    let go = app.create_blog("Go").await;
    let post = app.create_post(rust["id"].as_str().unwrap(), "hello").await;
    let uri = format!("/posts/{}", post["id"].as_str().unwrap());

    let (status, _) = app
        .request(
            "PUT",
            &uri,
            Some(ADMIN_AUTH),
            Some(json!({
                "title": "moved",
                "shortDescription": "s",
                "content": "c",
                "blogId": go["id"],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, found) = app.request("GET", &uri, None, None).await;
    assert_eq!(found["title"], "moved");
    assert_eq!(found["blogId"], go["id"]);
    assert_eq!(found["blogName"], "Go");
}

#[tokio::test]
async fn test_update_validates_body_before_id() {
    let app = setup_test_app();
    let blog = app.create_blog("Rust").await;
    let uri = format!("/posts/{}", MISSING_ID);

    let (status, _) = app
        .request("PUT", &uri, Some(ADMIN_AUTH), Some(json!({ "title": "t" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            "PUT",
            &uri,
            Some(ADMIN_AUTH),
            Some(json!({
                "title": "t",
                "shortDescription": "s",
                "content": "c",
                "blogId": blog["id"],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_post() {
    let app = setup_test_app();
    let blog = app.create_blog("Rust").await;
    let post = app.create_post(blog["id"].as_str().unwrap(), "hello").await;
    let uri = format!("/posts/{}", post["id"].as_str().unwrap());

    let (status, _) = app.request("DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.request("DELETE", &uri, Some(ADMIN_AUTH), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.request("DELETE", &uri, Some(ADMIN_AUTH), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_posts_sorted_by_title() {
    let app = setup_test_app();
    let blog = app.create_blog("Rust").await;
    for title in ["b", "c", "a"] {
        app.create_post(blog["id"].as_str().unwrap(), title).await;
    }

    let (status, page) = app
        .request("GET", "/posts?sortBy=title&sortDirection=asc", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pagesCount"], 1);

    let titles: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_post_comments_of_missing_post() {
    let app = setup_test_app();

    let (status, _) = app
        .request("GET", &format!("/posts/{}/comments", MISSING_ID), None, None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
