#![allow(dead_code)]

use anyhow::Result;
use axum::{
    async_trait,
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use blog_api::{
    config::AppConfig,
    database::db::Db,
    server::{self, controller::AppState},
    services::mailer::{dto::Email, service::Mailer},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

/// `admin:qwerty`, the default admin credentials
pub const ADMIN_AUTH: &str = "Basic YWRtaW46cXdlcnR5";

pub const MISSING_ID: &str = "63f1c2e7a9b8c7d6e5f4a3b2";

/// Keeps every email instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<Email>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: Email) -> Result<()> {
        self.sent.lock().await.push(email);
        Ok(())
    }
}

impl RecordingMailer {
    /// confirmation code of the last email sent
    pub async fn last_code(&self) -> String {
        let sent = self.sent.lock().await;
        let text = &sent.last().expect("no email was sent").text;

        String::from(text.rsplit("code=").next().unwrap())
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: Db,
    pub mailer: Arc<RecordingMailer>,
}

pub fn setup_test_app() -> TestApp {
    let cfg = AppConfig {
        bcrypt_cost: 4,
        ..AppConfig::default()
    };

    let db = Db::in_memory();
    let mailer = Arc::new(RecordingMailer::default());

    let router = server::controller::new(AppState::new(db.clone(), mailer.clone(), &cfg));

    TestApp { router, db, mailer }
}

impl TestApp {
    /// sends a request, returning the status and the json body (`null` when empty)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(authorization) = authorization {
            builder = builder.header("Authorization", authorization);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Failed to parse JSON")
        };

        (status, json)
    }

    pub async fn create_blog(&self, name: &str) -> Value {
        let (status, blog) = self
            .request(
                "POST",
                "/blogs",
                Some(ADMIN_AUTH),
                Some(json!({
                    "name": name,
                    "description": "a blog about things",
                    "websiteUrl": "https://someurl.com",
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        blog
    }

    pub async fn create_post(&self, blog_id: &str, title: &str) -> Value {
        let (status, post) = self
            .request(
                "POST",
                "/posts",
                Some(ADMIN_AUTH),
                Some(json!({
                    "title": title,
                    "shortDescription": "short description",
                    "content": "content of the post",
                    "blogId": blog_id,
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        post
    }

    /// creates a confirmed user through the admin route and returns it
    pub async fn create_user(&self, login: &str) -> Value {
        let (status, user) = self
            .request(
                "POST",
                "/users",
                Some(ADMIN_AUTH),
                Some(json!({
                    "login": login,
                    "password": "qwerty1",
                    "email": format!("{}@mail.com", login),
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        user
    }

    /// logs in with the password used by `create_user`, returning the bearer header value
    pub async fn login(&self, login_or_email: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/auth/login",
                None,
                Some(json!({ "loginOrEmail": login_or_email, "password": "qwerty1" })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        format!("Bearer {}", body["accessToken"].as_str().unwrap())
    }
}
