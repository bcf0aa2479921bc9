//! Shared harness for the HTTP integration tests.
//!
//! Each `TestApp` owns a fresh in-memory database and a router, and behaves
//! like a browser: it stores the session cookie from `Set-Cookie` and sends
//! it back on the next request.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use axum_todo::app::{build_router, AppState};
use axum_todo::config::{AuthConfig, Config, DatabaseConfig, ServerConfig, SessionConfig};
use axum_todo::models::{Task, User};
use axum_todo::services::{create_pool, run_migrations};
use sqlx::SqlitePool;
use tower::ServiceExt;

const COOKIE_NAME: &str = "session";

pub struct TestApp {
    pub db: SqlitePool,
    router: Router,
    cookie: Option<String>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            body_limit: 64 * 1024,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
        },
        session: SessionConfig {
            secret: "integration-test-secret-with-enough-bytes".into(),
            cookie_name: COOKIE_NAME.into(),
            secure: false,
        },
        auth: AuthConfig {
            pbkdf2_rounds: 1_000,
            salt_length: 16,
        },
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let config = test_config();
        let db = create_pool(&config.database).await.unwrap();
        run_migrations(&db).await.unwrap();
        let router = build_router(AppState::new(db.clone(), config));
        Self { db, router, cookie: None }
    }

    /// A second browser against the same server and database.
    pub fn new_browser(&self) -> Self {
        Self {
            db: self.db.clone(),
            router: self.router.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> TestResponse {
        self.post_form(
            "/register",
            &[("name", name), ("email", email), ("password", password)],
        )
        .await
    }

    pub async fn login(&mut self, email: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("email", email), ("password", password)])
            .await
    }

    pub async fn user_by_email(&self, email: &str) -> User {
        User::find_by_email(&self.db, email).await.unwrap().unwrap()
    }

    pub async fn user_count(&self) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user")
            .fetch_one(&self.db)
            .await
            .unwrap();
        count
    }

    pub async fn task_names(&self, owner: i64) -> Vec<String> {
        Task::list_for_owner(&self.db, owner)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.task_name)
            .collect()
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        for value in response.headers().get_all(header::SET_COOKIE) {
            let value = value.to_str().unwrap();
            if !value.starts_with(&format!("{}=", COOKIE_NAME)) {
                continue;
            }
            if value.contains("Max-Age=0") {
                self.cookie = None;
            } else {
                let pair = value.split(';').next().unwrap().to_string();
                self.cookie = Some(pair);
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl TestResponse {
    pub fn assert_redirect(&self, to: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(to));
    }
}
