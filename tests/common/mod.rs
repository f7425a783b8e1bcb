//! Shared helpers: an in-memory app, request plumbing, and seeding.

#![allow(dead_code, clippy::panic)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use eventflow::api;
use eventflow::app_state::AppState;
use eventflow::backend::{Backend, MemoryBackend};
use eventflow::config::AppConfig;
use eventflow::domain::{EventType, NewUser, Plan, PlanId, PlanInput, Role, User};

/// The full router over a fresh in-memory backend.
pub struct TestApp {
    /// Router under test.
    pub router: Router,
    /// Backend behind it, for seeding and inspection.
    pub backend: Arc<MemoryBackend>,
}

/// A decoded response.
pub struct Reply {
    /// Status code.
    pub status: StatusCode,
    /// Headers.
    pub headers: HeaderMap,
    /// JSON body, `Null` when empty.
    pub body: Value,
}

impl Reply {
    /// `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Every `Set-Cookie` header.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// A string field by JSON pointer.
    pub fn str_at(&self, pointer: &str) -> Option<&str> {
        self.body.pointer(pointer).and_then(Value::as_str)
    }
}

impl TestApp {
    /// Builds the app with default settings.
    pub fn new() -> Self {
        let backend = Arc::new(MemoryBackend::new());
        let config = AppConfig {
            persistence_enabled: false,
            ..AppConfig::default()
        };
        let shared: Arc<dyn Backend> = Arc::clone(&backend) as Arc<dyn Backend>;
        let router = api::build_app(AppState::new(shared, &config));
        Self { router, backend }
    }

    /// Sends one request through the router.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        let Ok(request) = request else {
            panic!("invalid request for {uri}");
        };
        let Ok(response) = self.router.clone().oneshot(request).await;

        let status = response.status();
        let headers = response.headers().clone();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("unreadable body from {uri}");
        };
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Reply {
            status,
            headers,
            body,
        }
    }

    /// `GET` with an optional session cookie.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Reply {
        self.send(Method::GET, uri, cookie, None).await
    }

    /// Logs in as `email` and returns the `name=value` cookie pair.
    pub async fn login(&self, email: &str) -> String {
        let reply = self
            .send(
                Method::POST,
                "/login",
                None,
                Some(serde_json::json!({ "email": email, "password": "segredo" })),
            )
            .await;
        assert_eq!(reply.status, StatusCode::OK, "login failed for {email}");
        let Some(cookie) = reply.set_cookies().into_iter().next() else {
            panic!("login set no cookie");
        };
        let Some(pair) = cookie.split(';').next() else {
            panic!("empty cookie");
        };
        pair.to_string()
    }

    /// Inserts an active user straight into the backend.
    pub async fn user(&self, name: &str, role: Role, plan_id: Option<PlanId>) -> User {
        let Ok(user) = self
            .backend
            .insert_user(NewUser {
                name: name.to_string(),
                email: email_of(name),
                role,
                plan_id,
            })
            .await
        else {
            panic!("seeding user {name} failed");
        };
        user
    }

    /// Inserts a free plan allowing `max_events`.
    pub async fn plan(&self, name: &str, max_events: i32) -> Plan {
        let Ok(plan) = self
            .backend
            .insert_plan(PlanInput {
                name: name.to_string(),
                max_events,
                price: Decimal::ZERO,
            })
            .await
        else {
            panic!("seeding plan {name} failed");
        };
        plan
    }

    /// Inserts an event type.
    pub async fn event_type(&self, name: &str) -> EventType {
        let Ok(event_type) = self.backend.insert_event_type(name).await else {
            panic!("seeding type {name} failed");
        };
        event_type
    }
}

/// E-mail used for a seeded user called `name`.
pub fn email_of(name: &str) -> String {
    format!("{}@example.com", name.to_lowercase())
}
