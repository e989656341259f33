#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `leads` integration tests.
//!
//! Builds a module around an inspectable in-memory store, encodes multipart
//! bodies and drives the router with `oneshot`.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;

use leads::config::{AuthConfig, LeadsConfig};
use leads::domain::repo::LeadsRepository;
use leads::infra::auth::StaticSessionProvider;
use leads::infra::resume::NamingResumeStore;
use leads::infra::storage::InMemoryLeadStore;
use leads::{Lead, LeadStatus, LeadsModule};

pub const BOUNDARY: &str = "leads-test-boundary";
pub const PDF: &str = "application/pdf";

pub struct TestApp {
    pub module: LeadsModule,
    pub store: Arc<InMemoryLeadStore>,
}

impl TestApp {
    /// Admin routes open; no session needed.
    pub fn new() -> Self {
        Self::with_config(LeadsConfig {
            auth: AuthConfig {
                enabled: false,
                ..AuthConfig::default()
            },
            ..LeadsConfig::default()
        })
    }

    /// Admin routes gated by the default admin account.
    pub fn with_auth() -> Self {
        Self::with_config(LeadsConfig::default())
    }

    pub fn with_config(config: LeadsConfig) -> Self {
        let store = Arc::new(InMemoryLeadStore::new());
        let module = LeadsModule::with_ports(
            &config,
            store.clone(),
            Arc::new(NamingResumeStore::new(config.upload_base_path.clone())),
            Arc::new(StaticSessionProvider::new(&config.auth)),
        )
        .expect("valid test config");
        Self { module, store }
    }

    pub fn router(&self) -> Router {
        self.module.router()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, _, body) = self.send_raw(request).await;
        (status, body)
    }

    /// Status, `Set-Cookie` header (if any) and JSON body.
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_owned());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, cookie, body)
    }

    pub fn seed(&self, lead: Lead) {
        self.store.add(lead);
    }
}

/// Hand-rolled multipart/form-data encoder.
#[derive(Default)]
pub struct Form {
    body: Vec<u8>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, method: &str, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

/// A complete, valid public submission.
pub fn jane_doe() -> Form {
    Form::new()
        .text("firstName", "Jane")
        .text("lastName", "Doe")
        .text("email", "jane@example.com")
        .text("country", "Canada")
        .text("linkedin", "https://linkedin.com/in/janedoe")
        .text("visaInterests", "O-1")
        .text("visaInterests", "EB-1A")
        .text("longFormInput", "I would like to explore the O-1 route.")
        .file("resume", "jane.pdf", PDF, b"%PDF-1.4 resume")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn lead(id: &str, first: &str, last: &str, submitted_at: OffsetDateTime) -> Lead {
    Lead {
        id: id.to_owned(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        name: Lead::compose_name(first, last),
        email: format!("{}@example.com", first.to_lowercase()),
        country: "Mexico".to_owned(),
        linkedin: None,
        visa_interests: "EB-2 NIW".to_owned(),
        long_form_input: "Seeded lead".to_owned(),
        resume_url: Some(format!("/uploads/0-{id}.pdf")),
        resume_file_name: Some(format!("{id}.pdf")),
        status: LeadStatus::Pending,
        submitted_at,
    }
}

/// Ten leads one day apart, ids "1".."10", oldest first.
pub fn seed_ten(app: &TestApp) {
    let start = time::macros::datetime!(2024-01-01 9:00 UTC);
    for i in 1..=10_i64 {
        let id = i.to_string();
        app.seed(lead(&id, "Lead", &id, start + time::Duration::days(i)));
    }
}

/// `name=value` part of a `Set-Cookie` header.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_owned()
}
