//! Integration tests for Festify.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p festify-integration-tests
//! ```
//!
//! Tests drive the real storefront router in-process, so no server or
//! external service needs to be running. [`TestClient`] keeps the session
//! cookie between requests the way a browser would.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{
        HeaderMap, Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
};
use festify_storefront::{catalog::bundled_catalog, config::StorefrontConfig, state::AppState};
use tower::ServiceExt;

/// A response with its body read into a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// An in-process client for the storefront with a one-cookie jar.
///
/// Clients made with [`TestClient::fork`] talk to the same storefront (and
/// session store) but keep their own cookie, like two browsers.
pub struct TestClient {
    app: Router,
    state: AppState,
    cookie: Option<String>,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// A client for a storefront using the default config and bundled catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StorefrontConfig::default())
    }

    #[must_use]
    pub fn with_config(config: StorefrontConfig) -> Self {
        let catalog = bundled_catalog().expect("bundled catalog is valid");
        let state = AppState::new(config, catalog);
        Self {
            app: festify_storefront::app(state.clone()),
            state,
            cookie: None,
        }
    }

    /// A second visitor on the same storefront, starting without a session.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            app: self.app.clone(),
            state: self.state.clone(),
            cookie: None,
        }
    }

    /// The storefront state behind this client.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// The session cookie currently held, as `name=value`.
    #[must_use]
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri);
        self.send(request, Body::empty()).await
    }

    /// POST a urlencoded form body such as `product_id=1`.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri).header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(form.to_string())).await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }
        let request = request.body(body).expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response.headers().get(SET_COOKIE) {
            self.store_cookie(set_cookie.to_str().expect("ascii cookie"));
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
        }
    }

    /// Keep the `name=value` part of a `Set-Cookie` header; drop removals.
    fn store_cookie(&mut self, set_cookie: &str) {
        let pair = set_cookie.split(';').next().unwrap_or_default().trim();
        let removed = pair.ends_with('=') || set_cookie.contains("Max-Age=0");
        self.cookie = if removed { None } else { Some(pair.to_string()) };
    }
}
