//! Fluent construction of expectations.
//!
//! A chain starts from a base path, selects a method and path, and ends with
//! a reply call that yields the finished [`Expectation`]:
//!
//! ```
//! use hyper::StatusCode;
//! use nock_http::Expectation;
//!
//! let expectation = Expectation::builder("http://localhost:8080/")
//!     .get("?id=5")
//!     .reply(StatusCode::OK, r#"{"id":5}"#);
//!
//! assert_eq!(expectation.url(), "http://localhost:8080/?id=5");
//! ```

use super::types::{Expectation, Method, Outcome, ReplyBody};
use hyper::StatusCode;
use std::error::Error;
use std::sync::Arc;

/// Strip exactly one trailing `/`
pub(crate) fn normalize_base_path(base_path: &str) -> String {
    base_path
        .strip_suffix('/')
        .unwrap_or(base_path)
        .to_string()
}

/// Ensure the path starts with `/`; nothing else is rewritten
pub(crate) fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

macro_rules! method_selectors {
    ($($(#[$doc:meta])* $name:ident => $method:expr),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(self, path: &str) -> PendingExpectation {
                self.route($method, path)
            }
        )*
    };
}

/// First stage of the chain: only the base path is known
#[derive(Debug, Clone)]
#[must_use = "an expectation is only created once a method and a reply are chosen"]
pub struct ExpectationBuilder {
    base_path: String,
}

impl ExpectationBuilder {
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: normalize_base_path(base_path),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn route(self, method: Method, path: &str) -> PendingExpectation {
        PendingExpectation {
            base_path: self.base_path,
            method,
            path: normalize_path(path),
        }
    }

    method_selectors! {
        get => Method::Get,
        post => Method::Post,
        put => Method::Put,
        patch => Method::Patch,
        delete => Method::Delete,
        head => Method::Head,
        merge => Method::Merge,
    }
}

/// Method and path chosen, reply still missing.
///
/// Selecting another method replaces the previous one.
#[derive(Debug, Clone)]
#[must_use = "a pending expectation is dropped unless a reply method is called"]
pub struct PendingExpectation {
    base_path: String,
    method: Method,
    path: String,
}

impl PendingExpectation {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn route(self, method: Method, path: &str) -> PendingExpectation {
        PendingExpectation {
            method,
            path: normalize_path(path),
            ..self
        }
    }

    method_selectors! {
        get => Method::Get,
        post => Method::Post,
        put => Method::Put,
        patch => Method::Patch,
        delete => Method::Delete,
        head => Method::Head,
        merge => Method::Merge,
    }

    /// Reply with `status` and a text payload
    pub fn reply(self, status: StatusCode, body: impl Into<ReplyBody>) -> Expectation {
        self.finish(Outcome::Body {
            status,
            body: body.into(),
        })
    }

    pub fn reply_with_encoding(
        self,
        status: StatusCode,
        body: impl Into<String>,
        charset: impl Into<String>,
    ) -> Expectation {
        self.reply(status, ReplyBody::text(body).with_charset(charset))
    }

    pub fn reply_with_media_type(
        self,
        status: StatusCode,
        body: impl Into<String>,
        charset: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Expectation {
        self.reply(
            status,
            ReplyBody::text(body)
                .with_charset(charset)
                .with_media_type(media_type),
        )
    }

    /// Raise `error` instead of responding
    pub fn reply_error<E>(self, status: StatusCode, error: E) -> Expectation
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let error: Box<dyn Error + Send + Sync> = error.into();
        self.finish(Outcome::Fault {
            status,
            error: Arc::from(error),
        })
    }

    fn finish(self, outcome: Outcome) -> Expectation {
        Expectation::new(self.base_path, self.method, self.path, outcome)
    }
}

impl Expectation {
    /// Start a builder chain for `base_path`
    pub fn builder(base_path: &str) -> ExpectationBuilder {
        ExpectationBuilder::new(base_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_strips_single_trailing_slash() {
        assert_eq!(normalize_base_path("http://host/"), "http://host");
        assert_eq!(normalize_base_path("http://host"), "http://host");
        assert_eq!(normalize_base_path("http://host//"), "http://host/");
    }

    #[test]
    fn test_path_gets_leading_slash() {
        assert_eq!(normalize_path("foo"), "/foo");
        assert_eq!(normalize_path("/foo"), "/foo");
        assert_eq!(normalize_path("?id=5"), "/?id=5");
        assert_eq!(normalize_path(""), "/");
        // Repeated separators are kept verbatim
        assert_eq!(normalize_path("//foo"), "//foo");
    }

    #[test]
    fn test_last_method_selection_wins() {
        let expectation = Expectation::builder("http://host")
            .get("/first")
            .delete("second")
            .reply(StatusCode::NO_CONTENT, "");

        assert_eq!(expectation.method(), Method::Delete);
        assert_eq!(expectation.path(), "/second");
        assert_eq!(expectation.url(), "http://host/second");
    }

    #[test]
    fn test_every_selector_sets_its_method() {
        let cases: [(fn(ExpectationBuilder, &str) -> PendingExpectation, Method); 7] = [
            (ExpectationBuilder::get, Method::Get),
            (ExpectationBuilder::post, Method::Post),
            (ExpectationBuilder::put, Method::Put),
            (ExpectationBuilder::patch, Method::Patch),
            (ExpectationBuilder::delete, Method::Delete),
            (ExpectationBuilder::head, Method::Head),
            (ExpectationBuilder::merge, Method::Merge),
        ];

        for (select, method) in cases {
            let pending = select(Expectation::builder("http://host"), "x");
            assert_eq!(pending.method(), method);
            assert_eq!(pending.path(), "/x");
        }
    }

    #[test]
    fn test_reply_with_media_type_keeps_metadata() {
        let expectation = Expectation::builder("http://host").post("/").reply_with_media_type(
            StatusCode::CREATED,
            "{}",
            "utf-16",
            "application/json",
        );

        match expectation.outcome() {
            Outcome::Body { status, body } => {
                assert_eq!(*status, StatusCode::CREATED);
                assert_eq!(body.text, "{}");
                assert_eq!(body.charset.as_deref(), Some("utf-16"));
                assert_eq!(body.media_type.as_deref(), Some("application/json"));
            }
            other => panic!("expected body outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_reply_error_stores_fault() {
        let expectation = Expectation::builder("http://host")
            .get("/")
            .reply_error(StatusCode::OK, "boom");

        assert!(expectation.outcome().is_fault());
        assert_eq!(expectation.outcome().status(), StatusCode::OK);
    }
}
