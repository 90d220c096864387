//! Type definitions for stubbed HTTP expectations.
//!
//! This module contains the method enumeration, reply payloads, outcomes and
//! the immutable `Expectation` record stored by the registry.

use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use url::Url;

// ============================================================================
// Method
// ============================================================================

/// HTTP methods an expectation can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Merge,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Head,
        Method::Merge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Merge => "MERGE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a method outside the supported set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported method: {0}")]
pub struct UnsupportedMethod(pub String);

impl FromStr for Method {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnsupportedMethod(s.to_string()))
    }
}

// ============================================================================
// Reply payloads
// ============================================================================

/// Textual reply body with optional encoding metadata.
///
/// `charset` and `media_type` are forwarded verbatim into the `Content-Type`
/// header of the synthesized response. The text itself is always emitted as
/// UTF-8 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyBody {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl ReplyBody {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            charset: None,
            media_type: None,
        }
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

impl From<&str> for ReplyBody {
    fn from(text: &str) -> Self {
        ReplyBody::text(text)
    }
}

impl From<String> for ReplyBody {
    fn from(text: String) -> Self {
        ReplyBody::text(text)
    }
}

/// Caller-supplied error raised in place of a response
pub type SyntheticError = Arc<dyn Error + Send + Sync + 'static>;

/// What a matched expectation delivers
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Canned response with status and payload
    Body { status: StatusCode, body: ReplyBody },
    /// Raise `error` to the caller. `status` is kept for symmetry with the
    /// body variant and never turned into a response.
    Fault {
        status: StatusCode,
        error: SyntheticError,
    },
}

impl Outcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::Body { status, .. } | Outcome::Fault { status, .. } => *status,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, Outcome::Fault { .. })
    }
}

// ============================================================================
// Signature
// ============================================================================

/// Lower-cased (method, full url) pair used for matching
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Signature {
    pub method: String,
    pub url: String,
}

impl Signature {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_lowercase(),
            url: url.to_lowercase(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

// ============================================================================
// Expectation
// ============================================================================

/// A complete, immutable stubbed call.
///
/// Only built through [`ExpectationBuilder`](super::ExpectationBuilder), so an
/// expectation without an outcome cannot exist.
#[derive(Debug, Clone)]
pub struct Expectation {
    pub(crate) base_path: String,
    pub(crate) path: String,
    pub(crate) method: Method,
    pub(crate) outcome: Outcome,
    url: String,
    pub(crate) signature: Signature,
}

/// Parse the joined target like an intercepted request so percent-encoding,
/// default ports and empty paths line up. Unparsable targets are kept verbatim.
fn signature_url(url: &str) -> String {
    Url::parse(url)
        .map(String::from)
        .unwrap_or_else(|_| url.to_string())
}

impl Expectation {
    pub(crate) fn new(base_path: String, method: Method, path: String, outcome: Outcome) -> Self {
        let url = format!("{base_path}{path}");
        let signature = Signature::new(method.as_str(), &signature_url(&url));
        Self {
            base_path,
            path,
            method,
            outcome,
            url,
            signature,
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Full target as registered, before lower-casing
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn matches(&self, signature: &Signature) -> bool {
        self.signature == *signature
    }
}
