//! Request/response descriptors and errors at the transport boundary.

use crate::expectation::{ReplyBody, Signature, SyntheticError};
use crate::response::ResponseBuilder;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{HeaderMap, Response, StatusCode};
use thiserror::Error;
use url::Url;

/// Outgoing request as seen by the interception point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptedRequest {
    pub method: String,
    pub url: Url,
}

impl InterceptedRequest {
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: method.into(),
            url,
        }
    }

    /// Parse `url` as an absolute URL.
    ///
    /// Parsing normalizes the target the way HTTP clients do, so
    /// `http://host:8080?id=5` becomes `http://host:8080/?id=5`.
    pub fn parse(method: impl Into<String>, url: &str) -> Result<Self, InterceptError> {
        let parsed = Url::parse(url).map_err(|source| InterceptError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self::new(method, parsed))
    }

    pub fn signature(&self) -> Signature {
        Signature::new(&self.method, self.url.as_str())
    }
}

/// Successful stubbed reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubbedResponse {
    pub status: StatusCode,
    pub body: ReplyBody,
}

impl StubbedResponse {
    pub fn text(&self) -> &str {
        &self.body.text
    }

    pub fn content_type(&self) -> Option<String> {
        match (&self.body.media_type, &self.body.charset) {
            (Some(media_type), Some(charset)) => Some(format!("{media_type}; charset={charset}")),
            _ => None,
        }
    }

    pub fn into_http(self) -> Response<Full<Bytes>> {
        self.into_http_with(&HeaderMap::new())
    }

    /// Like [`into_http`](Self::into_http), with `headers` merged over the
    /// generated ones
    pub fn into_http_with(self, headers: &HeaderMap) -> Response<Full<Bytes>> {
        let builder = ResponseBuilder::new(self.status);
        let builder = match (&self.body.media_type, &self.body.charset) {
            (Some(media_type), Some(charset)) => builder.content_type(media_type, charset),
            _ => builder,
        };
        builder
            .merge_headers(headers)
            .body(self.body.text)
            .build_full()
    }
}

#[derive(Debug, Error)]
pub enum InterceptError {
    #[error("unable to mock {method} {url}")]
    NoMatch { method: String, url: String },

    #[error("multiple mocks found for {method} {url}")]
    AmbiguousMatch {
        method: String,
        url: String,
        count: usize,
    },

    /// Error bound with `reply_error`, passed through unchanged
    #[error(transparent)]
    Fault(SyntheticError),

    #[error("invalid request url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl InterceptError {
    /// The synthetic error for fault replies
    pub fn fault(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            InterceptError::Fault(error) => Some(&**error),
            _ => None,
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, InterceptError::NoMatch { .. })
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, InterceptError::AmbiguousMatch { .. })
    }
}
