use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::http::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Response, StatusCode};
use std::str::FromStr;

/// Builds the `http::Response` handed back to an intercepted client
pub struct ResponseBuilder {
    status: StatusCode,
    body: Option<String>,
    headers: HeaderMap,
}

impl ResponseBuilder {
    pub fn new(status_code: StatusCode) -> Self {
        ResponseBuilder {
            status: status_code,
            body: None,
            headers: Default::default(),
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// `{media_type}; charset={charset}`
    pub fn content_type(self, media_type: &str, charset: &str) -> Self {
        self.header(CONTENT_TYPE.as_str(), &format!("{media_type}; charset={charset}"))
    }

    /// Invalid names or values are skipped
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (HeaderName::from_str(name), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
                self
            }
            _ => self,
        }
    }

    /// Overlay `headers`; a name already set is replaced by the incoming values
    pub fn merge_headers(mut self, headers: &HeaderMap) -> Self {
        self.headers.extend(headers.clone());
        self
    }

    pub fn build_full(self) -> Response<Full<Bytes>> {
        let payload = self.body.map(Bytes::from).unwrap_or_default();
        let content_length = HeaderValue::from(payload.len());

        let mut response = Response::new(Full::new(payload));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        headers.extend(self.headers);
        headers.insert(CONTENT_LENGTH, content_length);
        response
    }
}
