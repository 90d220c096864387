//! Resolution of intercepted requests against the registry.

use super::types::{InterceptError, InterceptedRequest, StubbedResponse};
use crate::config::{ConfigError, DispatchConfig};
use crate::expectation::{Expectation, Outcome, Registry};
use hyper::HeaderMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves intercepted requests against a shared [`Registry`].
///
/// Resolution never performs I/O: an unmatched request fails instead of
/// reaching the network.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    config: Arc<DispatchConfig>,
    response_headers: Arc<HeaderMap>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            config: Arc::new(DispatchConfig::default()),
            response_headers: Arc::new(HeaderMap::new()),
        }
    }

    /// Validates `config` up front so a bad static header is rejected here
    /// instead of being dropped from every response
    pub fn with_config(
        registry: Arc<Registry>,
        config: DispatchConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let response_headers = config.header_map()?;
        Ok(Self {
            registry,
            config: Arc::new(config),
            response_headers: Arc::new(response_headers),
        })
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Find the single expectation for `request`.
    ///
    /// Zero matches and more than one match are both errors; there is no
    /// first-match fallback.
    pub fn resolve(&self, request: &InterceptedRequest) -> Result<Expectation, InterceptError> {
        let signature = request.signature();
        let mut matches = self.registry.find_all(&signature);

        match matches.len() {
            0 => {
                warn!("No expectation registered for {}", signature);
                Err(InterceptError::NoMatch {
                    method: signature.method,
                    url: signature.url,
                })
            }
            1 => Ok(matches.remove(0)),
            count => {
                warn!("{} expectations registered for {}", count, signature);
                Err(InterceptError::AmbiguousMatch {
                    method: signature.method,
                    url: signature.url,
                    count,
                })
            }
        }
    }

    /// Produce the stubbed outcome for `request`
    pub fn intercept(&self, request: &InterceptedRequest) -> Result<StubbedResponse, InterceptError> {
        let expectation = self.resolve(request)?;

        match expectation.outcome {
            Outcome::Body { status, mut body } => {
                debug!(
                    "Stubbed {} {} -> {}",
                    request.method,
                    request.url,
                    status.as_u16()
                );
                if body.charset.is_none() {
                    body.charset = Some(self.config.default_charset.clone());
                }
                if body.media_type.is_none() {
                    body.media_type = Some(self.config.default_media_type.clone());
                }
                Ok(StubbedResponse { status, body })
            }
            Outcome::Fault { error, .. } => {
                debug!(
                    "Raising synthetic fault for {} {}: {}",
                    request.method, request.url, error
                );
                Err(InterceptError::Fault(error))
            }
        }
    }

    /// [`intercept`](Self::intercept) followed by conversion to an `http::Response`
    /// carrying the configured static headers
    pub fn intercept_http(
        &self,
        request: &InterceptedRequest,
    ) -> Result<hyper::Response<http_body_util::Full<bytes::Bytes>>, InterceptError> {
        Ok(self.intercept(request)?.into_http_with(&self.response_headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::TransportFault;
    use hyper::StatusCode;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(Registry::new()))
    }

    fn request(method: &str, url: &str) -> InterceptedRequest {
        InterceptedRequest::parse(method, url).unwrap()
    }

    #[test]
    fn test_body_reply() {
        let dispatcher = dispatcher();
        dispatcher.registry().register(
            Expectation::builder("http://localhost:8080")
                .get("?id=5")
                .reply(StatusCode::OK, r#"{"id":5}"#),
        );

        let response = dispatcher
            .intercept(&request("GET", "http://localhost:8080?id=5"))
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.text(), r#"{"id":5}"#);

        let err = dispatcher
            .intercept(&request("GET", "http://localhost:8080?id=6"))
            .unwrap_err();
        assert!(err.is_no_match());
    }

    #[test]
    fn test_default_metadata_filled_from_config() {
        let config = DispatchConfig {
            default_media_type: "application/json".to_string(),
            ..Default::default()
        };
        let dispatcher = Dispatcher::with_config(Arc::new(Registry::new()), config).unwrap();
        dispatcher.registry().register(
            Expectation::builder("http://host")
                .get("/")
                .reply(StatusCode::OK, "{}"),
        );

        let response = dispatcher.intercept(&request("GET", "http://host/")).unwrap();
        assert_eq!(
            response.content_type().as_deref(),
            Some("application/json; charset=utf-8")
        );
    }

    #[test]
    fn test_explicit_metadata_wins_over_config() {
        let dispatcher = dispatcher();
        dispatcher.registry().register(
            Expectation::builder("http://host")
                .get("/")
                .reply_with_encoding(StatusCode::OK, "hi", "iso-8859-1"),
        );

        let response = dispatcher.intercept(&request("GET", "http://host/")).unwrap();
        assert_eq!(
            response.content_type().as_deref(),
            Some("text/plain; charset=iso-8859-1")
        );
    }

    #[test]
    fn test_fault_reply() {
        let dispatcher = dispatcher();
        dispatcher.registry().register(
            Expectation::builder("http://host")
                .delete("/")
                .reply_error(StatusCode::OK, TransportFault::NameResolution),
        );

        let err = dispatcher
            .intercept(&request("DELETE", "http://host/"))
            .unwrap_err();
        assert_eq!(
            err.fault().and_then(|e| e.downcast_ref::<TransportFault>()),
            Some(&TransportFault::NameResolution)
        );
    }

    #[test]
    fn test_fault_can_be_raised_repeatedly() {
        let dispatcher = dispatcher();
        dispatcher.registry().register(
            Expectation::builder("http://host")
                .get("/")
                .reply_error(StatusCode::OK, "unknown error"),
        );

        for _ in 0..3 {
            let err = dispatcher.intercept(&request("GET", "http://host/")).unwrap_err();
            assert_eq!(err.to_string(), "unknown error");
        }
    }

    #[test]
    fn test_ambiguous_match() {
        let dispatcher = dispatcher();
        let registry = dispatcher.registry();
        registry.register(
            Expectation::builder("http://host")
                .get("/")
                .reply(StatusCode::OK, "first"),
        );
        registry.register(
            Expectation::builder("http://host")
                .get("/")
                .reply(StatusCode::BAD_REQUEST, "second"),
        );

        let err = dispatcher.intercept(&request("GET", "http://host/")).unwrap_err();
        match err {
            InterceptError::AmbiguousMatch { count, .. } => assert_eq!(count, 2),
            other => panic!("expected ambiguous match, got {other:?}"),
        }
    }

    #[test]
    fn test_method_mismatch_is_no_match() {
        let dispatcher = dispatcher();
        dispatcher.registry().register(
            Expectation::builder("http://host")
                .delete("/")
                .reply(StatusCode::OK, ""),
        );

        let err = dispatcher.intercept(&request("GET", "http://host/")).unwrap_err();
        assert!(err.is_no_match());
    }

    #[test]
    fn test_intercept_http_adds_configured_headers() {
        let config =
            DispatchConfig::from_yaml_str("responseHeaders:\n  x-stubbed: \"true\"\n").unwrap();
        let dispatcher = Dispatcher::with_config(Arc::new(Registry::new()), config).unwrap();
        dispatcher.registry().register(
            Expectation::builder("http://host")
                .get("/")
                .reply(StatusCode::ACCEPTED, ""),
        );

        let response = dispatcher
            .intercept_http(&request("GET", "http://host/"))
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.headers()["x-stubbed"], "true");
        assert_eq!(
            response.headers()[hyper::header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_with_config_rejects_invalid_header() {
        let mut config = DispatchConfig::default();
        config
            .response_headers
            .insert("bad header".to_string(), "x".to_string());

        let err = Dispatcher::with_config(Arc::new(Registry::new()), config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidHeader { ref name, .. } if name == "bad header"
        ));
    }

    #[test]
    fn test_with_config_rejects_empty_charset() {
        let config = DispatchConfig {
            default_charset: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            Dispatcher::with_config(Arc::new(Registry::new()), config),
            Err(ConfigError::Empty("defaultCharset"))
        ));
    }
}
