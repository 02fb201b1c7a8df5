//! Reqwest-backed gateway shared by every backend client.
//!
//! The gateway owns transport details only: URL validation, authorization,
//! JSON body serialisation, trust anchors and mapping non-success responses
//! through the configured [`ErrorEnvelope`]. Decoding success bodies is left
//! to the typed client built on top of it.

use std::error::Error as _;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap};
use reqwest::{Certificate, Client, Method, Request, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

use super::{ErrorEnvelope, GatewayError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!("cfctl/", env!("CARGO_PKG_VERSION"));

/// Transport settings applied to every request a gateway sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// A request built by [`Gateway::new_request`], ready to send.
#[derive(Debug)]
pub struct GatewayRequest {
    inner: Request,
}

impl GatewayRequest {
    /// HTTP method.
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Absolute request URL.
    pub fn url(&self) -> &Url {
        self.inner.url()
    }

    /// Headers to send, `Authorization` included.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Serialised JSON body, when one was attached.
    pub fn body(&self) -> Option<&[u8]> {
        self.inner.body().and_then(reqwest::Body::as_bytes)
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Whole response body.
    pub body: Vec<u8>,
}

/// A failed exchange.
///
/// `headers` holds the headers of the rejecting response so callers can still
/// read metadata such as warnings; it is empty when no response arrived.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{error}")]
pub struct GatewayFailure {
    /// Why the exchange failed.
    pub error: GatewayError,
    /// Headers of the non-success response, if any.
    pub headers: HeaderMap,
}

impl From<GatewayError> for GatewayFailure {
    fn from(error: GatewayError) -> Self {
        Self {
            error,
            headers: HeaderMap::new(),
        }
    }
}

/// HTTP gateway bound to one backend error envelope.
pub struct Gateway {
    client: Client,
    envelope: ErrorEnvelope,
    settings: GatewaySettings,
    trusted_certs: Vec<Certificate>,
}

impl Gateway {
    /// Build a gateway that parses errors with `envelope`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ClientSetup`] when the HTTP client cannot be
    /// constructed.
    pub fn new(envelope: ErrorEnvelope, settings: GatewaySettings) -> Result<Self, GatewayError> {
        let client = build_client(&settings, &[])?;
        Ok(Self {
            client,
            envelope,
            settings,
            trusted_certs: Vec::new(),
        })
    }

    /// Gateway for the Cloud Controller API.
    ///
    /// # Errors
    ///
    /// See [`Gateway::new`].
    pub fn cloud_controller(settings: GatewaySettings) -> Result<Self, GatewayError> {
        Self::new(ErrorEnvelope::CloudController, settings)
    }

    /// Gateway for the UAA authentication server.
    ///
    /// # Errors
    ///
    /// See [`Gateway::new`].
    pub fn uaa(settings: GatewaySettings) -> Result<Self, GatewayError> {
        Self::new(ErrorEnvelope::Uaa, settings)
    }

    /// Extra trust anchors currently installed.
    pub fn trusted_certs(&self) -> &[Certificate] {
        &self.trusted_certs
    }

    /// Replace the extra trust anchors and rebuild the HTTP client.
    ///
    /// On failure the previous client and anchors are kept.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidCertificate`] when the client rejects one
    /// of the certificates.
    pub fn set_trusted_certs(&mut self, certs: Vec<Certificate>) -> Result<(), GatewayError> {
        let client = build_client(&self.settings, &certs).map_err(|error| {
            GatewayError::invalid_certificate(error.to_string())
        })?;
        debug!(count = certs.len(), "trusted certificates replaced");
        self.client = client;
        self.trusted_certs = certs;
        Ok(())
    }

    /// Build an authorised request with an optional JSON body.
    ///
    /// A bare token is sent as `bearer <token>`, a token that already names a
    /// scheme is sent unchanged and an empty token sends no `Authorization`
    /// header.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] when the URL does not parse or
    /// the body cannot be serialised.
    pub fn new_request<B>(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<&B>,
    ) -> Result<GatewayRequest, GatewayError>
    where
        B: Serialize + ?Sized,
    {
        let url = Url::parse(url)
            .map_err(|error| GatewayError::invalid_request(format!("{url}: {error}")))?;
        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(value) = authorization_value(token) {
            builder = builder.header(AUTHORIZATION, value);
        }
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)
                .map_err(|error| GatewayError::invalid_request(error.to_string()))?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
        }
        let inner = builder
            .build()
            .map_err(|error| GatewayError::invalid_request(error_chain(&error)))?;
        Ok(GatewayRequest { inner })
    }

    /// Send one request and read the whole response.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when no response arrives, and the
    /// envelope's mapping for any non-2xx status together with that
    /// response's headers.
    pub async fn perform_request(
        &self,
        request: GatewayRequest,
    ) -> Result<GatewayResponse, GatewayFailure> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let response = self
            .client
            .execute(request.inner)
            .await
            .map_err(|error| GatewayError::transport(error_chain(&error)))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|error| GatewayError::transport(error_chain(&error)))?;
        debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "received response");

        if !status.is_success() {
            let error = self.envelope.to_error(status.as_u16(), body.as_ref());
            debug!(%method, %url, kind = error.kind(), "request rejected");
            return Err(GatewayFailure { error, headers });
        }
        Ok(GatewayResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Decode every certificate in a PEM bundle.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidCertificate`] when the bundle is malformed
/// or holds no certificates.
pub fn parse_pem_bundle(pem: &[u8]) -> Result<Vec<Certificate>, GatewayError> {
    let certs = Certificate::from_pem_bundle(pem)
        .map_err(|error| GatewayError::invalid_certificate(error_chain(&error)))?;
    if certs.is_empty() {
        return Err(GatewayError::invalid_certificate("no certificates found"));
    }
    Ok(certs)
}

fn build_client(settings: &GatewaySettings, certs: &[Certificate]) -> Result<Client, GatewayError> {
    certs
        .iter()
        .cloned()
        .fold(
            Client::builder()
                .use_rustls_tls()
                .timeout(settings.timeout)
                .user_agent(settings.user_agent.as_str()),
            reqwest::ClientBuilder::add_root_certificate,
        )
        .build()
        .map_err(|error| GatewayError::client_setup(error_chain(&error)))
}

fn authorization_value(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        None
    } else if token.contains(' ') {
        Some(token.to_owned())
    } else {
        Some(format!("bearer {token}"))
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
#[path = "http_gateway_tests.rs"]
mod tests;
