//! Gateway failure taxonomy.

use crate::domain::ports::{CloudControllerClientError, define_port_error};

define_port_error! {
    /// Errors surfaced by one gateway exchange.
    ///
    /// `Transport` covers everything that happens before a response arrives,
    /// including TLS trust failures. `Backend` is a non-success response whose
    /// body matched the configured error envelope.
    pub enum GatewayError {
        /// The request could not be built.
        InvalidRequest { message: String } =>
            "invalid request: {message}",
        /// A trusted certificate could not be loaded.
        InvalidCertificate { message: String } =>
            "invalid trusted certificate: {message}",
        /// The underlying HTTP client could not be configured.
        ClientSetup { message: String } =>
            "could not configure HTTP client: {message}",
        /// No response was obtained.
        Transport { message: String } =>
            "request failed: {message}",
        /// Non-success response carrying a recognised error envelope.
        Backend { status: u16, code: String, message: String } =>
            "{message}",
        /// Non-success response whose body is not a recognised envelope.
        UnexpectedResponse { status: u16, body: String } =>
            "unexpected response (status {status}): {body}",
    }
}

impl GatewayError {
    /// Backend-specific error code parsed from the response envelope.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Backend { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }
}

impl From<GatewayError> for CloudControllerClientError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::InvalidRequest { message } => Self::InvalidRequest { message },
            GatewayError::InvalidCertificate { message }
            | GatewayError::ClientSetup { message } => Self::InvalidRequest { message },
            GatewayError::Transport { message } => Self::Transport { message },
            GatewayError::Backend {
                status,
                code,
                message,
            } => Self::Backend {
                status,
                code,
                message,
            },
            GatewayError::UnexpectedResponse { status, body } => {
                Self::UnexpectedResponse { status, body }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for gateway-to-port error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn backend_errors_keep_code_and_message() {
        let err = GatewayError::backend(400_u16, "foo", "The foo is wrong...");
        assert_eq!(err.to_string(), "The foo is wrong...");
        assert_eq!(err.error_code(), Some("foo"));

        let mapped = CloudControllerClientError::from(err);
        assert_eq!(
            mapped,
            CloudControllerClientError::backend(400_u16, "foo", "The foo is wrong...")
        );
    }

    #[rstest]
    #[case(GatewayError::transport("tls"), "Transport")]
    #[case(GatewayError::invalid_request("bad url"), "InvalidRequest")]
    #[case(GatewayError::invalid_certificate("empty"), "InvalidRequest")]
    #[case(GatewayError::unexpected_response(500_u16, "oops"), "UnexpectedResponse")]
    fn other_errors_map_to_matching_port_categories(
        #[case] err: GatewayError,
        #[case] expected_kind: &str,
    ) {
        assert_eq!(err.error_code(), None);
        assert_eq!(CloudControllerClientError::from(err).kind(), expected_kind);
    }
}
