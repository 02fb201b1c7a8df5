//! Client configuration loaded via OrthoConfig.
//!
//! Settings come from `CF_*` environment variables and configuration files.
//! Command arguments are parsed separately by the CLI, so the loader is fed
//! the program name only.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cap_std::{ambient_authority, fs::Dir};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::gateway::GatewaySettings;

/// Raw settings, as configured.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CF")]
pub struct CliSettings {
    /// Cloud Controller API endpoint, e.g. `https://api.example.com`.
    pub api_endpoint: Option<String>,
    /// OAuth access token, with or without its `bearer` scheme.
    pub access_token: Option<String>,
    /// Name of the logged-in user, shown in progress messages.
    pub username: Option<String>,
    /// GUID of the targeted organization.
    pub target_org_guid: Option<String>,
    /// PEM bundle of extra certificate authorities to trust.
    pub trusted_certs: Option<PathBuf>,
    /// Whole-request timeout in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_secs: u64,
}

/// Why no usable session could be derived from the settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No non-blank access token is configured.
    #[error("Not logged in. Use 'cfctl login' to log in.")]
    NotLoggedIn,
    /// No API endpoint is configured.
    #[error("No API endpoint set. Use 'cfctl api' to set an endpoint.")]
    NoApiEndpoint,
    /// The API endpoint is not an absolute http(s) URL.
    #[error("Invalid API endpoint '{endpoint}': {message}")]
    InvalidApiEndpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// Parse failure.
        message: String,
    },
    /// The command needs a targeted organization and none is set.
    #[error("No org targeted, use 'cfctl target -o ORG' to target an org.")]
    NoTargetedOrganization,
    /// The trust bundle could not be read.
    #[error("Could not read trusted certificates from '{path}': {message}")]
    TrustedCerts {
        /// Configured bundle path.
        path: String,
        /// I/O failure.
        message: String,
    },
}

/// Validated connection details for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Base URL of the Cloud Controller API.
    pub api_url: Url,
    /// Trimmed access token.
    pub access_token: String,
    /// Logged-in user, when known.
    pub username: Option<String>,
    /// Targeted organization GUID, when set.
    pub target_org_guid: Option<String>,
    /// Extra trust bundle path.
    pub trusted_certs: Option<PathBuf>,
    /// Whole-request timeout, at least one second.
    pub timeout: Duration,
}

impl CliSettings {
    /// Validate the settings into a [`Session`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] without a non-blank access token,
    /// and an endpoint error when the API endpoint is missing or malformed.
    pub fn session(&self) -> Result<Session, SessionError> {
        let access_token =
            non_blank(self.access_token.as_deref()).ok_or(SessionError::NotLoggedIn)?;
        let endpoint =
            non_blank(self.api_endpoint.as_deref()).ok_or(SessionError::NoApiEndpoint)?;
        Ok(Session {
            api_url: parse_api_endpoint(endpoint)?,
            access_token: access_token.to_owned(),
            username: non_blank(self.username.as_deref()).map(str::to_owned),
            target_org_guid: non_blank(self.target_org_guid.as_deref()).map(str::to_owned),
            trusted_certs: self.trusted_certs.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        })
    }
}

impl Session {
    /// Gateway settings derived from this session.
    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            timeout: self.timeout,
            ..GatewaySettings::default()
        }
    }

    /// GUID of the targeted organization.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoTargetedOrganization`] when none is set.
    pub fn target_org_guid(&self) -> Result<&str, SessionError> {
        self.target_org_guid
            .as_deref()
            .ok_or(SessionError::NoTargetedOrganization)
    }

    /// Read the configured trust bundle, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::TrustedCerts`] when the file cannot be read.
    pub fn read_trusted_certs(&self) -> Result<Option<Vec<u8>>, SessionError> {
        let Some(path) = self.trusted_certs.as_deref() else {
            return Ok(None);
        };
        read_file(path)
            .map(Some)
            .map_err(|error| SessionError::TrustedCerts {
                path: path.display().to_string(),
                message: error.to_string(),
            })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_api_endpoint(endpoint: &str) -> Result<Url, SessionError> {
    let candidate = if endpoint.contains("://") {
        endpoint.to_owned()
    } else {
        format!("https://{endpoint}")
    };
    let url = Url::parse(&candidate).map_err(|error| SessionError::InvalidApiEndpoint {
        endpoint: endpoint.to_owned(),
        message: error.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(SessionError::InvalidApiEndpoint {
            endpoint: endpoint.to_owned(),
            message: "expected an http or https URL".to_owned(),
        });
    }
    Ok(url)
}

fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path must include a file name")
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    directory.read(Path::new(file_name))
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing and session validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const ALL_VARS: [&str; 6] = [
        "CF_API_ENDPOINT",
        "CF_ACCESS_TOKEN",
        "CF_USERNAME",
        "CF_TARGET_ORG_GUID",
        "CF_TRUSTED_CERTS",
        "CF_REQUEST_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> CliSettings {
        CliSettings::load_from_iter([OsString::from("cfctl")]).expect("config should load")
    }

    fn settings(endpoint: Option<&str>, token: Option<&str>) -> CliSettings {
        CliSettings {
            api_endpoint: endpoint.map(str::to_owned),
            access_token: token.map(str::to_owned),
            username: None,
            target_org_guid: None,
            trusted_certs: None,
            request_timeout_secs: 30,
        }
    }

    #[rstest]
    fn missing_values_leave_settings_empty() {
        let _guard = lock_env(ALL_VARS.map(|name| (name, None::<String>)));

        let loaded = load_from_empty_args();
        assert!(loaded.api_endpoint.is_none());
        assert!(loaded.access_token.is_none());
        assert_eq!(loaded.request_timeout_secs, 30);
        assert_eq!(loaded.session(), Err(SessionError::NotLoggedIn));
    }

    #[rstest]
    fn environment_values_build_a_session() {
        let _guard = lock_env([
            ("CF_API_ENDPOINT", Some("https://api.example.com".to_owned())),
            ("CF_ACCESS_TOKEN", Some("some-token".to_owned())),
            ("CF_USERNAME", Some("admin".to_owned())),
            ("CF_TARGET_ORG_GUID", Some("org-guid".to_owned())),
            ("CF_TRUSTED_CERTS", Some("/tmp/cfctl-ca.pem".to_owned())),
            ("CF_REQUEST_TIMEOUT_SECS", Some("5".to_owned())),
        ]);

        let session = load_from_empty_args().session().expect("session is valid");
        assert_eq!(session.api_url.as_str(), "https://api.example.com/");
        assert_eq!(session.access_token, "some-token");
        assert_eq!(session.username.as_deref(), Some("admin"));
        assert_eq!(session.target_org_guid(), Ok("org-guid"));
        assert_eq!(session.trusted_certs, Some(PathBuf::from("/tmp/cfctl-ca.pem")));
        assert_eq!(session.gateway_settings().timeout, Duration::from_secs(5));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn blank_tokens_mean_not_logged_in(#[case] token: Option<&str>) {
        let err = settings(Some("https://api.example.com"), token)
            .session()
            .expect_err("no usable token");
        assert_eq!(err, SessionError::NotLoggedIn);
        assert_eq!(err.to_string(), "Not logged in. Use 'cfctl login' to log in.");
    }

    #[rstest]
    fn missing_endpoint_is_reported_after_login_check() {
        let err = settings(None, Some("t")).session().expect_err("no endpoint");
        assert_eq!(err, SessionError::NoApiEndpoint);
    }

    #[rstest]
    #[case("api.example.com", "https://api.example.com/")]
    #[case("http://localhost:9022", "http://localhost:9022/")]
    #[case("https://example.com/cf/", "https://example.com/cf/")]
    fn endpoints_default_to_https(#[case] endpoint: &str, #[case] expected: &str) {
        let session = settings(Some(endpoint), Some("t"))
            .session()
            .expect("endpoint is valid");
        assert_eq!(session.api_url.as_str(), expected);
        assert_eq!(session.timeout, Duration::from_secs(30));
    }

    #[rstest]
    #[case("https://")]
    #[case("ftp://files.example.com")]
    fn malformed_endpoints_are_rejected(#[case] endpoint: &str) {
        let err = settings(Some(endpoint), Some("t"))
            .session()
            .expect_err("endpoint is invalid");
        assert!(matches!(err, SessionError::InvalidApiEndpoint { .. }), "{err:?}");
    }

    #[rstest]
    fn missing_target_is_reported() {
        let session = settings(Some("https://api.example.com"), Some("t"))
            .session()
            .expect("session is valid");
        assert_eq!(
            session.target_org_guid(),
            Err(SessionError::NoTargetedOrganization)
        );
    }

    #[rstest]
    fn trusted_certs_are_read_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("ca.pem");
        std::fs::write(&path, b"-----BEGIN CERTIFICATE-----\n").expect("write bundle");

        let mut session = settings(Some("https://api.example.com"), Some("t"))
            .session()
            .expect("session is valid");
        assert_eq!(session.read_trusted_certs(), Ok(None));

        session.trusted_certs = Some(path);
        assert_eq!(
            session.read_trusted_certs(),
            Ok(Some(b"-----BEGIN CERTIFICATE-----\n".to_vec()))
        );

        session.trusted_certs = Some(dir.path().join("missing.pem"));
        assert!(matches!(
            session.read_trusted_certs(),
            Err(SessionError::TrustedCerts { .. })
        ));
    }
}
