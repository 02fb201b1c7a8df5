//! Errors reported by the domain actor.
//!
//! Not-found conditions are application errors raised when a lookup
//! succeeds but matches nothing. Backend failures pass through unchanged so
//! callers see the server's own code and message.

use thiserror::Error;

use crate::domain::ports::CloudControllerClientError;

/// Failure of one orchestrated operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActorError {
    /// No organization has the requested name.
    #[error("Organization '{name}' not found.")]
    OrganizationNotFound {
        /// Name that was looked up.
        name: String,
    },

    /// No domain has the requested name.
    #[error("Domain '{name}' not found.")]
    DomainNotFound {
        /// Name that was looked up.
        name: String,
    },

    /// A Cloud Controller call failed.
    #[error(transparent)]
    CloudController(#[from] CloudControllerClientError),
}

impl ActorError {
    /// Convenience constructor for [`ActorError::OrganizationNotFound`].
    pub fn organization_not_found(name: impl Into<String>) -> Self {
        Self::OrganizationNotFound { name: name.into() }
    }

    /// Convenience constructor for [`ActorError::DomainNotFound`].
    pub fn domain_not_found(name: impl Into<String>) -> Self {
        Self::DomainNotFound { name: name.into() }
    }

    /// Whether the error is an application-level not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::OrganizationNotFound { .. } | Self::DomainNotFound { .. }
        )
    }

    /// Backend error code, when the failure came from the server.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::CloudController(err) => err.error_code(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_errors_name_the_missing_resource() {
        let err = ActorError::organization_not_found("my-org");
        assert_eq!(err.to_string(), "Organization 'my-org' not found.");
        assert!(err.is_not_found());
        assert_eq!(err.error_code(), None);

        let err = ActorError::domain_not_found("example.com");
        assert_eq!(err.to_string(), "Domain 'example.com' not found.");
    }

    #[test]
    fn backend_errors_pass_through_verbatim() {
        let err = ActorError::from(CloudControllerClientError::backend(
            400_u16,
            "foo",
            "The foo is wrong...",
        ));
        assert_eq!(err.to_string(), "The foo is wrong...");
        assert_eq!(err.error_code(), Some("foo"));
        assert!(!err.is_not_found());
    }
}
