//! Driven port for the Cloud Controller resource API.
//!
//! The orchestration layer depends only on this contract. Every method
//! returns an [`Outcome`] so warnings reach the caller whether the call
//! succeeded or not.

use async_trait::async_trait;
use resource_query::Query;

use super::define_port_error;
use crate::domain::{Domain, Organization, Outcome, SharedOrgs};

define_port_error! {
    /// Errors surfaced by a Cloud Controller client.
    pub enum CloudControllerClientError {
        /// The request could not be built (bad URL, unserialisable body).
        InvalidRequest { message: String } =>
            "invalid request: {message}",
        /// No response was obtained (connection, TLS trust, timeout).
        Transport { message: String } =>
            "request failed: {message}",
        /// The server answered with a recognised error envelope.
        Backend { status: u16, code: String, message: String } =>
            "{message}",
        /// The server answered with a non-success status and an unrecognised body.
        UnexpectedResponse { status: u16, body: String } =>
            "unexpected response (status {status}): {body}",
        /// A success response could not be decoded.
        Decode { message: String } =>
            "could not decode response: {message}",
    }
}

impl CloudControllerClientError {
    /// Backend-specific error code, when the server supplied one.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Backend { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }
}

/// Port for the Cloud Controller operations the domain actor composes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CloudControllerClient: Send + Sync {
    /// Create a domain and return the server's representation of it.
    async fn create_domain(&self, domain: &Domain) -> Outcome<Domain, CloudControllerClientError>;

    /// List organizations matching every query.
    async fn get_organizations(
        &self,
        queries: Vec<Query>,
    ) -> Outcome<Vec<Organization>, CloudControllerClientError>;

    /// List domains matching every query.
    async fn get_domains(
        &self,
        queries: Vec<Query>,
    ) -> Outcome<Vec<Domain>, CloudControllerClientError>;

    /// List the domains visible to one organization, optionally filtered.
    async fn get_organization_domains(
        &self,
        organization_guid: &str,
        query: Option<Query>,
    ) -> Outcome<Vec<Domain>, CloudControllerClientError>;

    /// Share a private domain with the given organizations.
    async fn share_private_domain_to_orgs(
        &self,
        domain_guid: &str,
        shared_orgs: &SharedOrgs,
    ) -> Outcome<(), CloudControllerClientError>;

    /// Remove one organization from a private domain's share relationship.
    async fn unshare_private_domain_from_org(
        &self,
        domain_guid: &str,
        organization_guid: &str,
    ) -> Outcome<(), CloudControllerClientError>;
}
