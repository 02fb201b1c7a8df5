//! Driving port for domain management use-cases.
//!
//! Inbound adapters (the command line) call this port without knowing which
//! backend calls each operation issues, so command tests can substitute a
//! double instead of a Cloud Controller.

use async_trait::async_trait;

use crate::domain::{ActorError, Domain, Outcome};

/// Domain management operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainCommand: Send + Sync {
    /// Create a domain visible to every organization.
    async fn create_shared_domain(&self, name: &str, internal: bool) -> Outcome<(), ActorError>;

    /// Create a domain owned by the named organization.
    async fn create_private_domain(
        &self,
        name: &str,
        organization_name: &str,
    ) -> Outcome<(), ActorError>;

    /// List every domain visible to an organization.
    async fn get_organization_domains(
        &self,
        organization_guid: &str,
    ) -> Outcome<Vec<Domain>, ActorError>;

    /// Look a domain up by exact name.
    async fn get_domain_by_name(&self, name: &str) -> Outcome<Domain, ActorError>;

    /// Share a private domain with the named organization.
    async fn share_private_domain(
        &self,
        domain_name: &str,
        organization_name: &str,
    ) -> Outcome<(), ActorError>;

    /// Stop sharing a private domain with the named organization.
    async fn unshare_private_domain(
        &self,
        domain_name: &str,
        organization_name: &str,
    ) -> Outcome<(), ActorError>;
}
