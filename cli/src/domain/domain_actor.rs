//! Domain management orchestration.
//!
//! Each operation resolves human-supplied names to GUIDs, then issues the
//! primary Cloud Controller call. Calls run strictly in sequence, every
//! call's warnings are kept, and the first failure ends the operation. No
//! compensating calls are made when a later step fails.

use std::sync::Arc;

use async_trait::async_trait;
use resource_query::Query;
use tracing::debug;

use crate::domain::ports::{CloudControllerClient, DomainCommand};
use crate::domain::{ActorError, Domain, Organization, Outcome, SharedOrgs, Warnings};

/// Domain actor implementing the [`DomainCommand`] driving port.
#[derive(Clone)]
pub struct DomainActor<C> {
    client: Arc<C>,
}

impl<C> DomainActor<C> {
    /// Create an actor over the given Cloud Controller client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C> DomainActor<C>
where
    C: CloudControllerClient,
{
    async fn find_organization(
        &self,
        name: &str,
        warnings: &mut Warnings,
    ) -> Result<Organization, ActorError> {
        let organizations =
            warnings.absorb(self.client.get_organizations(vec![Query::name(name)]).await)?;
        organizations.into_iter().next().ok_or_else(|| {
            debug!(organization = name, "organization lookup matched nothing");
            ActorError::organization_not_found(name)
        })
    }

    async fn find_domain(&self, name: &str, warnings: &mut Warnings) -> Result<Domain, ActorError> {
        let domains = warnings.absorb(self.client.get_domains(vec![Query::name(name)]).await)?;
        domains.into_iter().next().ok_or_else(|| {
            debug!(domain = name, "domain lookup matched nothing");
            ActorError::domain_not_found(name)
        })
    }

    async fn create(&self, domain: Domain, warnings: &mut Warnings) -> Result<(), ActorError> {
        warnings.absorb(self.client.create_domain(&domain).await)?;
        Ok(())
    }

    async fn create_private(
        &self,
        name: &str,
        organization_name: &str,
        warnings: &mut Warnings,
    ) -> Result<(), ActorError> {
        let organization = self.find_organization(organization_name, warnings).await?;
        self.create(Domain::private(name, organization.guid), warnings)
            .await
    }

    async fn share(
        &self,
        domain_name: &str,
        organization_name: &str,
        warnings: &mut Warnings,
    ) -> Result<(), ActorError> {
        let organization = self.find_organization(organization_name, warnings).await?;
        let domain = self.find_domain(domain_name, warnings).await?;
        let shared_orgs = SharedOrgs::single(organization.guid);
        warnings.absorb(
            self.client
                .share_private_domain_to_orgs(&domain.guid, &shared_orgs)
                .await,
        )?;
        Ok(())
    }

    async fn unshare(
        &self,
        domain_name: &str,
        organization_name: &str,
        warnings: &mut Warnings,
    ) -> Result<(), ActorError> {
        let organization = self.find_organization(organization_name, warnings).await?;
        let domain = self.find_domain(domain_name, warnings).await?;
        warnings.absorb(
            self.client
                .unshare_private_domain_from_org(&domain.guid, &organization.guid)
                .await,
        )?;
        Ok(())
    }
}

#[async_trait]
impl<C> DomainCommand for DomainActor<C>
where
    C: CloudControllerClient,
{
    async fn create_shared_domain(&self, name: &str, internal: bool) -> Outcome<(), ActorError> {
        let mut warnings = Warnings::new();
        let result = self
            .create(Domain::shared(name, internal), &mut warnings)
            .await;
        Outcome::new(result, warnings)
    }

    async fn create_private_domain(
        &self,
        name: &str,
        organization_name: &str,
    ) -> Outcome<(), ActorError> {
        let mut warnings = Warnings::new();
        let result = self
            .create_private(name, organization_name, &mut warnings)
            .await;
        Outcome::new(result, warnings)
    }

    async fn get_organization_domains(
        &self,
        organization_guid: &str,
    ) -> Outcome<Vec<Domain>, ActorError> {
        let outcome = self
            .client
            .get_organization_domains(organization_guid, None)
            .await;
        let (result, warnings) = outcome.into_parts();
        match result {
            Ok(domains) => Outcome::ok(domains, warnings),
            Err(err) => Outcome::err(err.into(), warnings),
        }
    }

    async fn get_domain_by_name(&self, name: &str) -> Outcome<Domain, ActorError> {
        let mut warnings = Warnings::new();
        let result = self.find_domain(name, &mut warnings).await;
        Outcome::new(result, warnings)
    }

    async fn share_private_domain(
        &self,
        domain_name: &str,
        organization_name: &str,
    ) -> Outcome<(), ActorError> {
        let mut warnings = Warnings::new();
        let result = self
            .share(domain_name, organization_name, &mut warnings)
            .await;
        Outcome::new(result, warnings)
    }

    async fn unshare_private_domain(
        &self,
        domain_name: &str,
        organization_name: &str,
    ) -> Outcome<(), ActorError> {
        let mut warnings = Warnings::new();
        let result = self
            .unshare(domain_name, organization_name, &mut warnings)
            .await;
        Outcome::new(result, warnings)
    }
}

#[cfg(test)]
#[path = "domain_actor_tests.rs"]
mod tests;
