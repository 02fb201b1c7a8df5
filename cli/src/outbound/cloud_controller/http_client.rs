//! Cloud Controller v3 adapter for the [`CloudControllerClient`] port.
//!
//! Builds endpoint URLs, follows pagination, decodes resources and collects
//! the `X-Cf-Warnings` header from every response, rejected ones included.
//! Transport and error-envelope handling is delegated to the [`Gateway`].

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};
use resource_query::Query;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    CreateDomainRequestDto, DomainDto, OrganizationDto, PageDto, ToManyRelationshipDto,
};
use crate::domain::ports::{CloudControllerClient, CloudControllerClientError};
use crate::domain::{Domain, Organization, Outcome, SharedOrgs, Warnings};
use crate::outbound::gateway::{Gateway, GatewayResponse};

/// `X-Cf-Warnings`: comma-separated, form-encoded warning messages.
pub const WARNINGS_HEADER: &str = "x-cf-warnings";

/// Most pages one listing follows before giving up.
const MAX_PAGES: usize = 500;

/// HTTP client for one Cloud Controller API endpoint and access token.
pub struct CloudControllerHttpClient {
    gateway: Gateway,
    api_url: Url,
    token: String,
}

impl CloudControllerHttpClient {
    /// Client for the API rooted at `api_url`, authorised with `token`.
    pub fn new(gateway: Gateway, api_url: Url, token: impl Into<String>) -> Self {
        Self {
            gateway,
            api_url,
            token: token.into(),
        }
    }

    fn endpoint(
        &self,
        segments: &[&str],
        queries: &[Query],
    ) -> Result<Url, CloudControllerClientError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CloudControllerClientError::invalid_request(format!(
                    "{} cannot be used as an API base URL",
                    self.api_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        resource_query::append_to_url(&mut url, queries);
        Ok(url)
    }

    async fn exchange<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        warnings: &mut Warnings,
    ) -> Result<GatewayResponse, CloudControllerClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let request = self.gateway.new_request(method, url, &self.token, body)?;
        match self.gateway.perform_request(request).await {
            Ok(response) => {
                warnings.extend(decode_warnings(&response.headers));
                Ok(response)
            }
            Err(failure) => {
                warnings.extend(decode_warnings(&failure.headers));
                Err(failure.error.into())
            }
        }
    }

    async fn list<D, R>(
        &self,
        url: Url,
        warnings: &mut Warnings,
    ) -> Result<Vec<R>, CloudControllerClientError>
    where
        D: DeserializeOwned + Send,
        R: From<D> + Send,
    {
        let mut resources = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(url.clone());
        while let Some(page_url) = next.take() {
            if visited.len() == MAX_PAGES {
                return Err(CloudControllerClientError::decode(format!(
                    "listing {url} exceeded {MAX_PAGES} pages"
                )));
            }
            if !visited.insert(page_url.clone()) {
                return Err(CloudControllerClientError::decode(format!(
                    "pagination loops back to {page_url}"
                )));
            }
            let response = self
                .exchange::<()>(Method::GET, page_url.as_str(), None, warnings)
                .await?;
            let page: PageDto<D> = decode(&response.body)?;
            resources.extend(page.resources.into_iter().map(R::from));
            next = page
                .pagination
                .next
                .map(|link| self.next_page(&link.href))
                .transpose()?;
        }
        debug!(%url, pages = visited.len(), count = resources.len(), "listed resources");
        Ok(resources)
    }

    /// Resolve a `next` link. Links must stay on the API's origin.
    fn next_page(&self, href: &str) -> Result<Url, CloudControllerClientError> {
        let url = self.api_url.join(href).map_err(|error| {
            CloudControllerClientError::decode(format!("invalid next link {href}: {error}"))
        })?;
        if url.origin() != self.api_url.origin() {
            return Err(CloudControllerClientError::decode(format!(
                "next link {href} leaves {}",
                self.api_url.origin().ascii_serialization()
            )));
        }
        Ok(url)
    }

    async fn create(
        &self,
        domain: &Domain,
        warnings: &mut Warnings,
    ) -> Result<Domain, CloudControllerClientError> {
        let url = self.endpoint(&["v3", "domains"], &[])?;
        let body = CreateDomainRequestDto::from(domain);
        let response = self
            .exchange(Method::POST, url.as_str(), Some(&body), warnings)
            .await?;
        let created: DomainDto = decode(&response.body)?;
        Ok(created.into())
    }

    async fn share(
        &self,
        domain_guid: &str,
        shared_orgs: &SharedOrgs,
        warnings: &mut Warnings,
    ) -> Result<(), CloudControllerClientError> {
        let url = self.endpoint(
            &["v3", "domains", domain_guid, "relationships", "shared_organizations"],
            &[],
        )?;
        let body = ToManyRelationshipDto::from(shared_orgs);
        self.exchange(Method::POST, url.as_str(), Some(&body), warnings)
            .await?;
        Ok(())
    }

    async fn unshare(
        &self,
        domain_guid: &str,
        organization_guid: &str,
        warnings: &mut Warnings,
    ) -> Result<(), CloudControllerClientError> {
        let url = self.endpoint(
            &[
                "v3",
                "domains",
                domain_guid,
                "relationships",
                "shared_organizations",
                organization_guid,
            ],
            &[],
        )?;
        self.exchange::<()>(Method::DELETE, url.as_str(), None, warnings)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CloudControllerClient for CloudControllerHttpClient {
    async fn create_domain(&self, domain: &Domain) -> Outcome<Domain, CloudControllerClientError> {
        let mut warnings = Warnings::new();
        let result = self.create(domain, &mut warnings).await;
        Outcome::new(result, warnings)
    }

    async fn get_organizations(
        &self,
        queries: Vec<Query>,
    ) -> Outcome<Vec<Organization>, CloudControllerClientError> {
        let mut warnings = Warnings::new();
        let result = match self.endpoint(&["v3", "organizations"], &queries) {
            Ok(url) => {
                self.list::<OrganizationDto, Organization>(url, &mut warnings)
                    .await
            }
            Err(err) => Err(err),
        };
        Outcome::new(result, warnings)
    }

    async fn get_domains(
        &self,
        queries: Vec<Query>,
    ) -> Outcome<Vec<Domain>, CloudControllerClientError> {
        let mut warnings = Warnings::new();
        let result = match self.endpoint(&["v3", "domains"], &queries) {
            Ok(url) => self.list::<DomainDto, Domain>(url, &mut warnings).await,
            Err(err) => Err(err),
        };
        Outcome::new(result, warnings)
    }

    async fn get_organization_domains(
        &self,
        organization_guid: &str,
        query: Option<Query>,
    ) -> Outcome<Vec<Domain>, CloudControllerClientError> {
        let mut warnings = Warnings::new();
        let queries: Vec<Query> = query.into_iter().collect();
        let result = match self.endpoint(
            &["v3", "organizations", organization_guid, "domains"],
            &queries,
        ) {
            Ok(url) => self.list::<DomainDto, Domain>(url, &mut warnings).await,
            Err(err) => Err(err),
        };
        Outcome::new(result, warnings)
    }

    async fn share_private_domain_to_orgs(
        &self,
        domain_guid: &str,
        shared_orgs: &SharedOrgs,
    ) -> Outcome<(), CloudControllerClientError> {
        let mut warnings = Warnings::new();
        let result = self.share(domain_guid, shared_orgs, &mut warnings).await;
        Outcome::new(result, warnings)
    }

    async fn unshare_private_domain_from_org(
        &self,
        domain_guid: &str,
        organization_guid: &str,
    ) -> Outcome<(), CloudControllerClientError> {
        let mut warnings = Warnings::new();
        let result = self
            .unshare(domain_guid, organization_guid, &mut warnings)
            .await;
        Outcome::new(result, warnings)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, CloudControllerClientError> {
    serde_json::from_slice(body)
        .map_err(|error| CloudControllerClientError::decode(error.to_string()))
}

/// Decode every warning carried by the response headers, in order.
pub fn decode_warnings(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(WARNINGS_HEADER)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(decode_warning)
        .collect()
}

/// Form-decode one entry as a single value.
///
/// Literal `&` and `=` are escaped first so the form parser yields exactly one
/// key and leaves those characters in the text.
fn decode_warning(entry: &str) -> String {
    let literal = entry.replace('&', "%26").replace('=', "%3D");
    url::form_urlencoded::parse(literal.as_bytes())
        .next()
        .map(|(text, _)| text.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "http_client_tests.rs"]
mod tests;
