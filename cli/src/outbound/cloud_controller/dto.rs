//! Cloud Controller v3 wire formats.

use serde::{Deserialize, Serialize};

use crate::domain::{Domain, Organization, SharedOrgs};

/// One page of a v3 list endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct PageDto<T> {
    #[serde(default)]
    pub(super) pagination: PaginationDto,
    #[serde(default = "Vec::new")]
    pub(super) resources: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PaginationDto {
    #[serde(default)]
    pub(super) next: Option<LinkDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LinkDto {
    pub(super) href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct GuidDto {
    pub(super) guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct ToOneRelationshipDto {
    pub(super) data: Option<GuidDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct DomainRelationshipsDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) organization: Option<ToOneRelationshipDto>,
}

/// Body of `POST /v3/domains`.
///
/// Unset optional fields are omitted so the server applies its defaults.
#[derive(Debug, Serialize)]
pub(super) struct CreateDomainRequestDto<'a> {
    pub(super) name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) internal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) relationships: Option<DomainRelationshipsDto>,
}

impl<'a> From<&'a Domain> for CreateDomainRequestDto<'a> {
    fn from(domain: &'a Domain) -> Self {
        let relationships = domain
            .organization_guid
            .as_ref()
            .map(|guid| DomainRelationshipsDto {
                organization: Some(ToOneRelationshipDto {
                    data: Some(GuidDto { guid: guid.clone() }),
                }),
            });
        Self {
            name: &domain.name,
            internal: domain.internal,
            relationships,
        }
    }
}

/// Domain resource as returned by the server.
#[derive(Debug, Deserialize)]
pub(super) struct DomainDto {
    #[serde(default)]
    guid: String,
    name: String,
    #[serde(default)]
    internal: Option<bool>,
    #[serde(default)]
    relationships: DomainRelationshipsDto,
}

impl From<DomainDto> for Domain {
    fn from(dto: DomainDto) -> Self {
        let organization_guid = dto
            .relationships
            .organization
            .and_then(|relationship| relationship.data)
            .map(|data| data.guid);
        Self {
            name: dto.name,
            guid: dto.guid,
            organization_guid,
            internal: dto.internal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OrganizationDto {
    guid: String,
    name: String,
}

impl From<OrganizationDto> for Organization {
    fn from(dto: OrganizationDto) -> Self {
        Self {
            guid: dto.guid,
            name: dto.name,
        }
    }
}

/// Body of `POST /v3/domains/:guid/relationships/shared_organizations`.
#[derive(Debug, Serialize)]
pub(super) struct ToManyRelationshipDto {
    data: Vec<GuidDto>,
}

impl From<&SharedOrgs> for ToManyRelationshipDto {
    fn from(shared_orgs: &SharedOrgs) -> Self {
        Self {
            data: shared_orgs
                .guids
                .iter()
                .map(|guid| GuidDto { guid: guid.clone() })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Wire-shape coverage for domain and relationship bodies.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Domain::shared("shared.example.com", true), json!({
        "name": "shared.example.com",
        "internal": true,
    }))]
    #[case(Domain::private("private.example.com", "org-guid"), json!({
        "name": "private.example.com",
        "relationships": { "organization": { "data": { "guid": "org-guid" } } },
    }))]
    #[case(Domain { name: "bare.example.com".to_owned(), ..Domain::default() }, json!({
        "name": "bare.example.com",
    }))]
    fn create_requests_omit_unset_fields(
        #[case] domain: Domain,
        #[case] expected: serde_json::Value,
    ) {
        let body = serde_json::to_value(CreateDomainRequestDto::from(&domain))
            .expect("request serialises");
        assert_eq!(body, expected);
    }

    #[rstest]
    fn responses_map_back_to_domains() {
        let payload = json!({
            "guid": "domain-guid",
            "name": "private.example.com",
            "internal": false,
            "created_at": "2024-01-01T00:00:00Z",
            "relationships": {
                "organization": { "data": { "guid": "org-guid" } },
                "shared_organizations": { "data": [] }
            }
        });
        let dto: DomainDto = serde_json::from_value(payload).expect("response decodes");
        assert_eq!(
            Domain::from(dto),
            Domain {
                name: "private.example.com".to_owned(),
                guid: "domain-guid".to_owned(),
                organization_guid: Some("org-guid".to_owned()),
                internal: Some(false),
            }
        );
    }

    #[rstest]
    fn shared_domains_have_null_organization_data() {
        let payload = json!({
            "guid": "domain-guid",
            "name": "shared.example.com",
            "relationships": { "organization": { "data": null } }
        });
        let dto: DomainDto = serde_json::from_value(payload).expect("response decodes");
        let domain = Domain::from(dto);
        assert!(domain.is_shared());
        assert_eq!(domain.internal, None);
    }

    #[rstest]
    fn shared_orgs_serialise_as_guid_list() {
        let shared = SharedOrgs {
            guids: vec!["org-1".to_owned(), "org-2".to_owned()],
        };
        let body = serde_json::to_value(ToManyRelationshipDto::from(&shared))
            .expect("relationship serialises");
        assert_eq!(body, json!({ "data": [{ "guid": "org-1" }, { "guid": "org-2" }] }));
    }

    #[rstest]
    fn pages_default_to_no_next_link() {
        let page: PageDto<OrganizationDto> =
            serde_json::from_value(json!({ "resources": [{ "guid": "g", "name": "n" }] }))
                .expect("page decodes");
        assert!(page.pagination.next.is_none());
        assert_eq!(page.resources.len(), 1);
    }
}
