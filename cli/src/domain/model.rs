//! Resources managed through the Cloud Controller.
//!
//! These types are the client's view of remote state. They are returned by
//! the Cloud Controller port and are never mutated after construction.

/// A DNS domain registered with the platform.
///
/// A domain without an owning organization is *shared* (visible to every
/// organization); one with an owner is *private*.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domain {
    /// Fully qualified domain name.
    pub name: String,
    /// Server-assigned identifier; empty until the domain has been created.
    pub guid: String,
    /// Owning organization for private domains.
    pub organization_guid: Option<String>,
    /// Internal-routing flag. `None` leaves the server default in place.
    pub internal: Option<bool>,
}

impl Domain {
    /// Request payload for a shared domain with an explicit internal flag.
    pub fn shared(name: impl Into<String>, internal: bool) -> Self {
        Self {
            name: name.into(),
            internal: Some(internal),
            ..Self::default()
        }
    }

    /// Request payload for a domain owned by `organization_guid`.
    pub fn private(name: impl Into<String>, organization_guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            organization_guid: Some(organization_guid.into()),
            ..Self::default()
        }
    }

    /// Whether the domain is visible to every organization.
    pub fn is_shared(&self) -> bool {
        self.organization_guid.is_none()
    }
}

/// An organization, used to turn a human-supplied name into a GUID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    /// Server-assigned identifier.
    pub guid: String,
    /// Unique organization name.
    pub name: String,
}

/// Organizations a private domain is shared with.
///
/// Built fresh for each share call; the client never merges it with the
/// server's existing relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedOrgs {
    /// Organization GUIDs, in request order.
    pub guids: Vec<String>,
}

impl SharedOrgs {
    /// Share relationship targeting a single organization.
    pub fn single(guid: impl Into<String>) -> Self {
        Self {
            guids: vec![guid.into()],
        }
    }
}
