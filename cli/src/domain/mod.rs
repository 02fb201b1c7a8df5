//! Domain types, ports and orchestration.
//!
//! Purpose: model the resources this client manages and compose Cloud
//! Controller calls into single logical operations. Nothing here knows about
//! HTTP; adapters live under `outbound` and `inbound`.
//!
//! Public surface:
//! - `Domain`, `Organization`, `SharedOrgs`: resources returned by the port.
//! - `Warnings`, `Outcome`: warning accumulation carried by every call.
//! - `ActorError`: failure of an orchestrated operation.
//! - `DomainActor`: implementation of the `DomainCommand` driving port.

mod domain_actor;
pub mod error;
pub mod model;
pub mod ports;
pub mod warnings;

pub use self::domain_actor::DomainActor;
pub use self::error::ActorError;
pub use self::model::{Domain, Organization, SharedOrgs};
pub use self::warnings::{Outcome, Warnings};
