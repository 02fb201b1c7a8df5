//! Domain management client library for a Cloud Foundry style control plane.
//!
//! - `domain`: resources, ports and the orchestrating actor.
//! - `outbound`: HTTP gateway and Cloud Controller adapter.
//! - `inbound`: command-line surface.
//! - `config`: settings and session validation.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
