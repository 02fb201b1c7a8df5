//! HTTP gateway shared by backend clients.

mod envelope;
mod error;
mod http_gateway;

pub use envelope::ErrorEnvelope;
pub use error::GatewayError;
pub use http_gateway::{
    Gateway, GatewayFailure, GatewayRequest, GatewayResponse, GatewaySettings, parse_pem_bundle,
};
