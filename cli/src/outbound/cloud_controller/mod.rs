//! Cloud Controller v3 adapter.

mod dto;
mod http_client;

pub use http_client::{CloudControllerHttpClient, WARNINGS_HEADER, decode_warnings};
