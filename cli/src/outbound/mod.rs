//! Outbound adapters: the HTTP gateway and the Cloud Controller client
//! built on it.

pub mod cloud_controller;
pub mod gateway;
