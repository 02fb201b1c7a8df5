//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cloud_controller_client;
mod domain_command;

#[cfg(test)]
pub use cloud_controller_client::MockCloudControllerClient;
pub use cloud_controller_client::{CloudControllerClient, CloudControllerClientError};
#[cfg(test)]
pub use domain_command::MockDomainCommand;
pub use domain_command::DomainCommand;
