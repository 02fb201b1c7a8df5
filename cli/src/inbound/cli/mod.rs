//! Command-line surface for domain management.

mod commands;
mod ui;

use clap::{Parser, Subcommand};

pub use commands::{CommandStatus, run_command};
pub use ui::Ui;

/// `cfctl` command arguments.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "cfctl",
    about = "Manage shared and private domains on a Cloud Foundry API",
    version
)]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Domain operations, one per subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Create a domain that every organization can use.
    CreateSharedDomain {
        /// Domain name, e.g. `apps.example.com`.
        domain: String,
        /// Restrict the domain to internal routes.
        #[arg(long)]
        internal: bool,
    },
    /// Create a domain owned by one organization.
    CreatePrivateDomain {
        /// Owning organization name.
        org: String,
        /// Domain name.
        domain: String,
    },
    /// Share a private domain with another organization.
    SharePrivateDomain {
        /// Organization to share with.
        org: String,
        /// Private domain name.
        domain: String,
    },
    /// Unshare a private domain with an org.
    #[command(after_help = "SEE ALSO:\n   delete-domain, domains")]
    UnsharePrivateDomain {
        /// Organization to remove.
        org: String,
        /// Private domain name.
        domain: String,
    },
    /// List the domains available to the targeted organization.
    Domains,
    /// Show one domain.
    Domain {
        /// Domain name.
        domain: String,
    },
}
