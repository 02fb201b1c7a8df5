//! Command execution over the [`DomainCommand`] port.
//!
//! Every command prints a progress line, then the warnings gathered by the
//! operation, then `OK` or `FAILED` with the error. Warnings are printed on
//! both paths.

use std::io::{self, Write};
use std::process::ExitCode;

use tracing::debug;

use super::CliCommand;
use super::ui::Ui;
use crate::config::Session;
use crate::domain::ports::DomainCommand;
use crate::domain::{ActorError, Domain, Outcome};

/// Result of running one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The operation succeeded and `OK` was printed.
    Succeeded,
    /// The operation or its preconditions failed and `FAILED` was printed.
    Failed,
}

impl CommandStatus {
    /// Process exit code for this status.
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Succeeded => ExitCode::SUCCESS,
            Self::Failed => ExitCode::FAILURE,
        }
    }
}

/// Run `command` against `actor`, reporting progress through `ui`.
///
/// # Errors
///
/// Returns an error only when writing to the UI fails; operation failures are
/// reported as [`CommandStatus::Failed`].
pub async fn run_command<C, O, E>(
    command: &CliCommand,
    actor: &C,
    session: &Session,
    ui: &mut Ui<O, E>,
) -> io::Result<CommandStatus>
where
    C: DomainCommand + ?Sized,
    O: Write,
    E: Write,
{
    let user = user_suffix(session);
    match command {
        CliCommand::CreateSharedDomain { domain, internal } => {
            let kind = if *internal { "internal shared" } else { "shared" };
            ui.say(format!("Creating {kind} domain {domain}{user}..."))?;
            let outcome = actor.create_shared_domain(domain, *internal).await;
            finish(ui, outcome, |_, ()| Ok(()))
        }
        CliCommand::CreatePrivateDomain { org, domain } => {
            ui.say(format!("Creating private domain {domain} for org {org}{user}..."))?;
            let outcome = actor.create_private_domain(domain, org).await;
            finish(ui, outcome, |_, ()| Ok(()))
        }
        CliCommand::SharePrivateDomain { org, domain } => {
            ui.say(format!("Sharing domain {domain} with org {org}{user}..."))?;
            let outcome = actor.share_private_domain(domain, org).await;
            finish(ui, outcome, |_, ()| Ok(()))
        }
        CliCommand::UnsharePrivateDomain { org, domain } => {
            ui.say(format!("Unsharing domain {domain} from org {org}{user}..."))?;
            let outcome = actor.unshare_private_domain(domain, org).await;
            finish(ui, outcome, |_, ()| Ok(()))
        }
        CliCommand::Domains => {
            let organization_guid = match session.target_org_guid() {
                Ok(guid) => guid,
                Err(error) => {
                    ui.failed(error)?;
                    return Ok(CommandStatus::Failed);
                }
            };
            ui.say(format!("Getting domains in org {organization_guid}{user}..."))?;
            let outcome = actor.get_organization_domains(organization_guid).await;
            finish(ui, outcome, render_domains)
        }
        CliCommand::Domain { domain } => {
            ui.say(format!("Getting info for domain {domain}{user}..."))?;
            let outcome = actor.get_domain_by_name(domain).await;
            finish(ui, outcome, render_domain)
        }
    }
}

fn user_suffix(session: &Session) -> String {
    session
        .username
        .as_deref()
        .map(|name| format!(" as {name}"))
        .unwrap_or_default()
}

fn finish<T, O, E, F>(
    ui: &mut Ui<O, E>,
    outcome: Outcome<T, ActorError>,
    render: F,
) -> io::Result<CommandStatus>
where
    O: Write,
    E: Write,
    F: FnOnce(&mut Ui<O, E>, T) -> io::Result<()>,
{
    let (result, warnings) = outcome.into_parts();
    ui.warn(&warnings)?;
    match result {
        Ok(value) => {
            ui.ok()?;
            render(ui, value)?;
            Ok(CommandStatus::Succeeded)
        }
        Err(error) => {
            debug!(
                not_found = error.is_not_found(),
                error_code = error.error_code().unwrap_or_default(),
                "command failed"
            );
            ui.failed(&error)?;
            Ok(CommandStatus::Failed)
        }
    }
}

fn availability(domain: &Domain) -> &'static str {
    if domain.is_shared() { "shared" } else { "private" }
}

fn internal_label(domain: &Domain) -> &'static str {
    if domain.internal == Some(true) { "true" } else { "" }
}

fn render_domains<O: Write, E: Write>(ui: &mut Ui<O, E>, domains: Vec<Domain>) -> io::Result<()> {
    ui.say("")?;
    if domains.is_empty() {
        return ui.say("No domains found.");
    }
    let rows = domains
        .iter()
        .map(|domain| {
            vec![
                domain.name.clone(),
                availability(domain).to_owned(),
                internal_label(domain).to_owned(),
            ]
        })
        .collect::<Vec<_>>();
    ui.table(&["name", "availability", "internal"], &rows)
}

fn render_domain<O: Write, E: Write>(ui: &mut Ui<O, E>, domain: Domain) -> io::Result<()> {
    let scope = availability(&domain);
    let internal = domain.internal.unwrap_or(false).to_string();
    let mut fields = vec![
        ("name:", domain.name),
        ("guid:", domain.guid),
        ("availability:", scope.to_owned()),
    ];
    if let Some(owner) = domain.organization_guid {
        fields.push(("owning org guid:", owner));
    }
    fields.push(("internal:", internal));

    ui.say("")?;
    for (label, value) in fields {
        ui.say(format!("{label:<17}{value}"))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
