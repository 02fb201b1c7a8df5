//! `cfctl` entry-point: loads the session, wires the Cloud Controller client
//! into the domain actor and runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use cfctl::config::{CliSettings, Session};
use cfctl::domain::DomainActor;
use cfctl::inbound::cli::{Cli, Ui, run_command};
use cfctl::outbound::cloud_controller::CloudControllerHttpClient;
use cfctl::outbound::gateway::{Gateway, parse_pem_bundle};
use clap::Parser;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> io::Result<ExitCode> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> io::Result<ExitCode> {
    let mut ui = Ui::stdio();
    let settings = load_settings()?;

    let session = match settings.session() {
        Ok(session) => session,
        Err(error) => {
            ui.failed(error)?;
            return Ok(ExitCode::FAILURE);
        }
    };
    let client = match build_client(&session) {
        Ok(client) => client,
        Err(message) => {
            ui.failed(message)?;
            return Ok(ExitCode::FAILURE);
        }
    };
    debug!(api = %session.api_url, "session ready");

    let actor = DomainActor::new(Arc::new(client));
    let status = run_command(&cli.command, &actor, &session, &mut ui).await?;
    ui.flush()?;
    Ok(status.exit_code())
}

fn load_settings() -> io::Result<CliSettings> {
    CliSettings::load_from_iter([OsString::from("cfctl")])
        .map_err(|error| io::Error::other(format!("load configuration: {error}")))
}

fn build_client(session: &Session) -> Result<CloudControllerHttpClient, String> {
    let mut gateway =
        Gateway::cloud_controller(session.gateway_settings()).map_err(|error| error.to_string())?;
    if let Some(pem) = session
        .read_trusted_certs()
        .map_err(|error| error.to_string())?
    {
        let certs = parse_pem_bundle(&pem).map_err(|error| error.to_string())?;
        gateway
            .set_trusted_certs(certs)
            .map_err(|error| error.to_string())?;
    }
    Ok(CloudControllerHttpClient::new(
        gateway,
        session.api_url.clone(),
        session.access_token.as_str(),
    ))
}
