//! Tests for command execution and output.

use std::time::Duration;

use rstest::{fixture, rstest};
use url::Url;

use super::*;
use crate::domain::Warnings;
use crate::domain::ports::{CloudControllerClientError, MockDomainCommand};

#[fixture]
fn session() -> Session {
    Session {
        api_url: Url::parse("https://api.example.com").expect("valid url"),
        access_token: "some-token".to_owned(),
        username: Some("admin".to_owned()),
        target_org_guid: Some("org-guid".to_owned()),
        trusted_certs: None,
        timeout: Duration::from_secs(30),
    }
}

fn warnings(values: &[&str]) -> Warnings {
    values.iter().copied().collect()
}

struct Captured {
    status: CommandStatus,
    out: String,
    err: String,
}

async fn run(command: CliCommand, actor: &MockDomainCommand, session: &Session) -> Captured {
    let mut ui = Ui::new(Vec::new(), Vec::new());
    let status = run_command(&command, actor, session, &mut ui)
        .await
        .expect("in-memory writes succeed");
    let (out, err) = ui.into_parts();
    Captured {
        status,
        out: String::from_utf8(out).expect("utf-8 stdout"),
        err: String::from_utf8(err).expect("utf-8 stderr"),
    }
}

#[rstest]
#[tokio::test]
async fn unshare_reports_progress_warnings_and_ok(session: Session) {
    let mut actor = MockDomainCommand::new();
    actor
        .expect_unshare_private_domain()
        .withf(|domain: &str, org: &str| domain == "private.example.com" && org == "other-org")
        .times(1)
        .return_once(|_, _| Outcome::ok((), warnings(&["unshare-warning"])));

    let captured = run(
        CliCommand::UnsharePrivateDomain {
            org: "other-org".to_owned(),
            domain: "private.example.com".to_owned(),
        },
        &actor,
        &session,
    )
    .await;

    assert_eq!(captured.status, CommandStatus::Succeeded);
    assert_eq!(
        captured.out,
        "Unsharing domain private.example.com from org other-org as admin...\nOK\n"
    );
    assert_eq!(captured.err, "unshare-warning\n");
}

#[rstest]
#[tokio::test]
async fn failures_print_warnings_then_the_error(session: Session) {
    let mut actor = MockDomainCommand::new();
    actor
        .expect_share_private_domain()
        .times(1)
        .return_once(|_, _| {
            Outcome::err(
                ActorError::organization_not_found("missing-org"),
                warnings(&["get-orgs-warning"]),
            )
        });

    let captured = run(
        CliCommand::SharePrivateDomain {
            org: "missing-org".to_owned(),
            domain: "private.example.com".to_owned(),
        },
        &actor,
        &session,
    )
    .await;

    assert_eq!(captured.status, CommandStatus::Failed);
    assert_eq!(
        captured.out,
        "Sharing domain private.example.com with org missing-org as admin...\n"
    );
    assert_eq!(
        captured.err,
        "get-orgs-warning\nFAILED\nOrganization 'missing-org' not found.\n"
    );
}

#[rstest]
#[case(false, "Creating shared domain apps.example.com as admin...")]
#[case(true, "Creating internal shared domain apps.example.com as admin...")]
#[tokio::test]
async fn create_shared_domain_passes_the_internal_flag(
    session: Session,
    #[case] internal: bool,
    #[case] progress: &str,
) {
    let mut actor = MockDomainCommand::new();
    actor
        .expect_create_shared_domain()
        .withf(move |name: &str, flag: &bool| name == "apps.example.com" && *flag == internal)
        .times(1)
        .return_once(|_, _| Outcome::ok((), Warnings::new()));

    let captured = run(
        CliCommand::CreateSharedDomain {
            domain: "apps.example.com".to_owned(),
            internal,
        },
        &actor,
        &session,
    )
    .await;

    assert_eq!(captured.status, CommandStatus::Succeeded);
    assert_eq!(captured.out, format!("{progress}\nOK\n"));
    assert!(captured.err.is_empty());
}

#[rstest]
#[tokio::test]
async fn backend_errors_show_the_server_message(session: Session) {
    let mut actor = MockDomainCommand::new();
    actor
        .expect_create_private_domain()
        .withf(|name: &str, org: &str| name == "private.example.com" && org == "my-org")
        .times(1)
        .return_once(|_, _| {
            Outcome::err(
                ActorError::from(CloudControllerClientError::backend(
                    422_u16,
                    "CF-UnprocessableEntity",
                    "The domain name is taken",
                )),
                Warnings::new(),
            )
        });

    let captured = run(
        CliCommand::CreatePrivateDomain {
            org: "my-org".to_owned(),
            domain: "private.example.com".to_owned(),
        },
        &actor,
        &session,
    )
    .await;

    assert_eq!(captured.status, CommandStatus::Failed);
    assert_eq!(captured.err, "FAILED\nThe domain name is taken\n");
}

#[rstest]
#[tokio::test]
async fn domains_lists_the_targeted_organization(session: Session) {
    let mut actor = MockDomainCommand::new();
    actor
        .expect_get_organization_domains()
        .withf(|guid: &str| guid == "org-guid")
        .times(1)
        .return_once(|_| {
            Outcome::ok(
                vec![
                    Domain::shared("apps.example.com", false),
                    Domain::shared("apps.internal", true),
                    Domain::private("mine.example.com", "org-guid"),
                ],
                warnings(&["list-warning"]),
            )
        });

    let captured = run(CliCommand::Domains, &actor, &session).await;

    assert_eq!(captured.status, CommandStatus::Succeeded);
    assert_eq!(
        captured.out,
        "Getting domains in org org-guid as admin...\n\
         OK\n\
         \n\
         name               availability   internal\n\
         apps.example.com   shared\n\
         apps.internal      shared         true\n\
         mine.example.com   private\n"
    );
    assert_eq!(captured.err, "list-warning\n");
}

#[rstest]
#[tokio::test]
async fn domains_requires_a_targeted_organization(mut session: Session) {
    session.target_org_guid = None;
    let mut actor = MockDomainCommand::new();
    actor.expect_get_organization_domains().times(0);

    let captured = run(CliCommand::Domains, &actor, &session).await;

    assert_eq!(captured.status, CommandStatus::Failed);
    assert!(captured.out.is_empty());
    assert_eq!(
        captured.err,
        "FAILED\nNo org targeted, use 'cfctl target -o ORG' to target an org.\n"
    );
}

#[rstest]
#[tokio::test]
async fn domain_shows_one_domain_without_username(mut session: Session) {
    session.username = None;
    let mut actor = MockDomainCommand::new();
    actor
        .expect_get_domain_by_name()
        .withf(|name: &str| name == "mine.example.com")
        .times(1)
        .return_once(|_| {
            Outcome::ok(
                Domain {
                    guid: "domain-guid".to_owned(),
                    ..Domain::private("mine.example.com", "org-guid")
                },
                Warnings::new(),
            )
        });

    let captured = run(
        CliCommand::Domain {
            domain: "mine.example.com".to_owned(),
        },
        &actor,
        &session,
    )
    .await;

    assert_eq!(captured.status, CommandStatus::Succeeded);
    assert_eq!(
        captured.out,
        "Getting info for domain mine.example.com...\n\
         OK\n\
         \n\
         name:            mine.example.com\n\
         guid:            domain-guid\n\
         availability:    private\n\
         owning org guid: org-guid\n\
         internal:        false\n"
    );
}
