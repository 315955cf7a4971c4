//! Decision-table tests for BaseClient.
//!
//! Tests cover:
//! - AJAX, forbidden, forced-direct and indirect redirect branches
//! - Deferred provider redirect on the callback
//! - Attempt tracking through credential retrieval
//! - Profile resolution outcomes and fault propagation
//! - Cancellation while a provider call is in flight

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use warden_client::test_utils::{HeaderProtocol, ParameterProtocol, SlowProtocol};
use warden_client::{BaseClient, ClientConfig, Protocol};
use warden_core::test_utils::{AttributeProfileBuilder, MemoryContext, StaticAuthenticator};
use warden_core::*;

const PROVIDER: &str = "https://provider.example/auth";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn client_with<P: Protocol>(name: &str, protocol: P, auth: StaticAuthenticator) -> BaseClient<P> {
    BaseClient::new(
        ClientConfig::new(name, "https://app.example/callback"),
        protocol,
        Arc::new(auth),
        Arc::new(AttributeProfileBuilder::new("ticket")),
    )
    .unwrap()
}

fn direct() -> BaseClient<ParameterProtocol> {
    client_with(
        "direct",
        ParameterProtocol::direct(PROVIDER),
        StaticAuthenticator::accept_all(),
    )
}

fn indirect() -> BaseClient<ParameterProtocol> {
    client_with(
        "indirect",
        ParameterProtocol::indirect(PROVIDER),
        StaticAuthenticator::accept_all(),
    )
}

fn clients() -> Vec<Box<dyn Client>> {
    vec![Box::new(direct()), Box::new(indirect())]
}

fn request(protected: bool, ajax: bool, failed: bool) -> RedirectRequest {
    RedirectRequest::new()
        .protected_target(protected)
        .ajax_request(ajax)
        .prior_failure(failed)
}

const BOOLS: [bool; 2] = [false, true];

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// initiate-redirect
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn ajax_always_yields_401() {
    init_tracing();
    let ctx = MemoryContext::get("https://app.example/private");
    for client in clients() {
        for protected in BOOLS {
            for failed in BOOLS {
                let action = client
                    .redirect(&ctx, &request(protected, true, failed))
                    .await
                    .unwrap();
                assert_eq!(action, HttpAction::unauthorized());
            }
        }
    }
}

#[tokio::test]
async fn protected_target_after_failure_yields_403() {
    let ctx = MemoryContext::get("https://app.example/private");
    for client in clients() {
        let action = client.redirect(&ctx, &request(true, false, true)).await.unwrap();
        assert_eq!(action, HttpAction::forbidden());
    }
}

#[tokio::test]
async fn protected_target_forces_direct_redirect() {
    let ctx = MemoryContext::get("https://app.example/private");
    for client in clients() {
        let action = client.redirect(&ctx, &request(true, false, false)).await.unwrap();
        assert_eq!(action, HttpAction::redirect(PROVIDER));
    }
}

#[tokio::test]
async fn prior_failure_alone_does_not_block_unprotected_targets() {
    let ctx = MemoryContext::get("https://app.example/public");
    let action = direct()
        .redirect(&ctx, &request(false, false, true))
        .await
        .unwrap();
    assert_eq!(action, HttpAction::redirect(PROVIDER));
}

#[tokio::test]
async fn direct_client_redirects_to_provider() {
    let ctx = MemoryContext::get("https://app.example/public");
    let action = direct().redirect(&ctx, &RedirectRequest::new()).await.unwrap();
    assert_eq!(action.status(), StatusCode::FOUND);
    assert_eq!(action.location(), Some(PROVIDER));
}

#[tokio::test]
async fn indirect_client_redirects_to_callback() {
    let ctx = MemoryContext::get("https://app.example/public");
    let action = indirect().redirect(&ctx, &RedirectRequest::new()).await.unwrap();
    assert_eq!(
        action.location(),
        Some("https://app.example/callback?client_name=indirect&requires_redirect=1")
    );
}

#[tokio::test]
async fn redirect_is_idempotent() {
    let ctx = MemoryContext::get("https://app.example/public");
    for client in clients() {
        for protected in BOOLS {
            for ajax in BOOLS {
                for failed in BOOLS {
                    let req = request(protected, ajax, failed);
                    let first = client.redirect(&ctx, &req).await.unwrap();
                    let second = client.redirect(&ctx, &req).await.unwrap();
                    assert_eq!(first, second);
                }
            }
        }
    }
}

#[tokio::test]
async fn redirect_does_not_write_the_context() {
    let ctx = MemoryContext::get("https://app.example/public");
    let _ = indirect().redirect(&ctx, &RedirectRequest::new()).await.unwrap();
    assert!(ctx.response_status().is_none());
    assert!(ctx.session().is_empty());
}

#[tokio::test]
async fn provider_callback_carries_client_name() {
    let client = client_with(
        "cas",
        ParameterProtocol::direct("https://sso.example/login").with_service_parameter("service"),
        StaticAuthenticator::accept_all(),
    );
    let ctx = MemoryContext::get("/");
    let action = client.redirect(&ctx, &RedirectRequest::new()).await.unwrap();
    assert_eq!(
        action.location(),
        Some("https://sso.example/login?service=https%3A%2F%2Fapp.example%2Fcallback%3Fclient_name%3Dcas")
    );
}

#[tokio::test]
async fn form_post_providers_answer_with_a_page() {
    let client = client_with(
        "saml",
        ParameterProtocol::direct("https://idp.example/sso").with_form_post(),
        StaticAuthenticator::accept_all(),
    );
    let action = client
        .redirect(&MemoryContext::get("/"), &RedirectRequest::new())
        .await
        .unwrap();
    assert_eq!(action.status(), StatusCode::OK);
    assert!(action.body().unwrap().contains("https://idp.example/sso"));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// retrieve-credentials
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn indirect_callback_performs_deferred_redirect() {
    let client = indirect();
    let mut ctx = MemoryContext::get(
        "https://app.example/callback?client_name=indirect&requires_redirect=1",
    );
    let flow = client.get_credentials(&mut ctx).await.unwrap();
    assert_eq!(flow, Flow::Action(HttpAction::redirect(PROVIDER)));
    assert!(ctx.session().is_empty(), "a redirect is not a failed attempt");
}

#[tokio::test]
async fn direct_client_ignores_redirect_parameter() {
    let client = direct();
    let mut ctx = MemoryContext::get("https://app.example/callback?requires_redirect=1&ticket=T");
    let flow = client.get_credentials(&mut ctx).await.unwrap();
    assert!(!flow.is_action());
}

#[tokio::test]
async fn credentials_are_stamped_and_clear_failures() {
    let client = direct();
    let key = AttemptTracker::session_key(client.name());
    let mut ctx = MemoryContext::get("https://app.example/callback?ticket=ST-1")
        .with_session_attribute(key.clone(), json!(true));

    let creds = client
        .get_credentials(&mut ctx)
        .await
        .unwrap()
        .into_continue()
        .flatten()
        .unwrap();
    assert_eq!(creds.client_name(), Some(client.name()));
    assert_eq!(creds.evidence_str("ticket"), Some("ST-1"));
    assert!(ctx.session_attribute(&key).is_none());
}

#[tokio::test]
async fn absent_credentials_are_recorded_as_failure() {
    let client = direct();
    let mut ctx = MemoryContext::get("https://app.example/callback");
    let flow = client.get_credentials(&mut ctx).await.unwrap();
    assert_eq!(flow, Flow::Continue(None));
    assert!(client.attempts().has_failed(&ctx, client.name()));

    // The next redirect for a protected target is refused.
    let next = ctx.next_request("https://app.example/private");
    let failed = client.attempts().has_failed(&next, client.name());
    let action = client.redirect(&next, &request(true, false, failed)).await.unwrap();
    assert_eq!(action.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn inline_protocol_challenges_without_recording_failure() {
    let client = client_with(
        "basic",
        HeaderProtocol::new("Basic", "warden"),
        StaticAuthenticator::accept_all(),
    );
    let mut ctx = MemoryContext::get("https://app.example/callback?client_name=basic");
    let flow = client.get_credentials(&mut ctx).await.unwrap();
    let action = flow.action().cloned().unwrap();
    assert_eq!(action.status(), StatusCode::UNAUTHORIZED);
    assert!(ctx.session().is_empty());
}

#[tokio::test]
async fn notifications_are_acknowledged_with_200() {
    let client = client_with(
        "cas",
        ParameterProtocol::direct(PROVIDER).with_notification_parameter("logoutRequest"),
        StaticAuthenticator::accept_all(),
    );
    let mut ctx = MemoryContext::get("https://app.example/callback?logoutRequest=%3Csamlp%3E");
    let flow = client.get_credentials(&mut ctx).await.unwrap();
    assert_eq!(flow, Flow::Action(HttpAction::ok()));
}

#[tokio::test]
async fn malformed_evidence_is_a_fault_not_an_action() {
    let client = direct();
    let mut ctx = MemoryContext::get("https://app.example/callback?ticket=");
    let err = client.get_credentials(&mut ctx).await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedResponse(_)));
    assert!(ctx.response_status().is_none());
}

#[tokio::test]
async fn session_faults_propagate() {
    let client = direct();
    let mut ctx = MemoryContext::get("https://app.example/callback").with_failing_session();
    let err = client.get_credentials(&mut ctx).await.unwrap_err();
    assert!(matches!(err, ClientError::Context(_)));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// resolve-profile
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn profile_absent_iff_authenticator_rejects() {
    let client = client_with(
        "cas",
        ParameterProtocol::direct(PROVIDER),
        StaticAuthenticator::accepting("ticket", ["ST-good"]),
    );
    let ctx = MemoryContext::get("https://app.example/callback");

    let good = Credentials::new("parameter", json!({"ticket": "ST-good"}));
    let profile = client.get_user_profile(&good, &ctx).await.unwrap().unwrap();
    assert_eq!(profile.id().as_str(), "ST-good");
    assert_eq!(profile.typed_id(), "cas#ST-good");

    let bad = Credentials::new("parameter", json!({"ticket": "ST-bad"}));
    assert!(client.get_user_profile(&bad, &ctx).await.unwrap().is_none());
    assert!(ctx.response_status().is_none());
}

#[tokio::test]
async fn authenticator_faults_propagate() {
    let client = client_with(
        "cas",
        ParameterProtocol::direct(PROVIDER),
        StaticAuthenticator::failing("directory unreachable"),
    );
    let creds = Credentials::new("parameter", json!({"ticket": "ST-1"}));
    let err = client
        .get_user_profile(&creds, &MemoryContext::get("/"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Construction and cancellation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn invalid_config_is_rejected_at_construction() {
    let result = BaseClient::new(
        ClientConfig::new("", "/callback"),
        ParameterProtocol::direct(PROVIDER),
        Arc::new(StaticAuthenticator::accept_all()),
        Arc::new(AttributeProfileBuilder::new("ticket")),
    );
    assert!(matches!(result, Err(ClientError::Config(_))));
}

#[test]
fn base_client_is_shareable() {
    fn _assert_send_sync<T: Send + Sync>() {}
    _assert_send_sync::<BaseClient<ParameterProtocol>>();
    let _: Arc<dyn Client> = Arc::new(direct());
}

#[tokio::test]
async fn cancelled_retrieval_commits_nothing() {
    let client = client_with(
        "slow",
        SlowProtocol::new(ParameterProtocol::indirect(PROVIDER), Duration::from_secs(5)),
        StaticAuthenticator::accept_all(),
    );
    let mut ctx = MemoryContext::get("https://app.example/callback?client_name=slow&requires_redirect=1");
    let outcome =
        tokio::time::timeout(Duration::from_millis(20), client.get_credentials(&mut ctx)).await;
    assert!(outcome.is_err(), "retrieval should time out");
    assert_eq!(ctx.status_writes(), 0);
    assert!(ctx.session().is_empty());
}
