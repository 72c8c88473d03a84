//! Behavioral tests for [`VerificationFlow`].

use std::sync::Arc;

use sodam_shared::types::Language;
use tokio::time::{sleep, Duration};

use crate::domain::value_objects::{AgreementKind, ChannelKind, FlowKind, Step};
use crate::errors::GatewayError;
use crate::services::verification::config::FlowConfig;
use crate::services::verification::messages;
use crate::services::verification::service::VerificationFlow;
use crate::services::verification::tests::mocks::{MockAnalytics, MockGateway, MockNavigator};
use crate::services::verification::traits::NoopAnalytics;
use crate::services::verification::types::{FlowEvent, RequestOutcome, VerifiedCode, VerifyOutcome};

type TestFlow = VerificationFlow<MockGateway, MockAnalytics, MockNavigator>;

fn setup_with_config(
    kind: FlowKind,
    config: FlowConfig,
) -> (TestFlow, Arc<MockGateway>, Arc<MockAnalytics>, Arc<MockNavigator>) {
    let gateway = Arc::new(MockGateway::new());
    let analytics = Arc::new(MockAnalytics::new());
    let navigator = Arc::new(MockNavigator::new());
    let flow = VerificationFlow::new(
        kind,
        Arc::clone(&gateway),
        Arc::clone(&analytics),
        Arc::clone(&navigator),
        config,
    );
    (flow, gateway, analytics, navigator)
}

fn setup(
    kind: FlowKind,
) -> (TestFlow, Arc<MockGateway>, Arc<MockAnalytics>, Arc<MockNavigator>) {
    setup_with_config(kind, FlowConfig::default())
}

/// Fill the input step and get a code issued
async fn issue_code(flow: &mut TestFlow) {
    flow.set_login_id("user1");
    flow.set_contact("01012345678");
    assert_eq!(flow.request_code().await, RequestOutcome::Issued);
}

/// With paused time, sleeping slightly past N seconds lets exactly N
/// countdown ticks elapse
async fn let_ticks_elapse(seconds: u32) {
    sleep(Duration::from_millis(u64::from(seconds) * 1000 + 50)).await;
}

// --- request_code ------------------------------------------------------

#[tokio::test]
async fn test_request_blocked_without_login_id() {
    let (mut flow, gateway, _, _) = setup(FlowKind::FindUsername);
    flow.set_contact("01012345678");

    assert_eq!(flow.request_code().await, RequestOutcome::Rejected);
    assert_eq!(
        flow.error_message(),
        Some(messages::login_id_required(Language::Korean))
    );
    assert_eq!(gateway.request_call_count(), 0);
    assert_eq!(flow.step(), Step::Input);
}

#[tokio::test]
async fn test_request_blocked_on_bad_phone_format() {
    let (mut flow, gateway, _, _) = setup(FlowKind::FindPassword);
    flow.set_login_id("user1");
    flow.set_contact("0211234567");

    assert_eq!(flow.request_code().await, RequestOutcome::Rejected);
    assert_eq!(
        flow.error_message(),
        Some(messages::phone_format(Language::Korean))
    );
    assert_eq!(gateway.request_call_count(), 0);
}

#[tokio::test]
async fn test_request_accepts_formatted_phone() {
    let (mut flow, gateway, _, _) = setup(FlowKind::FindPassword);
    flow.set_login_id("user1");
    flow.set_contact("010-1234-5678");

    assert_eq!(flow.request_code().await, RequestOutcome::Issued);
    assert_eq!(gateway.request_call_count(), 1);
}

#[tokio::test]
async fn test_request_blocked_on_bad_email_format() {
    let (mut flow, gateway, _, _) = setup(FlowKind::FindPassword);
    flow.switch_channel(ChannelKind::Email);
    flow.set_login_id("user1");
    flow.set_contact("not-an-email");

    assert_eq!(flow.request_code().await, RequestOutcome::Rejected);
    assert_eq!(
        flow.error_message(),
        Some(messages::email_format(Language::Korean))
    );
    assert_eq!(gateway.request_call_count(), 0);
}

#[tokio::test]
async fn test_request_success_enters_verification_with_fresh_window() {
    let (mut flow, gateway, analytics, _) = setup(FlowKind::FindUsername);
    flow.set_login_id("user1");
    flow.set_contact("01012345678");
    flow.set_code("stale");

    assert_eq!(flow.request_code().await, RequestOutcome::Issued);

    assert_eq!(flow.step(), Step::Verification);
    assert_eq!(flow.remaining_seconds(), 300);
    assert!(flow.timer_active());
    assert_eq!(flow.failure_count(), 0);
    assert!(flow.session().code.is_empty());
    assert!(flow.error_message().is_none());

    let (login_id, channel) = gateway.last_request().unwrap();
    assert_eq!(login_id, "user1");
    assert_eq!(channel.contact(), "01012345678");
    assert_eq!(analytics.event_names(), vec!["code_requested"]);
}

#[tokio::test(start_paused = true)]
async fn test_resend_refreshes_window_and_guard_without_leaving_step() {
    let (mut flow, gateway, analytics, _) = setup(FlowKind::FindPassword);
    issue_code(&mut flow).await;

    let_ticks_elapse(5).await;
    gateway.push_wrong_code_rejections(1);
    flow.set_code("000000");
    assert_eq!(flow.verify_code().await, VerifyOutcome::Failed);
    assert_eq!(flow.failure_count(), 1);
    assert_eq!(flow.remaining_seconds(), 295);

    assert_eq!(flow.request_code().await, RequestOutcome::Issued);

    assert_eq!(flow.step(), Step::Verification);
    assert_eq!(flow.remaining_seconds(), 300);
    assert!(flow.timer_active());
    assert_eq!(flow.failure_count(), 0);

    let resend_flags: Vec<bool> = analytics
        .events()
        .iter()
        .filter_map(|event| match event {
            FlowEvent::CodeRequested { resend, .. } => Some(*resend),
            _ => None,
        })
        .collect();
    assert_eq!(resend_flags, vec![false, true]);
}

#[tokio::test]
async fn test_request_404_raises_alert_and_keeps_step() {
    let (mut flow, gateway, analytics, _) = setup(FlowKind::FindUsername);
    flow.set_login_id("ghost");
    flow.set_contact("01012345678");
    gateway.push_request_result(Err(GatewayError::MemberNotFound));

    assert_eq!(flow.request_code().await, RequestOutcome::Rejected);

    assert_eq!(flow.step(), Step::Input);
    assert!(!flow.timer_active());
    let expected = messages::member_not_found(Language::Korean);
    assert_eq!(flow.error_message(), Some(expected));
    assert_eq!(flow.take_alert().as_deref(), Some(expected));
    assert!(flow.take_alert().is_none());
    assert_eq!(analytics.event_names(), vec!["code_request_failed"]);
}

#[tokio::test]
async fn test_request_rejection_shows_server_text_verbatim() {
    let (mut flow, gateway, _, _) = setup(FlowKind::Signup);
    flow.set_agreement(AgreementKind::TermsOfService, true);
    flow.set_agreement(AgreementKind::PrivacyPolicy, true);
    assert!(flow.confirm_agreements());
    flow.set_login_id("user1");
    flow.set_contact("01012345678");
    gateway.push_request_result(Err(GatewayError::Rejected {
        status: 409,
        message: Some("이미 가입된 휴대폰 번호입니다.".to_string()),
    }));

    assert_eq!(flow.request_code().await, RequestOutcome::Rejected);
    assert_eq!(flow.error_message(), Some("이미 가입된 휴대폰 번호입니다."));
    assert_eq!(
        flow.take_alert().as_deref(),
        Some("이미 가입된 휴대폰 번호입니다.")
    );
}

#[tokio::test]
async fn test_request_transport_failure_falls_back_to_generic_message() {
    let (mut flow, gateway, _, _) = setup(FlowKind::FindUsername);
    flow.set_login_id("user1");
    flow.set_contact("01012345678");
    gateway.push_request_result(Err(GatewayError::Transport {
        message: "connection refused".to_string(),
    }));

    assert_eq!(flow.request_code().await, RequestOutcome::Rejected);
    assert_eq!(
        flow.error_message(),
        Some(messages::request_failed(Language::Korean))
    );
}

#[tokio::test]
async fn test_request_ignored_while_in_flight() {
    let (mut flow, gateway, _, _) = setup(FlowKind::FindUsername);
    flow.set_login_id("user1");
    flow.set_contact("01012345678");
    flow.set_loading_for_tests(true);

    assert_eq!(flow.request_code().await, RequestOutcome::InFlight);
    assert_eq!(gateway.request_call_count(), 0);

    flow.set_loading_for_tests(false);
    assert_eq!(flow.request_code().await, RequestOutcome::Issued);
}

// --- verify_code -------------------------------------------------------

#[tokio::test]
async fn test_verify_requires_a_code() {
    let (mut flow, gateway, _, _) = setup(FlowKind::FindPassword);
    issue_code(&mut flow).await;

    assert_eq!(flow.verify_code().await, VerifyOutcome::BlockedLocally);
    assert_eq!(
        flow.error_message(),
        Some(messages::code_required(Language::Korean))
    );
    assert_eq!(gateway.verify_call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_verify_blocked_after_expiry_even_with_attempts_left() {
    let config = FlowConfig::new().with_code_validity_seconds(3);
    let (mut flow, gateway, _, _) = setup_with_config(FlowKind::FindPassword, config);
    issue_code(&mut flow).await;
    flow.set_code("123456");

    let_ticks_elapse(3).await;
    assert!(!flow.timer_active());
    assert_eq!(flow.failure_count(), 0);

    assert_eq!(flow.verify_code().await, VerifyOutcome::BlockedLocally);
    assert_eq!(
        flow.error_message(),
        Some(messages::code_expired(Language::Korean))
    );
    assert_eq!(gateway.verify_call_count(), 0);
}

#[tokio::test]
async fn test_verify_blocked_once_attempts_are_exhausted() {
    let config = FlowConfig::new().with_max_attempts(2);
    let (mut flow, gateway, _, _) = setup_with_config(FlowKind::FindPassword, config);
    issue_code(&mut flow).await;
    gateway.push_wrong_code_rejections(2);

    flow.set_code("000001");
    assert_eq!(flow.verify_code().await, VerifyOutcome::Failed);
    flow.set_code("000002");
    assert_eq!(flow.verify_code().await, VerifyOutcome::Failed);
    assert_eq!(gateway.verify_call_count(), 2);

    // guard now blocks before the gateway is reached
    flow.set_code("000003");
    assert_eq!(flow.verify_code().await, VerifyOutcome::BlockedLocally);
    assert_eq!(gateway.verify_call_count(), 2);
    assert_eq!(
        flow.error_message(),
        Some(messages::attempts_exhausted(Language::Korean))
    );
}

#[tokio::test(start_paused = true)]
async fn test_expired_window_reported_before_exhausted_guard() {
    let config = FlowConfig::new()
        .with_code_validity_seconds(2)
        .with_max_attempts(1);
    let (mut flow, gateway, _, _) = setup_with_config(FlowKind::FindPassword, config);
    issue_code(&mut flow).await;
    gateway.push_wrong_code_rejections(1);
    flow.set_code("000000");
    assert_eq!(flow.verify_code().await, VerifyOutcome::Failed);
    assert_eq!(flow.attempts_remaining(), 0);

    let_ticks_elapse(2).await;
    flow.set_code("123456");

    assert_eq!(flow.verify_code().await, VerifyOutcome::BlockedLocally);
    assert_eq!(
        flow.error_message(),
        Some(messages::code_expired(Language::Korean))
    );
}

#[tokio::test]
async fn test_verify_failure_consumes_attempt_and_clears_code() {
    let (mut flow, gateway, analytics, _) = setup(FlowKind::FindUsername);
    issue_code(&mut flow).await;
    gateway.push_wrong_code_rejections(1);
    flow.set_code("999999");

    assert_eq!(flow.verify_code().await, VerifyOutcome::Failed);

    assert_eq!(flow.failure_count(), 1);
    assert_eq!(flow.attempts_remaining(), 4);
    assert!(flow.session().code.is_empty());
    assert_eq!(flow.error_message(), Some("인증번호가 일치하지 않습니다."));
    assert!(flow.take_alert().is_none());
    assert!(analytics
        .event_names()
        .contains(&"verification_failed"));
}

#[tokio::test]
async fn test_transport_failure_during_verify_consumes_attempt() {
    let (mut flow, gateway, _, _) = setup(FlowKind::FindPassword);
    issue_code(&mut flow).await;
    gateway.push_verify_result(Err(GatewayError::Transport {
        message: "timed out".to_string(),
    }));
    flow.set_code("123456");

    assert_eq!(flow.verify_code().await, VerifyOutcome::Failed);
    assert_eq!(flow.failure_count(), 1);
    assert_eq!(
        flow.error_message(),
        Some(messages::request_failed(Language::Korean))
    );
}

#[tokio::test]
async fn test_final_failure_switches_to_exhausted_message() {
    let (mut flow, gateway, analytics, _) = setup(FlowKind::FindPassword);
    issue_code(&mut flow).await;
    gateway.push_wrong_code_rejections(5);

    for attempt in 1..=5 {
        flow.set_code("000000");
        assert_eq!(flow.verify_code().await, VerifyOutcome::Failed);
        assert_eq!(flow.failure_count(), attempt);
    }

    assert_eq!(
        flow.error_message(),
        Some(messages::attempts_exhausted(Language::Korean))
    );
    assert!(analytics.event_names().contains(&"attempts_exhausted"));
    assert!(!flow.can_verify_code());
    assert_eq!(gateway.verify_call_count(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_verify_success_navigates_with_encoded_token() {
    let (mut flow, gateway, analytics, navigator) = setup(FlowKind::FindPassword);
    issue_code(&mut flow).await;
    let_ticks_elapse(2).await;
    gateway.push_verify_result(Ok(VerifiedCode::with_token("abc123")));
    flow.set_code("123456");

    assert_eq!(flow.verify_code().await, VerifyOutcome::Verified);

    assert_eq!(flow.result_token(), Some("abc123"));
    assert_eq!(
        navigator.last_target().as_deref(),
        Some("/account/reset-password?token=abc123")
    );
    // countdown stops but keeps its last value on screen
    assert!(!flow.timer_active());
    assert_eq!(flow.remaining_seconds(), 298);
    assert_eq!(flow.failure_count(), 0);
    assert!(analytics
        .event_names()
        .ends_with(&["verification_succeeded", "flow_completed"]));
}

#[tokio::test]
async fn test_find_username_navigates_to_result_page() {
    let (mut flow, gateway, _, navigator) = setup(FlowKind::FindUsername);
    issue_code(&mut flow).await;
    gateway.push_verify_result(Ok(VerifiedCode::with_token("tok 55")));
    flow.set_code("123456");

    assert_eq!(flow.verify_code().await, VerifyOutcome::Verified);
    assert_eq!(
        navigator.last_target().as_deref(),
        Some("/account/find-id/result?token=tok+55")
    );
}

#[tokio::test]
async fn test_success_without_token_keeps_attempts_and_reports() {
    let (mut flow, gateway, _, navigator) = setup(FlowKind::FindPassword);
    issue_code(&mut flow).await;
    gateway.push_verify_result(Ok(VerifiedCode::default()));
    flow.set_code("123456");

    assert_eq!(flow.verify_code().await, VerifyOutcome::TokenMissing);

    assert_eq!(flow.failure_count(), 0);
    assert!(flow.result_token().is_none());
    assert!(navigator.targets().is_empty());
    assert_eq!(
        flow.error_message(),
        Some(messages::token_missing(Language::Korean))
    );
}

#[tokio::test]
async fn test_verify_ignored_while_in_flight() {
    let (mut flow, gateway, _, _) = setup(FlowKind::FindPassword);
    issue_code(&mut flow).await;
    flow.set_code("123456");
    flow.set_loading_for_tests(true);

    assert_eq!(flow.verify_code().await, VerifyOutcome::InFlight);
    assert_eq!(gateway.verify_call_count(), 0);
}

// --- signup ------------------------------------------------------------

#[tokio::test]
async fn test_signup_requires_mandatory_agreements() {
    let (mut flow, _, _, _) = setup(FlowKind::Signup);
    assert_eq!(flow.step(), Step::Agreements);
    assert!(!flow.can_request_code());

    assert!(!flow.confirm_agreements());
    assert_eq!(
        flow.error_message(),
        Some(messages::agreements_required(Language::Korean))
    );

    flow.set_agreement(AgreementKind::TermsOfService, true);
    flow.set_agreement(AgreementKind::PrivacyPolicy, true);
    assert!(flow.confirm_agreements());
    assert_eq!(flow.step(), Step::Input);
}

#[tokio::test]
async fn test_signup_completes_in_place_with_token_retained() {
    let (mut flow, gateway, analytics, navigator) = setup(FlowKind::Signup);
    flow.accept_all_agreements();
    assert!(flow.confirm_agreements());
    issue_code(&mut flow).await;
    gateway.push_verify_result(Ok(VerifiedCode::with_token("signup-tok")));
    flow.set_code("654321");

    assert_eq!(flow.verify_code().await, VerifyOutcome::Verified);

    assert_eq!(flow.step(), Step::Complete);
    assert_eq!(flow.result_token(), Some("signup-tok"));
    assert!(navigator.targets().is_empty());
    assert!(analytics.event_names().contains(&"flow_completed"));

    // terminal step accepts no further requests
    assert!(!flow.can_request_code());
    assert_eq!(flow.request_code().await, RequestOutcome::Rejected);
    assert_eq!(gateway.request_call_count(), 1);
}

// --- channel switching and resets --------------------------------------

#[tokio::test(start_paused = true)]
async fn test_channel_switch_resets_channel_state() {
    let (mut flow, gateway, analytics, _) = setup(FlowKind::FindPassword);
    issue_code(&mut flow).await;
    let_ticks_elapse(5).await;
    gateway.push_wrong_code_rejections(1);
    flow.set_code("000000");
    assert_eq!(flow.verify_code().await, VerifyOutcome::Failed);

    flow.switch_channel(ChannelKind::Email);

    assert_eq!(flow.step(), Step::Input);
    assert_eq!(flow.channel_kind(), ChannelKind::Email);
    assert_eq!(flow.session().login_id, "user1");
    assert!(flow.session().channel.is_empty());
    assert!(flow.session().code.is_empty());
    assert!(flow.error_message().is_none());
    assert_eq!(flow.remaining_seconds(), 0);
    assert!(!flow.timer_active());
    assert_eq!(flow.failure_count(), 0);
    assert!(analytics.event_names().contains(&"channel_switched"));
}

#[tokio::test]
async fn test_repeated_channel_switch_is_idempotent() {
    let (mut flow, _, _, _) = setup(FlowKind::FindUsername);
    flow.set_login_id("user1");

    flow.switch_channel(ChannelKind::Email);
    let first = flow.session().clone();
    flow.switch_channel(ChannelKind::Sms);
    flow.switch_channel(ChannelKind::Email);
    let second = flow.session().clone();

    assert_eq!(first.step, second.step);
    assert_eq!(first.login_id, second.login_id);
    assert_eq!(first.channel, second.channel);
    assert_eq!(first.code, second.code);
    assert_eq!(first.error_message, second.error_message);
}

#[tokio::test(start_paused = true)]
async fn test_reset_returns_flow_to_start() {
    let (mut flow, _, _, _) = setup(FlowKind::FindPassword);
    issue_code(&mut flow).await;
    let_ticks_elapse(3).await;
    flow.set_code("123");

    flow.reset();

    assert_eq!(flow.step(), Step::Input);
    assert!(flow.session().login_id.is_empty());
    assert_eq!(flow.remaining_seconds(), 0);
    assert!(!flow.timer_active());
    assert_eq!(flow.failure_count(), 0);
}

// --- enablement predicates ---------------------------------------------

#[tokio::test]
async fn test_request_button_enablement() {
    let (mut flow, _, _, _) = setup(FlowKind::FindUsername);
    assert!(!flow.can_request_code());

    flow.set_login_id("user1");
    assert!(!flow.can_request_code());

    flow.set_contact("01012345678");
    assert!(flow.can_request_code());

    flow.set_loading_for_tests(true);
    assert!(!flow.can_request_code());
}

#[tokio::test(start_paused = true)]
async fn test_verify_button_enablement_tracks_window_and_guard() {
    let config = FlowConfig::new()
        .with_code_validity_seconds(3)
        .with_max_attempts(1);
    let (mut flow, gateway, _, _) = setup_with_config(FlowKind::FindPassword, config);
    assert!(!flow.can_verify_code());

    issue_code(&mut flow).await;
    assert!(!flow.can_verify_code());

    flow.set_code("123456");
    assert!(flow.can_verify_code());

    gateway.push_wrong_code_rejections(1);
    assert_eq!(flow.verify_code().await, VerifyOutcome::Failed);
    flow.set_code("123456");
    assert!(!flow.can_verify_code());

    // fresh code restores the window and the guard
    assert_eq!(flow.request_code().await, RequestOutcome::Issued);
    flow.set_code("654321");
    assert!(flow.can_verify_code());

    let_ticks_elapse(3).await;
    assert!(!flow.can_verify_code());
}

// --- field edits -------------------------------------------------------

#[tokio::test]
async fn test_field_edits_clear_inline_error() {
    let (mut flow, _, _, _) = setup(FlowKind::FindUsername);
    assert_eq!(flow.request_code().await, RequestOutcome::Rejected);
    assert!(flow.error_message().is_some());

    flow.set_login_id("user1");
    assert!(flow.error_message().is_none());
}

// --- analytics sink ----------------------------------------------------

#[tokio::test]
async fn test_flow_runs_with_noop_analytics_sink() {
    let gateway = Arc::new(MockGateway::new());
    let navigator = Arc::new(MockNavigator::new());
    let mut flow = VerificationFlow::new(
        FlowKind::FindUsername,
        Arc::clone(&gateway),
        Arc::new(NoopAnalytics),
        Arc::clone(&navigator),
        FlowConfig::default(),
    );

    flow.set_login_id("user1");
    flow.set_contact("01012345678");
    assert_eq!(flow.request_code().await, RequestOutcome::Issued);

    gateway.push_wrong_code_rejections(1);
    flow.set_code("000000");
    assert_eq!(flow.verify_code().await, VerifyOutcome::Failed);
    assert_eq!(flow.error_message(), Some("인증번호가 일치하지 않습니다."));
}

// --- full scenario -----------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_find_username_happy_path_over_sms() {
    let (mut flow, gateway, analytics, navigator) = setup(FlowKind::FindUsername);

    flow.set_login_id("user1");
    flow.set_contact("01012345678");
    assert_eq!(flow.request_code().await, RequestOutcome::Issued);
    assert_eq!(flow.remaining_seconds(), 300);

    let_ticks_elapse(10).await;
    assert_eq!(flow.remaining_seconds(), 290);

    gateway.push_verify_result(Ok(VerifiedCode::with_token("abc123")));
    flow.set_code("123456");
    assert_eq!(flow.verify_code().await, VerifyOutcome::Verified);

    let (login_id, channel, code) = gateway.last_verify().unwrap();
    assert_eq!(login_id, "user1");
    assert_eq!(channel.contact(), "01012345678");
    assert_eq!(code, "123456");

    let target = navigator.last_target().unwrap();
    assert!(target.starts_with("/account/find-id/result?"));
    assert!(target.contains("token=abc123"));

    assert_eq!(
        analytics.event_names(),
        vec![
            "code_requested",
            "verification_succeeded",
            "flow_completed"
        ]
    );
}
