//! Find-password walkthrough against the in-memory mock gateway.
//!
//! Run with:
//! ```bash
//! cargo run -p sodam_client --example recovery_demo --features mock-services
//! ```

use std::sync::{Arc, Mutex};

use sodam_client::{MockMemberGateway, TracingAnalytics};
use sodam_core::domain::value_objects::FlowKind;
use sodam_core::services::password_reset::{token_from_query, PasswordResetFlow, ResetOutcome};
use sodam_core::services::verification::config::FlowConfig;
use sodam_core::services::verification::service::VerificationFlow;
use sodam_core::services::verification::traits::Navigator;
use sodam_core::services::verification::types::{RequestOutcome, VerifyOutcome};
use sodam_shared::config::LoggingConfig;
use sodam_shared::types::Language;

/// Navigator that prints targets and remembers the last one
struct PrintNavigator {
    last: Mutex<Option<String>>,
}

impl PrintNavigator {
    fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }

    fn last_target(&self) -> Option<String> {
        self.last.lock().unwrap().clone()
    }
}

impl Navigator for PrintNavigator {
    fn navigate(&self, target: &str) {
        println!("   -> navigate: {}", target);
        *self.last.lock().unwrap() = Some(target.to_string());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            LoggingConfig::default().env_filter(),
        ))
        .init();

    println!("=== Sodam find-password demo ===\n");

    let gateway = Arc::new(MockMemberGateway::new());
    gateway.register_member("hong123");
    let analytics = Arc::new(TracingAnalytics::new());
    let navigator = Arc::new(PrintNavigator::new());

    let config = FlowConfig::default();
    config.validate()?;
    let mut flow = VerificationFlow::new(
        FlowKind::FindPassword,
        Arc::clone(&gateway),
        Arc::clone(&analytics),
        Arc::clone(&navigator),
        config,
    );

    println!("1. Member fills the input step");
    flow.set_login_id("hong123");
    flow.set_contact("010-1234-5678");
    println!("   login id entered, phone entered, request enabled: {}\n", flow.can_request_code());

    println!("2. Requesting a verification code");
    let outcome = flow.request_code().await;
    println!(
        "   outcome: {:?}, step: {}, window: {}s\n",
        outcome,
        flow.step(),
        flow.remaining_seconds()
    );
    assert_eq!(outcome, RequestOutcome::Issued);

    println!("3. A wrong code first");
    flow.set_code("000000");
    let outcome = flow.verify_code().await;
    println!(
        "   outcome: {:?}, failures: {}/{}, message: {:?}\n",
        outcome,
        flow.failure_count(),
        flow.failure_count() + flow.attempts_remaining(),
        flow.error_message()
    );

    println!("4. Now the real code from the mock text message");
    let code = gateway
        .issued_code(&flow.session().channel)
        .expect("mock issued a code");
    println!("   (mock SMS says: {})", code);
    flow.set_code(&code);
    let outcome = flow.verify_code().await;
    println!("   outcome: {:?}\n", outcome);
    assert_eq!(outcome, VerifyOutcome::Verified);

    let target = navigator.last_target().expect("navigation happened");
    let query = target.split_once('?').map(|(_, q)| q).unwrap_or("");
    let token = token_from_query(query).expect("token in query");

    println!("5. On the reset page, choosing a new password");
    let mut reset = PasswordResetFlow::new(
        token,
        Arc::clone(&gateway),
        Arc::clone(&navigator),
        Language::Korean,
    );
    reset.set_new_password("Passw0rd!");
    reset.set_confirm_password("Passw0rd!");
    let outcome = reset.submit().await;
    println!("   outcome: {:?}, completed: {}\n", outcome, reset.is_completed());
    assert_eq!(outcome, ResetOutcome::Completed);

    println!("=== Demo complete ===");
    Ok(())
}
