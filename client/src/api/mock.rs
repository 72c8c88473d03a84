//! In-memory member gateway for demos and offline development.
//!
//! Issues real looking six digit codes and logs them instead of sending
//! anything. Verification and password reset run against the stored
//! state, so the whole flow can be exercised without the member API.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use sodam_core::domain::value_objects::Channel;
use sodam_core::errors::GatewayError;
use sodam_core::services::password_reset::PasswordGateway;
use sodam_core::services::verification::traits::VerificationGateway;
use sodam_core::services::verification::types::VerifiedCode;

/// Fake member API holding issued codes and tokens in memory
pub struct MockMemberGateway {
    /// Known login ids; empty means every login id matches
    members: Mutex<HashSet<String>>,
    /// Issued codes keyed by normalized contact
    issued: Mutex<HashMap<String, String>>,
    /// Result tokens that have not been spent yet
    tokens: Mutex<HashSet<String>>,
}

impl MockMemberGateway {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(HashSet::new()),
            issued: Mutex::new(HashMap::new()),
            tokens: Mutex::new(HashSet::new()),
        }
    }

    /// Restrict the gateway to a known member list.
    ///
    /// Once at least one member is registered, unknown login ids get the
    /// same "no matching member" rejection the real API sends.
    pub fn register_member<S: Into<String>>(&self, login_id: S) {
        self.members.lock().unwrap().insert(login_id.into());
    }

    /// Peek at the code issued for a contact, as a demo stand-in for the
    /// text message or email
    pub fn issued_code(&self, channel: &Channel) -> Option<String> {
        self.issued
            .lock()
            .unwrap()
            .get(&channel.normalized_contact())
            .cloned()
    }

    fn member_exists(&self, login_id: &str) -> bool {
        let members = self.members.lock().unwrap();
        members.is_empty() || members.contains(login_id)
    }
}

impl Default for MockMemberGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationGateway for MockMemberGateway {
    async fn request_code(
        &self,
        login_id: &str,
        channel: &Channel,
    ) -> Result<(), GatewayError> {
        if !self.member_exists(login_id) {
            return Err(GatewayError::MemberNotFound);
        }

        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        info!(
            contact = %channel.masked_contact(),
            code = %code,
            "mock gateway issued a verification code"
        );
        self.issued
            .lock()
            .unwrap()
            .insert(channel.normalized_contact(), code);
        Ok(())
    }

    async fn verify_code(
        &self,
        login_id: &str,
        channel: &Channel,
        code: &str,
    ) -> Result<VerifiedCode, GatewayError> {
        if !self.member_exists(login_id) {
            return Err(GatewayError::MemberNotFound);
        }

        let issued = self
            .issued
            .lock()
            .unwrap()
            .get(&channel.normalized_contact())
            .cloned();
        match issued {
            Some(expected) if expected == code => {
                let token = format!("mock-{}", Uuid::new_v4().simple());
                self.tokens.lock().unwrap().insert(token.clone());
                self.issued
                    .lock()
                    .unwrap()
                    .remove(&channel.normalized_contact());
                Ok(VerifiedCode::with_token(token))
            }
            Some(_) => Err(GatewayError::Rejected {
                status: 400,
                message: Some("인증번호가 일치하지 않습니다.".to_string()),
            }),
            None => Err(GatewayError::Rejected {
                status: 400,
                message: Some("인증번호를 먼저 요청해주세요.".to_string()),
            }),
        }
    }
}

#[async_trait]
impl PasswordGateway for MockMemberGateway {
    async fn reset_password(&self, token: &str, _new_password: &str) -> Result<(), GatewayError> {
        // tokens are single use, exactly like the real link
        if self.tokens.lock().unwrap().remove(token) {
            Ok(())
        } else {
            Err(GatewayError::Rejected {
                status: 400,
                message: Some("만료된 링크입니다. 처음부터 다시 진행해주세요.".to_string()),
            })
        }
    }
}
