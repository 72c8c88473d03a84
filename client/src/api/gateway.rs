//! HTTP gateway to the member API.
//!
//! Maps the core gateway ports onto the verification and password
//! endpoints. Response statuses are folded into `GatewayError` here so
//! the flows never see raw HTTP: 404 means no matching member, other 4xx
//! carry the server message through verbatim, 5xx is a server failure and
//! anything that never produced a response is a transport failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sodam_core::domain::value_objects::{Channel, ChannelKind};
use sodam_core::errors::GatewayError;
use sodam_core::services::password_reset::PasswordGateway;
use sodam_core::services::verification::traits::VerificationGateway;
use sodam_core::services::verification::types::VerifiedCode;
use sodam_shared::config::MemberApiConfig;
use sodam_shared::types::ApiEnvelope;

use crate::ClientError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhoneCodeRequest<'a> {
    login_id: &'a str,
    phone: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailCodeRequest<'a> {
    login_id: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhoneVerifyRequest<'a> {
    login_id: &'a str,
    phone: &'a str,
    code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailVerifyRequest<'a> {
    login_id: &'a str,
    email: &'a str,
    code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResetRequest<'a> {
    token: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyData {
    result_token: Option<String>,
}

/// Member API client implementing the verification and password ports
pub struct MemberApiGateway {
    client: reqwest::Client,
    config: MemberApiConfig,
}

impl MemberApiGateway {
    /// Build a gateway with its own HTTP client and the configured timeout
    pub fn new(config: MemberApiConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Build a gateway on an existing HTTP client
    pub fn with_client(client: reqwest::Client, config: MemberApiConfig) -> Self {
        Self { client, config }
    }

    fn request_endpoint(&self, kind: ChannelKind) -> String {
        match kind {
            ChannelKind::Sms => self.config.endpoint(&self.config.request_phone_path),
            ChannelKind::Email => self.config.endpoint(&self.config.request_email_path),
        }
    }

    fn verify_endpoint(&self, kind: ChannelKind) -> String {
        match kind {
            ChannelKind::Sms => self.config.endpoint(&self.config.verify_phone_path),
            ChannelKind::Email => self.config.endpoint(&self.config.verify_email_path),
        }
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response, GatewayError> {
        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)
    }

    /// Fold a non-success response into a gateway error, pulling the
    /// server message out of the response envelope when there is one
    async fn rejection(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        let message = response
            .json::<ApiEnvelope<serde_json::Value>>()
            .await
            .ok()
            .and_then(|envelope| envelope.error);
        rejection_from(status, message)
    }
}

#[async_trait]
impl VerificationGateway for MemberApiGateway {
    async fn request_code(
        &self,
        login_id: &str,
        channel: &Channel,
    ) -> Result<(), GatewayError> {
        let url = self.request_endpoint(channel.kind());
        let contact = channel.normalized_contact();
        debug!(
            channel = %channel.kind(),
            contact = %channel.masked_contact(),
            "requesting verification code"
        );

        let response = match channel {
            Channel::Sms { .. } => {
                self.post_json(
                    &url,
                    &PhoneCodeRequest {
                        login_id,
                        phone: &contact,
                    },
                )
                .await?
            }
            Channel::Email { .. } => {
                self.post_json(
                    &url,
                    &EmailCodeRequest {
                        login_id,
                        email: &contact,
                    },
                )
                .await?
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let error = Self::rejection(response).await;
        warn!(
            status = status.as_u16(),
            channel = %channel.kind(),
            contact = %channel.masked_contact(),
            error = %error,
            "code request rejected by member API"
        );
        Err(error)
    }

    async fn verify_code(
        &self,
        login_id: &str,
        channel: &Channel,
        code: &str,
    ) -> Result<VerifiedCode, GatewayError> {
        let url = self.verify_endpoint(channel.kind());
        let contact = channel.normalized_contact();
        debug!(
            channel = %channel.kind(),
            contact = %channel.masked_contact(),
            "submitting verification code"
        );

        let response = match channel {
            Channel::Sms { .. } => {
                self.post_json(
                    &url,
                    &PhoneVerifyRequest {
                        login_id,
                        phone: &contact,
                        code,
                    },
                )
                .await?
            }
            Channel::Email { .. } => {
                self.post_json(
                    &url,
                    &EmailVerifyRequest {
                        login_id,
                        email: &contact,
                        code,
                    },
                )
                .await?
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error = Self::rejection(response).await;
            warn!(
                status = status.as_u16(),
                channel = %channel.kind(),
                error = %error,
                "verification rejected by member API"
            );
            return Err(error);
        }

        let envelope: ApiEnvelope<VerifyData> =
            response.json().await.map_err(|error| GatewayError::Transport {
                message: format!("invalid response body: {}", error),
            })?;
        Ok(VerifiedCode {
            result_token: envelope.data.and_then(|data| data.result_token),
        })
    }
}

#[async_trait]
impl PasswordGateway for MemberApiGateway {
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), GatewayError> {
        let url = self.config.endpoint(&self.config.reset_password_path);
        debug!("submitting password reset");

        let response = self
            .post_json(&url, &PasswordResetRequest { token, new_password })
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let error = Self::rejection(response).await;
        warn!(
            status = status.as_u16(),
            error = %error,
            "password reset rejected by member API"
        );
        Err(error)
    }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        message: error.to_string(),
    }
}

/// Map a non-success status and optional server message onto the error
/// taxonomy the flows understand
fn rejection_from(status: StatusCode, message: Option<String>) -> GatewayError {
    if status == StatusCode::NOT_FOUND {
        GatewayError::MemberNotFound
    } else if status.is_client_error() {
        GatewayError::Rejected {
            status: status.as_u16(),
            message,
        }
    } else {
        GatewayError::Server {
            status: status.as_u16(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_404_maps_to_member_not_found() {
        let error = rejection_from(
            StatusCode::NOT_FOUND,
            Some("찾을 수 없습니다.".to_string()),
        );
        assert_eq!(error, GatewayError::MemberNotFound);
    }

    #[test]
    fn test_client_errors_keep_server_message() {
        let error = rejection_from(
            StatusCode::BAD_REQUEST,
            Some("인증번호가 일치하지 않습니다.".to_string()),
        );
        assert_eq!(
            error,
            GatewayError::Rejected {
                status: 400,
                message: Some("인증번호가 일치하지 않습니다.".to_string()),
            }
        );
    }

    #[test]
    fn test_server_errors_drop_message() {
        let error = rejection_from(StatusCode::INTERNAL_SERVER_ERROR, Some("oops".to_string()));
        assert_eq!(error, GatewayError::Server { status: 500 });
        assert_eq!(
            rejection_from(StatusCode::BAD_GATEWAY, None),
            GatewayError::Server { status: 502 }
        );
    }

    #[test]
    fn test_request_bodies_use_camel_case() {
        let body = serde_json::to_value(PhoneVerifyRequest {
            login_id: "user1",
            phone: "01012345678",
            code: "123456",
        })
        .unwrap();
        assert_eq!(body["loginId"], "user1");
        assert_eq!(body["phone"], "01012345678");
        assert_eq!(body["code"], "123456");

        let body = serde_json::to_value(PasswordResetRequest {
            token: "abc123",
            new_password: "Passw0rd!",
        })
        .unwrap();
        assert_eq!(body["token"], "abc123");
        assert_eq!(body["newPassword"], "Passw0rd!");
    }

    #[test]
    fn test_verify_envelope_parses_result_token() {
        let envelope: ApiEnvelope<VerifyData> =
            serde_json::from_str(r#"{"data":{"resultToken":"abc123"},"status":200}"#).unwrap();
        assert_eq!(
            envelope.data.and_then(|d| d.result_token).as_deref(),
            Some("abc123")
        );

        let envelope: ApiEnvelope<VerifyData> =
            serde_json::from_str(r#"{"status":200}"#).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_endpoints_follow_channel_kind() {
        let gateway =
            MemberApiGateway::with_client(reqwest::Client::new(), MemberApiConfig::default());
        assert!(gateway
            .request_endpoint(ChannelKind::Sms)
            .ends_with("/verification/phone"));
        assert!(gateway
            .request_endpoint(ChannelKind::Email)
            .ends_with("/verification/email"));
        assert!(gateway
            .verify_endpoint(ChannelKind::Sms)
            .ends_with("/verification/phone/verify"));
        assert!(gateway
            .verify_endpoint(ChannelKind::Email)
            .ends_with("/verification/email/verify"));
    }
}
