//! Verification channel value object.
//!
//! A channel pairs the delivery medium (SMS or email) with the contact
//! value the member typed. The two are kept together because switching
//! the medium discards the typed value.

use serde::{Deserialize, Serialize};
use sodam_shared::utils::phone;

/// Delivery medium for verification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Code delivered by text message
    Sms,
    /// Code delivered by email
    Email,
}

impl ChannelKind {
    /// Stable label used in logs and analytics events
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Sms => "sms",
            ChannelKind::Email => "email",
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A delivery channel together with the contact the member entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Channel {
    Sms { phone: String },
    Email { email: String },
}

impl Channel {
    /// Create an empty channel of the given kind
    pub fn empty(kind: ChannelKind) -> Self {
        match kind {
            ChannelKind::Sms => Channel::Sms {
                phone: String::new(),
            },
            ChannelKind::Email => Channel::Email {
                email: String::new(),
            },
        }
    }

    pub fn kind(&self) -> ChannelKind {
        match self {
            Channel::Sms { .. } => ChannelKind::Sms,
            Channel::Email { .. } => ChannelKind::Email,
        }
    }

    /// Contact value exactly as the member typed it
    pub fn contact(&self) -> &str {
        match self {
            Channel::Sms { phone } => phone,
            Channel::Email { email } => email,
        }
    }

    /// Replace the contact value, keeping the kind
    pub fn set_contact(&mut self, value: &str) {
        match self {
            Channel::Sms { phone } => *phone = value.to_string(),
            Channel::Email { email } => *email = value.to_string(),
        }
    }

    /// Contact value in the form sent to the member API.
    ///
    /// Phone numbers are reduced to digits so "010-1234-5678" and
    /// "01012345678" submit identically. Emails are trimmed.
    pub fn normalized_contact(&self) -> String {
        match self {
            Channel::Sms { phone } => phone::normalize_phone_number(phone),
            Channel::Email { email } => email.trim().to_string(),
        }
    }

    /// Masked contact value, safe for logs and analytics
    pub fn masked_contact(&self) -> String {
        match self {
            Channel::Sms { phone } => phone::mask_phone_number(phone),
            Channel::Email { email } => phone::mask_email(email),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contact().trim().is_empty()
    }
}

impl Default for Channel {
    fn default() -> Self {
        Channel::empty(ChannelKind::Sms)
    }
}
