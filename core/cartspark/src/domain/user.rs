//! ユーザー文書と購読状態

use crate::domain::ids::Email;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    #[default]
    Inactive,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// users/<uid> 文書
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub email: Option<Email>,
    #[serde(default)]
    pub subscription_status: SubscriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_customer_id: Option<String>,
    pub created_at: u64,
}

impl UserRecord {
    /// サインアップ直後の文書（未購読）
    pub fn new(email: Option<Email>, created_at: u64) -> Self {
        Self {
            email,
            subscription_status: SubscriptionStatus::Inactive,
            stripe_customer_id: None,
            created_at,
        }
    }
}
