//! 課金プロバイダの Webhook 署名検証とイベント解析
//!
//! 署名ヘッダーは `t=<unix秒>,v1=<hex>` 形式。`v1` は
//! HMAC-SHA256(secret, "<t>.<payload>") の hex。`v1` が複数あればどれか 1 つ一致すればよい。

use crate::domain::error::WebhookError;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// タイムスタンプの許容誤差（秒）
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

/// ヘッダーの署名を計算する（テストや送信側のシミュレーション用）
pub fn compute_signature(secret: &str, timestamp: i64, payload: &str) -> Result<String, WebhookError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| WebhookError::InvalidSignature(e.to_string()))?;
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// 署名ヘッダーを検証する
///
/// # Arguments
/// * `now_secs` - 現在時刻（Unix 秒）。タイムスタンプとの差が許容誤差を超えたら拒否する。
pub fn verify_signature(
    payload: &str,
    header: &str,
    secret: &str,
    now_secs: i64,
) -> Result<(), WebhookError> {
    let invalid = |msg: &str| WebhookError::InvalidSignature(msg.to_string());

    let mut timestamp: Option<i64> = None;
    let mut signatures: Vec<&str> = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", v)) => timestamp = v.parse().ok(),
            Some(("v1", v)) => signatures.push(v),
            _ => {}
        }
    }
    let timestamp = timestamp.ok_or_else(|| invalid("Unable to extract timestamp from header"))?;
    if signatures.is_empty() {
        return Err(invalid("No v1 signatures found in header"));
    }
    if now_secs.abs_diff(timestamp) > SIGNATURE_TOLERANCE_SECS.unsigned_abs() {
        return Err(invalid("Timestamp outside the tolerance zone"));
    }

    let matched = signatures.iter().any(|sig| {
        let Ok(expected) = hex::decode(sig) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };
        mac.update(format!("{}.{}", timestamp, payload).as_bytes());
        mac.verify_slice(&expected).is_ok()
    });
    if matched {
        Ok(())
    } else {
        Err(invalid(
            "No signatures found matching the expected signature for payload",
        ))
    }
}

/// Webhook イベント（必要なフィールドだけ）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: EventData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub object: CheckoutSession,
}

/// checkout.session オブジェクト
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub client_reference_id: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
}

impl WebhookEvent {
    pub fn parse(payload: &str) -> Result<Self, WebhookError> {
        serde_json::from_str(payload).map_err(|e| WebhookError::InvalidPayload(e.to_string()))
    }
}
