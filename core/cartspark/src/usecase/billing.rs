//! アカウント作成時の初期化と課金 Webhook の処理
//!
//! 購読状態は表示用。リストの分類機能はこれで制限しない。

use crate::domain::billing::{verify_signature, WebhookEvent, CHECKOUT_COMPLETED};
use crate::domain::{ListError, MealPlan, Principal, SubscriptionStatus, Uid, UserRecord, WebhookError};
use crate::ports::outbound::{MealPlanRepository, UserRepository};
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// Webhook 処理の結果（いずれも HTTP 200 相当）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookAck {
    /// 購読を有効にした
    Activated { uid: Uid },
    /// 対象外のイベント
    Ignored { event_type: String },
}

pub struct BillingUseCase {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn MealPlanRepository>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
    webhook_secret: Option<String>,
}

impl BillingUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        plans: Arc<dyn MealPlanRepository>,
        clock: Arc<dyn Clock>,
        log: Arc<dyn Log>,
        webhook_secret: Option<String>,
    ) -> Self {
        Self {
            users,
            plans,
            clock,
            log,
            webhook_secret,
        }
    }

    fn log(&self, level: LogLevel, msg: &str) -> LogRecord {
        LogRecord::new(level, "usecase", "billing", msg)
    }

    /// サインアップ直後の文書を作る（ユーザー文書・メール索引・空の献立プラン）
    pub fn on_user_created(&self, principal: &Principal) -> Result<UserRecord, ListError> {
        let record = UserRecord::new(principal.email.clone(), self.clock.now_ms());
        self.users
            .save(&principal.uid, &record)
            .map_err(ListError::persistence)?;
        if let Some(email) = &principal.email {
            self.users
                .index_email(email, &principal.uid)
                .map_err(ListError::persistence)?;
        }
        self.plans
            .save(&MealPlan::empty(principal.uid.clone()))
            .map_err(ListError::persistence)?;
        let _ = self
            .log
            .log(&self.log(LogLevel::Info, "user initialized").field("uid", principal.uid.as_str()));
        Ok(record)
    }

    /// ユーザー文書が無ければ inactive
    pub fn subscription_status(&self, principal: &Principal) -> Result<SubscriptionStatus, ListError> {
        Ok(self
            .users
            .get(&principal.uid)
            .map_err(ListError::persistence)?
            .map(|r| r.subscription_status)
            .unwrap_or_default())
    }

    /// 署名を検証してイベントを処理する
    pub fn handle_webhook(&self, payload: &str, signature_header: &str) -> Result<WebhookAck, WebhookError> {
        let result = self.process_webhook(payload, signature_header);
        let rec = match &result {
            Ok(WebhookAck::Activated { uid }) => self
                .log(LogLevel::Info, "subscription activated")
                .field("uid", uid.as_str()),
            Ok(WebhookAck::Ignored { event_type }) => self
                .log(LogLevel::Debug, "webhook event ignored")
                .field("type", event_type.as_str()),
            Err(e) => self
                .log(LogLevel::Error, "webhook rejected")
                .field("status", e.status())
                .field("error", e.to_string()),
        };
        let _ = self.log.log(&rec);
        result
    }

    fn process_webhook(&self, payload: &str, signature_header: &str) -> Result<WebhookAck, WebhookError> {
        let secret = self
            .webhook_secret
            .as_deref()
            .ok_or(WebhookError::NotConfigured)?;
        let now_secs = (self.clock.now_ms() / 1000) as i64;
        verify_signature(payload, signature_header, secret, now_secs)?;

        let event = WebhookEvent::parse(payload)?;
        if event.event_type != CHECKOUT_COMPLETED {
            return Ok(WebhookAck::Ignored {
                event_type: event.event_type,
            });
        }
        let session = event.data.object;
        let uid = session
            .client_reference_id
            .as_deref()
            .and_then(Uid::parse)
            .ok_or(WebhookError::MissingReference)?;

        // 既存の文書を更新する（無ければ失敗）
        let mut record = self
            .users
            .get(&uid)
            .map_err(|e| WebhookError::Store(e.to_string()))?
            .ok_or_else(|| WebhookError::Store(format!("user {} does not exist", uid)))?;
        record.subscription_status = SubscriptionStatus::Active;
        record.stripe_customer_id = session.customer;
        self.users
            .save(&uid, &record)
            .map_err(|e| WebhookError::Store(e.to_string()))?;
        Ok(WebhookAck::Activated { uid })
    }
}
