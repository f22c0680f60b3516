//! リスト操作・AI 連携のエラー
//!
//! すべて 1 行の人間向けメッセージとして表示する。リトライはしない。

use common::error::Error;

/// リスト・食事・プランの操作エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// 入力が空（AI には何も送らない）
    #[error("Nothing to do: the input is empty")]
    EmptyInput,
    /// 候補テキストが返らなかった
    #[error("The AI returned an empty response. Please try again.")]
    EmptyAIResponse,
    /// プロバイダにブロックされた
    #[error("Request blocked by AI provider: {0}")]
    BlockedByProvider(String),
    /// 波括弧の範囲が無い、または修復後も JSON として不正
    #[error("The AI returned a response that could not be read: {0}")]
    MalformedAIResponse(String),
    /// JSON は読めたがカテゴリのオブジェクトではない
    #[error("The AI did not return a categorized list")]
    IncompleteCategorization,
    /// ストアの読み書き失敗
    #[error("Could not save your list: {0}")]
    PersistenceFailure(String),
    /// HTTP 失敗・API キー未設定
    #[error("AI service unavailable: {0}")]
    AiUnavailable(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Not permitted: {0}")]
    NotPermitted(String),
}

impl ListError {
    /// ストア由来のエラーを包む
    pub fn persistence(e: impl std::fmt::Display) -> Self {
        Self::PersistenceFailure(e.to_string())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn not_permitted(what: impl Into<String>) -> Self {
        Self::NotPermitted(what.into())
    }
}

impl From<ListError> for Error {
    fn from(e: ListError) -> Self {
        match e {
            ListError::EmptyInput | ListError::NotFound(_) | ListError::NotPermitted(_) => {
                Error::invalid_argument(e.to_string())
            }
            ListError::PersistenceFailure(_) => Error::io_msg(e.to_string()),
            ListError::AiUnavailable(_)
            | ListError::EmptyAIResponse
            | ListError::BlockedByProvider(_)
            | ListError::MalformedAIResponse(_)
            | ListError::IncompleteCategorization => Error::http(e.to_string()),
        }
    }
}

/// Webhook 処理のエラー（HTTP ステータスに対応）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookError {
    /// 署名ヘッダーが無い・不正・期限切れ（400）
    #[error("Webhook Error: {0}")]
    InvalidSignature(String),
    /// client_reference_id が無い（400）
    #[error("Webhook Error: Missing client_reference_id")]
    MissingReference,
    /// ペイロードが JSON として読めない（400）
    #[error("Webhook Error: {0}")]
    InvalidPayload(String),
    /// ユーザー文書の更新に失敗（500）
    #[error("Internal Server Error: {0}")]
    Store(String),
    /// シークレット未設定（500）
    #[error("Internal Server Error: webhook secret is not configured")]
    NotConfigured,
}

impl WebhookError {
    /// 対応する HTTP ステータス
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidSignature(_) | Self::MissingReference | Self::InvalidPayload(_) => 400,
            Self::Store(_) | Self::NotConfigured => 500,
        }
    }
}

impl From<WebhookError> for Error {
    fn from(e: WebhookError) -> Self {
        match e {
            WebhookError::NotConfigured => Error::env(e.to_string()),
            WebhookError::Store(_) => Error::io_msg(e.to_string()),
            _ => Error::invalid_argument(e.to_string()),
        }
    }
}
