//! エラーハンドリング
//!
//! CLI 境界まで運ぶ共通エラー型。終了コードは sysexits に合わせる。

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// ファイル・ストアの読み書き失敗
    #[error("{0}")]
    Io(String),
    /// JSON のシリアライズ・パース失敗
    #[error("JSON error: {0}")]
    Json(String),
    /// HTTP / 外部 API の失敗
    #[error("{0}")]
    Http(String),
    /// 環境変数・設定の不足
    #[error("{0}")]
    Env(String),
    /// 引数不正・入力検証エラー
    #[error("{0}")]
    InvalidArgument(String),
    /// 上記以外の内部エラー
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    /// 引数不正エラー
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// システムエラー
    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// 使い方の誤りか（main で usage を表示するかの判定）
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::System(_) => 70,
            Self::Io(_) | Self::Json(_) | Self::Http(_) => 74,
            Self::Env(_) => 78,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
