//! LLMプロバイダのトレイト定義

use crate::error::Error;
use serde_json::Value;

/// 生成パラメータ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_output_tokens: 2048,
        }
    }
}

/// 生成 API の応答を正規化したもの
///
/// 応答の形は保証されないため、テキストの有無・ブロックの有無をタグで表す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// 候補テキストが得られた
    Text(String),
    /// 安全性ポリシー等でプロバイダにブロックされた
    Blocked { reason: String },
    /// 候補テキストもブロック理由も無い
    Empty,
}

/// LLMプロバイダのトレイト
///
/// 各プロバイダはこのトレイトを実装する必要があります。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// 単発プロンプトのリクエストペイロードを生成
    ///
    /// # Arguments
    /// * `prompt` - user ロールで送るテキスト
    /// * `generation` - 温度・最大出力トークン
    fn make_request_payload(&self, prompt: &str, generation: &GenerationConfig) -> Result<Value, Error>;

    /// HTTPリクエストを実行してレスポンスを取得
    ///
    /// # Returns
    /// * `Ok(String)` - レスポンスJSON文字列
    /// * `Err(Error)` - HTTP 失敗、非 2xx、API キー未設定
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスJSONを GenerationOutcome に正規化
    fn parse_response(&self, response_json: &str) -> Result<GenerationOutcome, Error>;
}
