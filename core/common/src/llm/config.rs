//! config.json の LLM 部分の設定型
//!
//! モデル名・API キーの環境変数名・生成パラメータを解決する。省略時は各デフォルト。

use crate::llm::provider::GenerationConfig;
use serde::Deserialize;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// LLM 呼び出しの設定
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub model: String,
    /// API キーを読む環境変数名
    pub api_key_env: String,
    /// API のベース URL（テストやプロキシ用に差し替え可能）
    pub base_url: String,
    pub generation: GenerationConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            generation: GenerationConfig::default(),
        }
    }
}

/// serde 用の内部構造（全フィールド省略可）
#[derive(Debug, Default, Deserialize)]
pub struct LlmConfigRaw {
    #[serde(alias = "default_model")]
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f64>,
    #[serde(alias = "maxOutputTokens")]
    pub max_output_tokens: Option<u32>,
}

impl From<LlmConfigRaw> for LlmConfig {
    fn from(r: LlmConfigRaw) -> Self {
        let d = LlmConfig::default();
        LlmConfig {
            model: r.model.unwrap_or(d.model),
            api_key_env: r.api_key_env.unwrap_or(d.api_key_env),
            base_url: r
                .base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(d.base_url),
            generation: GenerationConfig {
                temperature: r.temperature.unwrap_or(d.generation.temperature),
                max_output_tokens: r.max_output_tokens.unwrap_or(d.generation.max_output_tokens),
            },
        }
    }
}

impl LlmConfig {
    /// JSON 文字列からパース（ファイル読みは呼び出し側で行う）
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: LlmConfigRaw = serde_json::from_str(json)?;
        Ok(raw.into())
    }
}
