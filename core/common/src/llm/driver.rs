//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理（ペイロード生成 → HTTP → 正規化）を提供します。

use crate::error::Error;
use crate::llm::provider::{GenerationConfig, GenerationOutcome, LlmProvider};

/// LLMドライバー
pub struct LlmDriver<P: LlmProvider> {
    provider: P,
    generation: GenerationConfig,
}

impl<P: LlmProvider> LlmDriver<P> {
    /// 新しいドライバーを作成
    pub fn new(provider: P, generation: GenerationConfig) -> Self {
        Self {
            provider,
            generation,
        }
    }

    /// プロンプトを 1 回送って応答を取得
    ///
    /// # Returns
    /// * `Ok(GenerationOutcome)` - テキスト / ブロック / 空
    /// * `Err(Error)` - ペイロード生成・HTTP・JSON の失敗（リトライしない）
    pub fn generate(&self, prompt: &str) -> Result<GenerationOutcome, Error> {
        let payload = self.provider.make_request_payload(prompt, &self.generation)?;
        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;
        let response_json = self.provider.make_http_request(&request_json)?;
        self.provider.parse_response(&response_json)
    }

    /// プロバイダを取得
    pub fn provider(&self) -> &P {
        &self.provider
    }
}
