//! テキスト生成 Outbound ポート
//!
//! usecase はプロンプトを 1 回送り、正規化済みの GenerationOutcome を受け取る。
//! 実装は adapter::LlmTextGenerator（Gemini）やテスト用のスタブ。

use common::error::Error;
use common::llm::GenerationOutcome;

pub trait TextGenerator: Send + Sync {
    /// # Returns
    /// * `Err(Error)` - HTTP 失敗・API キー未設定（リトライしない）
    fn generate(&self, prompt: &str) -> Result<GenerationOutcome, Error>;
}
