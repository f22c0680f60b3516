//! LlmDriver を TextGenerator ポートとして使うアダプター

use crate::ports::outbound::TextGenerator;
use common::error::Error;
use common::llm::{GenerationOutcome, LlmDriver, LlmProvider};

/// LLM プロバイダでテキストを生成する
pub struct LlmTextGenerator<P: LlmProvider> {
    driver: LlmDriver<P>,
}

impl<P: LlmProvider> LlmTextGenerator<P> {
    pub fn new(driver: LlmDriver<P>) -> Self {
        Self { driver }
    }
}

impl<P: LlmProvider> TextGenerator for LlmTextGenerator<P> {
    fn generate(&self, prompt: &str) -> Result<GenerationOutcome, Error> {
        self.driver.generate(prompt)
    }
}
