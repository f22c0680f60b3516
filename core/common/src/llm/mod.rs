//! LLM ドライバーとプロバイダの実装
//!
//! 生成 API の呼び出し（ペイロード生成・HTTP・応答の正規化）をプロバイダごとに閉じ込める。

pub mod config;
pub mod driver;
pub mod gemini;
pub mod provider;

pub use config::LlmConfig;
pub use driver::LlmDriver;
pub use gemini::GeminiProvider;
pub use provider::{GenerationConfig, GenerationOutcome, LlmProvider};
