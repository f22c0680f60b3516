//! Geminiプロバイダの実装（generateContent、非ストリーミング）

use crate::error::Error;
use crate::llm::config::LlmConfig;
use crate::llm::provider::{GenerationConfig, GenerationOutcome, LlmProvider};
use serde_json::{json, Value};

/// Geminiプロバイダ
pub struct GeminiProvider {
    model: String,
    base_url: String,
    /// API キー（未設定でも生成し、呼び出し時にエラーにする）
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダを作成
    ///
    /// # Arguments
    /// * `config` - モデル名・ベース URL・API キーの環境変数名
    /// * `api_key` - 解決済みの API キー（None なら呼び出し時に Env エラー）
    pub fn new(config: &LlmConfig, api_key: Option<String>) -> Self {
        Self {
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
        }
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        )
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn make_request_payload(&self, prompt: &str, generation: &GenerationConfig) -> Result<Value, Error> {
        Ok(json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": generation.temperature,
                "maxOutputTokens": generation.max_output_tokens
            }
        }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::env(format!("{} environment variable is not set", self.api_key_env))
        })?;

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(self.endpoint(api_key))
            .header("Content-Type", "application/json")
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // エラーレスポンスを解析してメッセージを抽出
            let error_msg = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
                .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text));
            return Err(Error::http(format!(
                "API request failed with status {}: {}",
                status.as_u16(),
                error_msg
            )));
        }

        Ok(response_text)
    }

    fn parse_response(&self, response_json: &str) -> Result<GenerationOutcome, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        // 最初の候補の最初の非空テキスト
        let text = v["candidates"][0]["content"]["parts"]
            .as_array()
            .and_then(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .find(|t| !t.is_empty())
            });
        if let Some(text) = text {
            return Ok(GenerationOutcome::Text(text.to_string()));
        }

        if let Some(reason) = v["promptFeedback"]["blockReason"].as_str() {
            return Ok(GenerationOutcome::Blocked {
                reason: reason.to_string(),
            });
        }

        Ok(GenerationOutcome::Empty)
    }
}
