//! config.json の読み込み（adapter 層）
//!
//! 無ければすべてデフォルト。data_dir の相対パスはホームディレクトリ基準。

use common::domain::HomeDir;
use common::error::Error;
use common::llm::config::LlmConfigRaw;
use common::llm::LlmConfig;
use common::ports::outbound::FileSystem;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
struct AppConfigRaw {
    #[serde(flatten)]
    llm: LlmConfigRaw,
    data_dir: Option<String>,
}

/// アプリ設定
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub llm: LlmConfig,
    /// 文書ストアのルート
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// ホームディレクトリの config.json を読む
    pub fn load(fs: &dyn FileSystem, home: &HomeDir) -> Result<Self, Error> {
        let path = home.config_path();
        let raw = if fs.exists(&path) {
            let content = fs.read_to_string(&path)?;
            serde_json::from_str::<AppConfigRaw>(&content)
                .map_err(|e| Error::env(format!("Invalid {}: {}", path.display(), e)))?
        } else {
            AppConfigRaw::default()
        };
        let data_dir = match raw.data_dir {
            Some(d) if !d.trim().is_empty() => home.join(d.trim()),
            _ => home.join("data"),
        };
        Ok(Self {
            llm: raw.llm.into(),
            data_dir,
        })
    }
}
