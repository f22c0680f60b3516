//! アダプター（外界の I/O の実装）
//!
//! usecase は ports::outbound の trait 経由でのみ AI・ストア・認証に触れる。

pub(crate) mod config;
pub(crate) mod env_auth_session;
pub(crate) mod json_store;
pub(crate) mod llm_text_generator;

pub(crate) use config::AppConfig;
pub(crate) use env_auth_session::EnvAuthSession;
pub(crate) use json_store::JsonDocumentStore;
pub(crate) use llm_text_generator::LlmTextGenerator;
