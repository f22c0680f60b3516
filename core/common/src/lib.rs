//! CartSpark 共通ライブラリ
//!
//! `cartspark` コマンドが使うエラー型・ポート・標準アダプター・LLM クライアントを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// Outbound ポート（trait）
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// LLMドライバーとプロバイダ
pub mod llm;
