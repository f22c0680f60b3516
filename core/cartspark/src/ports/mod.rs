//! Ports & Adapters のポート定義
//!
//! - inbound: CLI がアプリを呼び出す入り口
//! - outbound: usecase が AI・ストア・認証を使うための trait

pub mod inbound;
pub mod outbound;
