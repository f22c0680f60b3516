//! 認証 Outbound ポート
//!
//! ログイン中のプリンシパル（uid + email）を返す。None ならゲスト。

use crate::domain::Principal;

pub trait AuthSession: Send + Sync {
    fn current(&self) -> Option<Principal>;
}
